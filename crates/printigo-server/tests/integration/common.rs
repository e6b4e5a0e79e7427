use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use printigo_core::testutil::MemoryStore;
use printigo_core::{Claims, IdentityVerifier};
use printigo_server::routes;
use printigo_server::state::AppState;
use printigo_server::token::JwtVerifier;

pub const TEST_SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub verifier: Arc<JwtVerifier>,
}

impl TestApp {
    /// Send a request and return the status and raw body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    /// Send a request and parse the body as JSON.
    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// A valid `Authorization` header value for `email`.
    pub fn bearer_for(&self, email: &str) -> String {
        let token = self.verifier.issue(Claims::new(email, Utc::now())).unwrap();
        format!("Bearer {token}")
    }

    /// POST a JSON body and return the inserted id.
    pub async fn insert(&self, path: &str, body: serde_json::Value) -> String {
        let (status, json) = self.send_json(post_json(path, &body)).await;
        assert_eq!(status, StatusCode::OK);
        json["insertedId"].as_str().unwrap().to_string()
    }
}

/// Build the router over an in-memory store and a real JWT verifier.
pub fn setup_test_app() -> TestApp {
    let store = MemoryStore::new();
    let verifier = Arc::new(JwtVerifier::new(TEST_SECRET));
    let state = Arc::new(AppState::new(Arc::new(store.clone()), verifier.clone()));

    TestApp {
        router: routes::router(state),
        store,
        verifier,
    }
}

pub fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

pub fn post_json(path: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn patch_json(path: &str, body: &serde_json::Value) -> Request<Body> {
    Request::patch(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}
