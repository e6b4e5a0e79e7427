use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Request, StatusCode};
use serde_json::json;

use printigo_core::IdentityVerifier;
use printigo_core::identity::Claims;
use printigo_server::token::JwtVerifier;

use crate::integration::common::{post_json, setup_test_app};

fn with_auth(path: &str, header: &str) -> Request<Body> {
    Request::get(path)
        .header(AUTHORIZATION, header)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn missing_header_is_401() {
    let app = setup_test_app();

    let (status, json) = app
        .send_json(
            Request::get("/my-reviews/alice@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");
    assert_eq!(json["message"], "unauthorized access");
}

#[tokio::test]
async fn unverifiable_credentials_are_403() {
    let app = setup_test_app();
    let valid = app.bearer_for("alice@example.com");
    let raw_token = valid.trim_start_matches("Bearer ").to_string();

    for header in [
        "Bearer not.a.token".to_string(),
        "Bearer ".to_string(),
        raw_token,
        format!("Token {}", valid.trim_start_matches("Bearer ")),
    ] {
        let (status, json) = app
            .send_json(with_auth("/my-reviews/alice@example.com", &header))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{header}");
        assert_eq!(json["message"], "Forbidden access");
    }
}

#[tokio::test]
async fn token_signed_with_other_secret_is_403() {
    let app = setup_test_app();
    let other = JwtVerifier::new("some-other-secret");
    let token = other
        .issue(Claims::new("alice@example.com", chrono::Utc::now()))
        .unwrap();

    let (status, json) = app
        .send_json(with_auth(
            "/my-reviews/alice@example.com",
            &format!("Bearer {token}"),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Forbidden access");
}

#[tokio::test]
async fn expired_token_is_403() {
    let app = setup_test_app();
    let issued = chrono::Utc::now() - chrono::Duration::days(2);
    let token = app
        .verifier
        .issue(Claims::new("alice@example.com", issued))
        .unwrap();

    let (status, _) = app
        .send(with_auth(
            "/my-reviews/alice@example.com",
            &format!("Bearer {token}"),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn other_owner_is_403() {
    let app = setup_test_app();
    let bearer = app.bearer_for("alice@example.com");

    let (status, json) = app
        .send_json(with_auth("/my-reviews/bob@example.com", &bearer))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "forbidden");
    assert_eq!(json["message"], "unauthorized access");
}

#[tokio::test]
async fn owner_sees_only_own_reviews_newest_first() {
    let app = setup_test_app();
    for (email, date) in [
        ("alice@example.com", "2022-01-01"),
        ("bob@example.com", "2022-02-01"),
        ("alice@example.com", "2022-03-01"),
    ] {
        app.insert("/reviews", json!({"email": email, "date": date}))
            .await;
    }
    let bearer = app.bearer_for("alice@example.com");

    let (status, json) = app
        .send_json(with_auth("/my-reviews/alice@example.com", &bearer))
        .await;

    assert_eq!(status, StatusCode::OK);
    let reviews = json.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|r| r["email"] == "alice@example.com"));
    assert_eq!(reviews[0]["date"], "2022-03-01");
}

#[tokio::test]
async fn issued_token_grants_access() {
    let app = setup_test_app();

    let (status, json) = app
        .send_json(post_json(
            "/jwt",
            &json!({"email": "carol@example.com", "name": "Carol"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["token"].as_str().unwrap().to_string();

    let claims = app.verifier.verify(&token).unwrap();
    assert_eq!(claims.email, "carol@example.com");
    assert_eq!(claims.extra["name"], "Carol");
    assert_eq!(claims.exp - claims.iat, 86_400);

    let (status, json) = app
        .send_json(with_auth(
            "/my-reviews/carol@example.com",
            &format!("Bearer {token}"),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn token_request_without_email_is_400() {
    let app = setup_test_app();

    let (status, json) = app
        .send_json(post_json("/jwt", &json!({"name": "Carol"})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_body");
    assert!(json["message"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn public_routes_ignore_credentials() {
    let app = setup_test_app();

    let (status, _) = app
        .send(with_auth("/reviews", "Bearer garbage"))
        .await;

    assert_eq!(status, StatusCode::OK);
}
