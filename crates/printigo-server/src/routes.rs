use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router, middleware};
use chrono::Utc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use printigo_core::{Claims, RecordId, authorize_owner};

use crate::auth::require_bearer;
use crate::dto::{
    DeleteResponse, HealthResponse, InsertResponse, IssueTokenRequest, NewDocumentRequest,
    RecordResponse, TokenResponse, UpdateResponse, UpdateReviewRequest,
};
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub const WELCOME: &str = "Welcome to Printigo Web Server";
pub const NOT_FOUND: &str = "404 Not Found";

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let owner = Router::new()
        .route("/my-reviews/{email}", get(list_my_reviews))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    let public = Router::new()
        .route("/", get(root))
        .route("/jwt", post(issue_token))
        .route("/services", get(list_services).post(create_service))
        .route("/services/limit", get(list_home_services))
        .route("/services/{id}", get(get_service))
        .route("/reviews", get(list_reviews).post(create_review))
        .route(
            "/reviews/{id}",
            get(list_reviews_by_service).patch(update_review),
        )
        .route("/single-reviews/{id}", get(get_review))
        .route("/delete/{id}", delete(delete_review))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public
        .merge(owner)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}

fn records(records: Vec<printigo_core::Record>) -> Json<Vec<RecordResponse>> {
    Json(records.into_iter().map(RecordResponse::from).collect())
}

pub async fn root() -> &'static str {
    WELCOME
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NOT_FOUND)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/jwt",
    request_body = IssueTokenRequest,
    responses(
        (status = 200, description = "Signed credential, valid for one day", body = TokenResponse),
    ),
    tag = "auth"
)]
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<IssueTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = Claims::new(body.email, Utc::now()).with_extra(body.extra);
    let token = state.verifier.issue(claims)?;
    Ok(Json(TokenResponse { token }))
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/services",
    responses(
        (status = 200, description = "All services, newest first", body = Vec<RecordResponse>),
    ),
    tag = "services"
)]
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(records(state.catalog.list_services().await?))
}

#[utoipa::path(
    get,
    path = "/services/limit",
    responses(
        (status = 200, description = "The three newest services", body = Vec<RecordResponse>),
    ),
    tag = "services"
)]
pub async fn list_home_services(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(records(state.catalog.list_home_services().await?))
}

#[utoipa::path(
    get,
    path = "/services/{id}",
    params(
        ("id" = String, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "The service, or null when absent", body = RecordResponse),
        (status = 400, description = "Malformed identifier", body = crate::dto::ErrorResponse),
    ),
    tag = "services"
)]
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let service = state.catalog.get_service(id).await?;
    Ok(Json(service.map(RecordResponse::from)))
}

#[utoipa::path(
    post,
    path = "/services",
    request_body = NewDocumentRequest,
    responses(
        (status = 200, description = "Service stored", body = InsertResponse),
    ),
    tag = "services"
)]
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<NewDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.catalog.create_service(body.fields).await?;
    Ok(Json(InsertResponse::from(result)))
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/reviews",
    request_body = NewDocumentRequest,
    responses(
        (status = 200, description = "Review stored", body = InsertResponse),
    ),
    tag = "reviews"
)]
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<NewDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.catalog.create_review(body.fields).await?;
    Ok(Json(InsertResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/reviews",
    responses(
        (status = 200, description = "All reviews, newest first", body = Vec<RecordResponse>),
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(records(state.catalog.list_reviews().await?))
}

#[utoipa::path(
    get,
    path = "/single-reviews/{id}",
    params(
        ("id" = String, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "The review, or null when absent", body = RecordResponse),
        (status = 400, description = "Malformed identifier", body = crate::dto::ErrorResponse),
    ),
    tag = "reviews"
)]
pub async fn get_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let review = state.catalog.get_review(id).await?;
    Ok(Json(review.map(RecordResponse::from)))
}

#[utoipa::path(
    patch,
    path = "/reviews/{id}",
    params(
        ("id" = String, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateResponse),
        (status = 400, description = "Malformed identifier", body = crate::dto::ErrorResponse),
    ),
    tag = "reviews"
)]
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let result = state.catalog.update_review(id, body.into()).await?;
    Ok(Json(UpdateResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/reviews/{id}",
    params(
        ("id" = String, Path, description = "Service ID the reviews refer to")
    ),
    responses(
        (status = 200, description = "Reviews of the service, newest first", body = Vec<RecordResponse>),
    ),
    tag = "reviews"
)]
pub async fn list_reviews_by_service(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(records(
        state.catalog.list_reviews_by_service(&service_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/my-reviews/{email}",
    params(
        ("email" = String, Path, description = "Owner email; must match the credential")
    ),
    responses(
        (status = 200, description = "The caller's reviews, newest first", body = Vec<RecordResponse>),
        (status = 401, description = "No credential", body = crate::dto::ErrorResponse),
        (status = 403, description = "Invalid credential or another owner", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "reviews"
)]
pub async fn list_my_reviews(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    authorize_owner(&claims, &email)?;
    Ok(records(state.catalog.list_reviews_by_owner(&email).await?))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(
        ("id" = String, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Delete acknowledgement", body = DeleteResponse),
        (status = 400, description = "Malformed identifier", body = crate::dto::ErrorResponse),
    ),
    tag = "reviews"
)]
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: RecordId = id.parse()?;
    let result = state.catalog.delete_review(id).await?;
    Ok(Json(DeleteResponse::from(result)))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_status = match state.catalog.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            "error"
        }
    };

    let status = if db_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_status == "ok" {
            "healthy"
        } else {
            "unhealthy"
        },
        database: db_status,
    };

    (status, Json(response))
}
