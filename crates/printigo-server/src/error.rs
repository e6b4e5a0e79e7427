use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use printigo_core::error::AppError;

use crate::dto::ErrorResponse;

/// Message sent when the guard rejects a credential.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden access";

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Any JSON body rejection, content-type mismatches included, is a 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::InvalidBody(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            AppError::MalformedIdentifier(_) => (StatusCode::BAD_REQUEST, "malformed_identifier"),
            AppError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "invalid_body"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden(_) | AppError::InvalidToken(_) => {
                (StatusCode::FORBIDDEN, "forbidden")
            }
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::TokenError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "token_error"),
            AppError::SerializationError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error")
            }
        };

        let message = match &self.0 {
            AppError::InvalidToken(reason) => {
                tracing::debug!(%reason, "rejected credential");
                FORBIDDEN_MESSAGE.to_string()
            }
            err if status.is_server_error() => {
                tracing::error!(error = %err, kind = error_type, "request failed");
                "internal server error".to_string()
            }
            err => err.to_string(),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}
