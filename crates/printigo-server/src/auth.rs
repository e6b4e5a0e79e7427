use std::sync::Arc;

use axum::extract::State;
use axum::http::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use printigo_core::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Message sent when no credential is presented.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";

/// Middleware that verifies `Authorization: Bearer <token>` and stores the
/// decoded [`printigo_core::Claims`] in the request extensions.
///
/// No header yields 401. A header that does not carry a verifiable token yields 403.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return ApiError(AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())).into_response();
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .unwrap_or_default()
        .trim();

    match state.verifier.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => ApiError(err).into_response(),
    }
}
