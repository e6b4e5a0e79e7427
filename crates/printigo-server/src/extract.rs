use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejections go through [`ApiError`], so a bad body gets
/// the same `{error, message}` shape as every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
