use axum::extract::FromRequest;

use crate::error::ApiError;

/// `Json` body whose rejections render as a 400 `{"error": ...}` payload.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
