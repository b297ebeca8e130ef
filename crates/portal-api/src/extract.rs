//! Request extractors whose rejections render as [`ApiError`] JSON bodies.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// [`axum::Json`] with malformed or mistyped bodies reported as
/// `{"error": ...}` instead of a plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
