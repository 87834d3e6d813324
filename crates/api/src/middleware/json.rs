use axum::extract::FromRequest;

use crate::error::AppError;

/// [`axum::Json`] with rejections rendered through [`AppError`], so
/// malformed bodies get the same JSON error envelope as everything else.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
