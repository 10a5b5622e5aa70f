//! Request extractors

use axum::extract::FromRequest;

use crate::error::Error;

/// `axum::Json` whose rejections are reported as `{errors: [...]}` like
/// every other failure
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);
