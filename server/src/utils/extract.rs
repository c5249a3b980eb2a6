use axum::extract::FromRequest;

use crate::utils::error::AppError;

/// `axum::Json` whose rejection is reported as `{"error": ...}` with a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
