use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn ok<T>(data: T) -> Response
where
    T: Serialize,
{
    (StatusCode::OK, Json(data)).into_response()
}

pub fn created<T>(data: T) -> Response
where
    T: Serialize,
{
    (StatusCode::CREATED, Json(data)).into_response()
}

/// `{"message": "<Entity> deleted successfully"}`
pub fn deleted(entity: &str) -> Response {
    let body = MessageBody {
        message: format!("{} deleted successfully", entity),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: message.into(),
    };
    (status, Json(body)).into_response()
}
