use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::TokenError;
use crate::services::ServiceError;
use crate::store::StoreError;
use crate::utils::response::error as error_response;

/// Error returned by every handler. The message is sent to the client as is.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ServiceError(String),

    #[error(transparent)]
    DatabaseError(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ServiceError(_) => "SERVICE_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => {
                warn!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::ServiceError(msg) => {
                error!(code = self.code(), message = %msg, "Application error");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            ServiceError::Validation(msg) => AppError::ValidationError(msg),
            ServiceError::Store(e) => AppError::DatabaseError(e),
            other => AppError::ServiceError(other.to_string()),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::ServiceError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        error_response(self.status_code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::NotFound("Animal not found".into()), StatusCode::NOT_FOUND),
            (ServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ServiceError::SeatTaken(5), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::InvalidPassword, StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::UnknownUser, StatusCode::INTERNAL_SERVER_ERROR),
            (
                ServiceError::Token(TokenError::ExpiredToken),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::Store(StoreError::Timeout(std::time::Duration::from_secs(10))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_message_is_kept_verbatim() {
        let err = AppError::from(ServiceError::SeatTaken(5));
        assert_eq!(err.to_string(), "seat number 5 is already taken for this round");

        let err = AppError::from(TokenError::NotAccessToken);
        assert_eq!(err.to_string(), "not an access token");
    }
}
