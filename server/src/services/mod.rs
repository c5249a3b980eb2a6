//! Business rules on top of the repositories. Services are cheap to clone and
//! only hold `Arc`s, so handlers take them straight from state.

use thiserror::Error;

use crate::auth::{PasswordError, TokenError};
use crate::store::StoreError;

pub mod animals;
pub mod auth;
pub mod bookings;
pub mod show_rounds;
pub mod stages;
pub mod users;

pub use animals::{AnimalService, Performance};
pub use auth::AuthService;
pub use bookings::BookingService;
pub use show_rounds::ShowRoundService;
pub use stages::StageService;
pub use users::UserService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("seat number {0} is already taken for this round")]
    SeatTaken(i32),

    #[error("invalid password")]
    InvalidPassword,

    #[error("user not found")]
    UnknownUser,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ServiceError::NotFound(err.to_string()),
            StoreError::SeatTaken(seat) => ServiceError::SeatTaken(seat),
            other => ServiceError::Store(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
