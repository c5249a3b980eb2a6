use axum::extract::FromRef;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::config::AuthConfig;
use crate::services::{
    AnimalService, AuthService, BookingService, ShowRoundService, StageService, UserService,
};
use crate::store::Repositories;

/// Shared handler state. Every field is cheap to clone.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
    pub animals: AnimalService,
    pub stages: StageService,
    pub show_rounds: ShowRoundService,
    pub bookings: BookingService,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Composition root: wires each service to the repositories it needs.
    pub fn new(repos: Repositories, auth: &AuthConfig) -> Self {
        let hasher = PasswordHasher::new(auth.bcrypt_cost);
        let tokens = TokenIssuer::new(
            &auth.jwt_secret,
            auth.access_token_ttl,
            auth.refresh_token_ttl,
        );

        let users = UserService::new(
            repos.users.clone(),
            repos.bookings.clone(),
            hasher,
            auth.enforce_password_strength,
        );

        Self {
            auth: AuthService::new(users.clone(), tokens.clone()),
            users,
            animals: AnimalService::new(repos.animals.clone(), repos.show_rounds.clone()),
            stages: StageService::new(repos.stages.clone()),
            show_rounds: ShowRoundService::new(repos.show_rounds.clone(), repos.bookings.clone()),
            bookings: BookingService::new(repos.bookings),
            tokens,
        }
    }
}
