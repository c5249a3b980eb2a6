use axum::extract::State;
use axum::response::Response;

use crate::auth::AccessClaims;
use crate::models::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::services::AuthService;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::response::ok;

pub async fn register(
    State(service): State<AuthService>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<Response, AppError> {
    Ok(ok(service.register(request).await?))
}

pub async fn login(
    State(service): State<AuthService>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Response, AppError> {
    Ok(ok(service.login(request).await?))
}

pub async fn refresh_token(
    State(service): State<AuthService>,
    AppJson(request): AppJson<RefreshTokenRequest>,
) -> Result<Response, AppError> {
    Ok(ok(service.refresh(request).await?))
}

/// Echoes the claims of the caller's access token.
pub async fn me(AccessClaims(claims): AccessClaims) -> Response {
    ok(claims)
}
