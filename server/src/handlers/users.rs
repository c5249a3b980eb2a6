use axum::extract::{Path, State};
use axum::response::Response;

use crate::models::{RegisterRequest, UserChanges};
use crate::services::UserService;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::response::{created, deleted, ok};

pub async fn list_users(State(service): State<UserService>) -> Result<Response, AppError> {
    Ok(ok(service.list().await?))
}

pub async fn register_user(
    State(service): State<UserService>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<Response, AppError> {
    Ok(created(service.register(request).await?))
}

pub async fn get_user(
    State(service): State<UserService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    Ok(ok(service.get(&id).await?))
}

pub async fn users_by_role(
    State(service): State<UserService>,
    Path(role): Path<String>,
) -> Result<Response, AppError> {
    Ok(ok(service.by_role(&role).await?))
}

pub async fn update_user(
    State(service): State<UserService>,
    Path(id): Path<String>,
    AppJson(changes): AppJson<UserChanges>,
) -> Result<Response, AppError> {
    Ok(ok(service.update(&id, changes).await?))
}

pub async fn delete_user(
    State(service): State<UserService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    service.delete(&id).await?;
    Ok(deleted("User"))
}
