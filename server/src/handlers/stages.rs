use axum::extract::{Path, State};
use axum::response::Response;

use crate::models::{NewStage, StageChanges};
use crate::services::StageService;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::response::{created, deleted, ok};

pub async fn list_stages(State(service): State<StageService>) -> Result<Response, AppError> {
    Ok(ok(service.list().await?))
}

pub async fn create_stage(
    State(service): State<StageService>,
    AppJson(stage): AppJson<NewStage>,
) -> Result<Response, AppError> {
    Ok(created(service.create(stage).await?))
}

pub async fn get_stage(
    State(service): State<StageService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    Ok(ok(service.get(&id).await?))
}

pub async fn update_stage(
    State(service): State<StageService>,
    Path(id): Path<String>,
    AppJson(changes): AppJson<StageChanges>,
) -> Result<Response, AppError> {
    Ok(ok(service.update(&id, changes).await?))
}

pub async fn delete_stage(
    State(service): State<StageService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    service.delete(&id).await?;
    Ok(deleted("Stage"))
}
