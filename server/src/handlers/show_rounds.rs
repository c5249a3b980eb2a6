use axum::extract::{Path, State};
use axum::response::Response;

use crate::models::{NewShowRound, ShowRoundChanges};
use crate::services::ShowRoundService;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::response::{created, deleted, ok};

pub async fn list_show_rounds(
    State(service): State<ShowRoundService>,
) -> Result<Response, AppError> {
    Ok(ok(service.list().await?))
}

pub async fn create_show_round(
    State(service): State<ShowRoundService>,
    AppJson(round): AppJson<NewShowRound>,
) -> Result<Response, AppError> {
    Ok(created(service.create(round).await?))
}

pub async fn get_show_round(
    State(service): State<ShowRoundService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    Ok(ok(service.get(&id).await?))
}

pub async fn update_show_round(
    State(service): State<ShowRoundService>,
    Path(id): Path<String>,
    AppJson(changes): AppJson<ShowRoundChanges>,
) -> Result<Response, AppError> {
    Ok(ok(service.update(&id, changes).await?))
}

pub async fn delete_show_round(
    State(service): State<ShowRoundService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    service.delete(&id).await?;
    Ok(deleted("Show round"))
}
