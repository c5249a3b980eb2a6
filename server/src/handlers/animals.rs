use axum::extract::{Path, State};
use axum::response::Response;

use crate::models::{AnimalChanges, NewAnimal};
use crate::services::AnimalService;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::response::{created, deleted, ok};

pub async fn list_animals(State(service): State<AnimalService>) -> Result<Response, AppError> {
    Ok(ok(service.list().await?))
}

pub async fn create_animal(
    State(service): State<AnimalService>,
    AppJson(animal): AppJson<NewAnimal>,
) -> Result<Response, AppError> {
    Ok(created(service.create(animal).await?))
}

pub async fn get_animal(
    State(service): State<AnimalService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    Ok(ok(service.get(&id).await?))
}

pub async fn update_animal(
    State(service): State<AnimalService>,
    Path(id): Path<String>,
    AppJson(changes): AppJson<AnimalChanges>,
) -> Result<Response, AppError> {
    Ok(ok(service.update(&id, changes).await?))
}

pub async fn delete_animal(
    State(service): State<AnimalService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    service.delete(&id).await?;
    Ok(deleted("Animal"))
}

pub async fn perform_show(
    State(service): State<AnimalService>,
    Path((id, round_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    Ok(ok(service.perform_show(&id, &round_id).await?))
}
