use axum::extract::{Path, State};
use axum::response::Response;

use crate::models::{BookingChanges, NewBooking};
use crate::services::BookingService;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::response::{created, deleted, ok};

pub async fn create_booking(
    State(service): State<BookingService>,
    AppJson(booking): AppJson<NewBooking>,
) -> Result<Response, AppError> {
    Ok(created(service.create(booking).await?))
}

pub async fn get_booking(
    State(service): State<BookingService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    Ok(ok(service.get(&id).await?))
}

pub async fn bookings_by_user(
    State(service): State<BookingService>,
    Path(user_id): Path<String>,
) -> Result<Response, AppError> {
    Ok(ok(service.by_user(&user_id).await?))
}

pub async fn bookings_by_round(
    State(service): State<BookingService>,
    Path(round_id): Path<String>,
) -> Result<Response, AppError> {
    Ok(ok(service.by_round(&round_id).await?))
}

pub async fn update_booking(
    State(service): State<BookingService>,
    Path(id): Path<String>,
    AppJson(changes): AppJson<BookingChanges>,
) -> Result<Response, AppError> {
    Ok(ok(service.update(&id, changes).await?))
}

pub async fn delete_booking(
    State(service): State<BookingService>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    service.delete(&id).await?;
    Ok(deleted("Booking"))
}
