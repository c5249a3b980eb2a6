use axum::response::Response;
use serde::Serialize;

use crate::utils::response::ok;

pub mod animals;
pub mod auth;
pub mod bookings;
pub mod show_rounds;
pub mod stages;
pub mod users;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "liongate-api",
    };

    ok(payload)
}
