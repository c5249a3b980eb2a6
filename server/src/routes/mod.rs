use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, ServerConfig};
use crate::handlers::{animals, auth, bookings, health_check, show_rounds, stages, users};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(animal_routes())
        .merge(stage_routes())
        .merge(show_round_routes())
        .merge(booking_routes())
        .merge(user_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(config.include_hsts))
        .layer(create_cors_layer(&config.cors_origins))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh-token", post(auth::refresh_token))
        .route("/api/v1/auth/me", get(auth::me))
}

// Collections answer with and without the trailing slash.

fn animal_routes() -> Router<AppState> {
    let collection = get(animals::list_animals).post(animals::create_animal);

    Router::new()
        .route("/api/v1/animals", collection.clone())
        .route("/api/v1/animals/", collection)
        .route(
            "/api/v1/animals/:id",
            get(animals::get_animal)
                .put(animals::update_animal)
                .delete(animals::delete_animal),
        )
        .route(
            "/api/v1/animals/:id/perform-show/:round_id",
            post(animals::perform_show),
        )
}

fn stage_routes() -> Router<AppState> {
    let collection = get(stages::list_stages).post(stages::create_stage);

    Router::new()
        .route("/api/v1/stages", collection.clone())
        .route("/api/v1/stages/", collection)
        .route(
            "/api/v1/stages/:id",
            get(stages::get_stage)
                .put(stages::update_stage)
                .delete(stages::delete_stage),
        )
}

fn show_round_routes() -> Router<AppState> {
    let collection = get(show_rounds::list_show_rounds).post(show_rounds::create_show_round);

    Router::new()
        .route("/api/v1/show-rounds", collection.clone())
        .route("/api/v1/show-rounds/", collection)
        .route(
            "/api/v1/show-rounds/:id",
            get(show_rounds::get_show_round)
                .put(show_rounds::update_show_round)
                .delete(show_rounds::delete_show_round),
        )
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/bookings", post(bookings::create_booking))
        .route("/api/v1/bookings/", post(bookings::create_booking))
        .route(
            "/api/v1/bookings/:id",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        .route("/api/v1/bookings/user/:user_id", get(bookings::bookings_by_user))
        .route("/api/v1/bookings/round/:round_id", get(bookings::bookings_by_round))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/users", get(users::list_users))
        .route("/api/v1/users/", get(users::list_users))
        .route("/api/v1/users/register", post(users::register_user))
        .route(
            "/api/v1/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/v1/users/role/:role", get(users::users_by_role))
}
