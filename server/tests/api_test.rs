use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use liongate_server::config::Config;
use liongate_server::routes::create_routes;
use liongate_server::state::AppState;
use liongate_server::store;

async fn app() -> Router {
    let config = Config::from_lookup(|key: &str| match key {
        "JWT_SECRET" => Some("api-test-secret".to_string()),
        "DB_TYPE" => Some("surrealdb".to_string()),
        "DATABASE_URL" => Some("mem://".to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .unwrap();

    let repos = store::connect(&config.database).await.unwrap();
    create_routes(AppState::new(repos, &config.auth), &config.server)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with(app, method, uri, body, None).await
}

async fn send_with(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_animal_crud() {
    let app = app().await;

    let (status, animal) = send(
        &app,
        Method::POST,
        "/api/v1/animals/",
        Some(json!({"name": "Leo", "species": "Lion", "type": "mammal", "show_duration": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(animal["type"], "mammal");
    let id = animal["animal_id"].as_str().unwrap().to_string();

    let (status, list) = send(&app, Method::GET, "/api/v1/animals/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/animals/{}", id),
        Some(json!({"show_duration": 35})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["show_duration"], 35);
    assert_eq!(updated["name"], "Leo");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/animals/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Animal deleted successfully"}));

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/animals/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Animal not found"}));
}

#[tokio::test]
async fn test_malformed_json_is_a_client_error() {
    let app = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/stages/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_double_booking_a_seat_fails() {
    let app = app().await;
    let booking = json!({"user_id": "U1", "round_id": "R1", "seat_number": 5, "price": "12.50"});

    let (status, first) = send(&app, Method::POST, "/api/v1/bookings", Some(booking.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["seat_number"], 5);

    let (status, body) = send(&app, Method::POST, "/api/v1/bookings", Some(booking)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("seat number 5 is already taken"));

    let (status, round) = send(&app, Method::GET, "/api/v1/bookings/round/R1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(round.as_array().unwrap().len(), 1);

    let id = first["booking_id"].as_str().unwrap();
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/bookings/{}", id),
        Some(json!({"seat_number": 5, "qr_code": "QR-5"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["qr_code"], "QR-5");
}

#[tokio::test]
async fn test_show_round_includes_its_bookings() {
    let app = app().await;

    let (status, round) = send(
        &app,
        Method::POST,
        "/api/v1/show-rounds/",
        Some(json!({"animal_id": "A1", "stage_id": "S1", "show_time": "2025-06-01T14:30:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let round_id = round["round_id"].as_str().unwrap().to_string();

    send(
        &app,
        Method::POST,
        "/api/v1/bookings",
        Some(json!({"user_id": "U1", "round_id": round_id, "seat_number": 1})),
    )
    .await;

    let (status, fetched) =
        send(&app, Method::GET, &format!("/api/v1/show-rounds/{}", round_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["bookings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_perform_show_checks_assignment() {
    let app = app().await;

    let (_, animal) = send(
        &app,
        Method::POST,
        "/api/v1/animals",
        Some(json!({"name": "Dumbo", "species": "Elephant", "type": "mammal", "show_duration": 15})),
    )
    .await;
    let animal_id = animal["animal_id"].as_str().unwrap().to_string();

    let (_, round) = send(
        &app,
        Method::POST,
        "/api/v1/show-rounds",
        Some(json!({"animal_id": animal_id, "stage_id": "S1", "show_time": "2025-06-01T10:00:00Z"})),
    )
    .await;
    let round_id = round["round_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/animals/{}/perform-show/{}", animal_id, round_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "performing");
    assert_eq!(body["animal"]["animal_id"], animal_id.as_str());

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/animals/{}/perform-show/{}", "someone-else", round_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Animal not found");
}

#[tokio::test]
async fn test_auth_flow() {
    let app = app().await;
    let credentials = json!({"username": "alice", "password": "secret1"});

    let (status, registered) =
        send(&app, Method::POST, "/api/v1/auth/register", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(registered["user"]["role"], "user");
    assert!(registered["user"].get("password_hash").is_none());

    let (status, session) =
        send(&app, Method::POST, "/api/v1/auth/login", Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    let access = session["tokens"]["access_token"].as_str().unwrap().to_string();
    let refresh = session["tokens"]["refresh_token"].as_str().unwrap().to_string();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({"username": "alice", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "invalid password");

    let (status, pair) = send(
        &app,
        Method::POST,
        "/api/v1/auth/refresh-token",
        Some(json!({"refresh_token": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pair["refresh_token"], refresh.as_str());

    let (status, claims) =
        send_with(&app, Method::GET, "/api/v1/auth/me", None, Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(claims["username"], "alice");
    assert_eq!(claims["type"], "access");

    let (status, body) =
        send_with(&app, Method::GET, "/api/v1/auth/me", None, Some(&refresh)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "not an access token");

    let (status, _) = send(&app, Method::GET, "/api/v1/auth/me", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_routes() {
    let app = app().await;

    let (status, user) = send(
        &app,
        Method::POST,
        "/api/v1/users/register",
        Some(json!({"username": "kim", "password": "secret1", "role": "keeper"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = user["user_id"].as_str().unwrap().to_string();

    let (status, keepers) = send(&app, Method::GET, "/api/v1/users/role/keeper", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(keepers.as_array().unwrap().len(), 1);

    let (status, all) = send(&app, Method::GET, "/api/v1/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, body) =
        send(&app, Method::DELETE, &format!("/api/v1/users/{}", user_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/users/{}", user_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
