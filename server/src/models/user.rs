use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Booking;

pub const DEFAULT_ROLE: &str = "user";

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(rename = "user_id")]
    #[sqlx(rename = "user_id")]
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    #[sqlx(skip)]
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

/// What the stores persist for a new user.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// Update body accepted over HTTP; `password` is plain text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Store-level partial update, produced from [`UserChanges`] after hashing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
