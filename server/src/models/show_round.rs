use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Booking;

/// One scheduled performance of an animal on a stage.
///
/// `animal_id` and `stage_id` are plain references; nothing checks them on
/// write. `bookings` is only filled when a single round is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ShowRound {
    #[serde(rename = "round_id")]
    #[sqlx(rename = "round_id")]
    pub id: String,
    pub animal_id: String,
    pub stage_id: String,
    pub show_time: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShowRound {
    pub animal_id: String,
    pub stage_id: String,
    pub show_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowRoundChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_time: Option<DateTime<Utc>>,
}
