use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PerformanceStage {
    #[serde(rename = "stage_id")]
    #[sqlx(rename = "stage_id")]
    pub id: String,
    pub room_number: String,
    pub seat_capacity: i32,
    pub price_per_seat: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStage {
    pub room_number: String,
    #[serde(default)]
    pub seat_capacity: i32,
    #[serde(default)]
    pub price_per_seat: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_capacity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_seat: Option<Decimal>,
}
