use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A seat reserved by a user for one show round.
///
/// At most one booking exists per `(round_id, seat_number)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    #[serde(rename = "booking_id")]
    #[sqlx(rename = "booking_id")]
    pub id: String,
    pub user_id: String,
    pub round_id: String,
    pub seat_number: i32,
    pub price: Decimal,
    pub qr_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: String,
    pub round_id: String,
    pub seat_number: i32,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub qr_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}
