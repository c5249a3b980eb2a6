use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ensure_deleted, timed, timed_write};
use crate::models::{Booking, BookingChanges, NewBooking};
use crate::store::{new_id, BookingRepository, StoreError, StoreResult};

const ROUND_SEAT_UNIQUE: &str = "bookings_round_seat_unique";

#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

/// A concurrent writer won the seat between the service check and our insert.
fn seat_taken(seat_number: i32) -> impl FnOnce(&str) -> StoreError {
    move |constraint| {
        if constraint == ROUND_SEAT_UNIQUE {
            StoreError::SeatTaken(seat_number)
        } else {
            StoreError::Duplicate(format!("unique constraint {} violated", constraint))
        }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: NewBooking) -> StoreResult<Booking> {
        let seat_number = booking.seat_number;
        let query = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (booking_id, user_id, round_id, seat_number, price, qr_code) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(new_id())
        .bind(booking.user_id)
        .bind(booking.round_id)
        .bind(booking.seat_number)
        .bind(booking.price)
        .bind(booking.qr_code)
        .fetch_one(&self.pool);

        timed_write(self.timeout, query, seat_taken(seat_number)).await
    }

    async fn get(&self, id: &str) -> StoreResult<Booking> {
        let query = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_id = $1")
            .bind(id)
            .fetch_optional(&self.pool);

        timed(self.timeout, query)
            .await?
            .ok_or(StoreError::NotFound("Booking"))
    }

    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<Booking>> {
        let query = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY round_id, seat_number",
        )
        .bind(user_id)
        .fetch_all(&self.pool);

        timed(self.timeout, query).await
    }

    async fn list_by_round(&self, round_id: &str) -> StoreResult<Vec<Booking>> {
        let query = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE round_id = $1 ORDER BY seat_number",
        )
        .bind(round_id)
        .fetch_all(&self.pool);

        timed(self.timeout, query).await
    }

    async fn update(&self, id: &str, changes: BookingChanges) -> StoreResult<Booking> {
        let seat_number = changes.seat_number.unwrap_or_default();
        let query = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET \
                user_id = COALESCE($2, user_id), \
                round_id = COALESCE($3, round_id), \
                seat_number = COALESCE($4, seat_number), \
                price = COALESCE($5, price), \
                qr_code = COALESCE($6, qr_code) \
             WHERE booking_id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.user_id)
        .bind(changes.round_id)
        .bind(changes.seat_number)
        .bind(changes.price)
        .bind(changes.qr_code)
        .fetch_optional(&self.pool);

        timed_write(self.timeout, query, seat_taken(seat_number))
            .await?
            .ok_or(StoreError::NotFound("Booking"))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let query = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = timed(self.timeout, query).await?;
        ensure_deleted(result.rows_affected(), "Booking")
    }
}
