use std::time::Duration;

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;

use super::{on_index, SurrealTable, ROUND_SEAT_INDEX};
use crate::models::{Booking, BookingChanges, NewBooking};
use crate::store::{new_id, BookingRepository, StoreError, StoreResult};

const ORDER: &str = "round_id, seat_number";

#[derive(Clone)]
pub struct SurrealBookingRepository {
    table: SurrealTable,
}

impl SurrealBookingRepository {
    pub fn new(db: Surreal<Any>, timeout: Duration) -> Self {
        Self {
            table: SurrealTable::new(db, timeout, "bookings", "booking_id", "Booking"),
        }
    }
}

#[async_trait]
impl BookingRepository for SurrealBookingRepository {
    async fn create(&self, booking: NewBooking) -> StoreResult<Booking> {
        let seat_number = booking.seat_number;
        self.table
            .insert(new_id(), booking)
            .await
            .map_err(|err| on_index(err, ROUND_SEAT_INDEX, || StoreError::SeatTaken(seat_number)))
    }

    async fn get(&self, id: &str) -> StoreResult<Booking> {
        self.table.fetch(id).await
    }

    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<Booking>> {
        self.table
            .fetch_all(Some(("user_id", user_id.to_string())), ORDER)
            .await
    }

    async fn list_by_round(&self, round_id: &str) -> StoreResult<Vec<Booking>> {
        self.table
            .fetch_all(Some(("round_id", round_id.to_string())), ORDER)
            .await
    }

    async fn update(&self, id: &str, changes: BookingChanges) -> StoreResult<Booking> {
        let seat_number = changes.seat_number.unwrap_or_default();
        self.table
            .merge(id, changes)
            .await
            .map_err(|err| on_index(err, ROUND_SEAT_INDEX, || StoreError::SeatTaken(seat_number)))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.table.remove(id).await
    }
}
