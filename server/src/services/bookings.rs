use std::sync::Arc;

use super::{ServiceError, ServiceResult};
use crate::models::{Booking, BookingChanges, NewBooking};
use crate::store::BookingRepository;

/// Fails when any booking other than `exclude` already holds `seat_number`.
///
/// `bookings` must all belong to the round being checked.
pub fn ensure_seat_available(
    bookings: &[Booking],
    seat_number: i32,
    exclude: Option<&str>,
) -> ServiceResult<()> {
    let taken = bookings
        .iter()
        .filter(|booking| Some(booking.id.as_str()) != exclude)
        .any(|booking| booking.seat_number == seat_number);

    if taken {
        return Err(ServiceError::SeatTaken(seat_number));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    /// The store's unique (round, seat) constraint still catches a writer that
    /// slips in between this check and the insert.
    pub async fn check_seat_availability(
        &self,
        round_id: &str,
        seat_number: i32,
        exclude: Option<&str>,
    ) -> ServiceResult<()> {
        let bookings = self.bookings.list_by_round(round_id).await?;
        ensure_seat_available(&bookings, seat_number, exclude).map_err(|err| {
            tracing::warn!(round_id, seat_number, "Seat already booked");
            err
        })
    }

    pub async fn create(&self, booking: NewBooking) -> ServiceResult<Booking> {
        self.check_seat_availability(&booking.round_id, booking.seat_number, None)
            .await?;
        Ok(self.bookings.create(booking).await?)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Booking> {
        Ok(self.bookings.get(id).await?)
    }

    pub async fn by_user(&self, user_id: &str) -> ServiceResult<Vec<Booking>> {
        Ok(self.bookings.list_by_user(user_id).await?)
    }

    pub async fn by_round(&self, round_id: &str) -> ServiceResult<Vec<Booking>> {
        Ok(self.bookings.list_by_round(round_id).await?)
    }

    /// Re-checks the seat the booking would end up in, ignoring the booking itself.
    pub async fn update(&self, id: &str, mut changes: BookingChanges) -> ServiceResult<Booking> {
        let existing = self.bookings.get(id).await?;

        let round_id = changes
            .round_id
            .take()
            .unwrap_or_else(|| existing.round_id.clone());
        let seat_number = changes.seat_number.unwrap_or(existing.seat_number);

        self.check_seat_availability(&round_id, seat_number, Some(&existing.id))
            .await?;

        changes.round_id = Some(round_id);
        changes.seat_number = Some(seat_number);
        Ok(self.bookings.update(id, changes).await?)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        Ok(self.bookings.delete(id).await?)
    }
}
