use std::sync::Arc;

use super::ServiceResult;
use crate::models::{NewShowRound, ShowRound, ShowRoundChanges};
use crate::store::{BookingRepository, ShowRoundRepository};

#[derive(Clone)]
pub struct ShowRoundService {
    show_rounds: Arc<dyn ShowRoundRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl ShowRoundService {
    pub fn new(
        show_rounds: Arc<dyn ShowRoundRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            show_rounds,
            bookings,
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<ShowRound>> {
        Ok(self.show_rounds.list().await?)
    }

    pub async fn create(&self, round: NewShowRound) -> ServiceResult<ShowRound> {
        Ok(self.show_rounds.create(round).await?)
    }

    /// Returns the round together with every booking made for it.
    pub async fn get(&self, id: &str) -> ServiceResult<ShowRound> {
        let mut round = self.show_rounds.get(id).await?;
        round.bookings = self.bookings.list_by_round(&round.id).await?;
        Ok(round)
    }

    pub async fn update(&self, id: &str, changes: ShowRoundChanges) -> ServiceResult<ShowRound> {
        Ok(self.show_rounds.update(id, changes).await?)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        Ok(self.show_rounds.delete(id).await?)
    }
}
