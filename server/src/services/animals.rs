use std::sync::Arc;

use serde::Serialize;

use super::{ServiceError, ServiceResult};
use crate::models::{Animal, AnimalChanges, NewAnimal, ShowRound};
use crate::store::{AnimalRepository, ShowRoundRepository};

pub const PERFORMING: &str = "performing";

/// An animal on stage for one of its rounds.
#[derive(Debug, Clone, Serialize)]
pub struct Performance {
    pub show_round: ShowRound,
    pub animal: Animal,
    pub status: &'static str,
}

#[derive(Clone)]
pub struct AnimalService {
    animals: Arc<dyn AnimalRepository>,
    show_rounds: Arc<dyn ShowRoundRepository>,
}

impl AnimalService {
    pub fn new(
        animals: Arc<dyn AnimalRepository>,
        show_rounds: Arc<dyn ShowRoundRepository>,
    ) -> Self {
        Self {
            animals,
            show_rounds,
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Animal>> {
        Ok(self.animals.list().await?)
    }

    pub async fn create(&self, animal: NewAnimal) -> ServiceResult<Animal> {
        Ok(self.animals.create(animal).await?)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Animal> {
        Ok(self.animals.get(id).await?)
    }

    pub async fn update(&self, id: &str, changes: AnimalChanges) -> ServiceResult<Animal> {
        Ok(self.animals.update(id, changes).await?)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        Ok(self.animals.delete(id).await?)
    }

    pub async fn perform_show(&self, animal_id: &str, round_id: &str) -> ServiceResult<Performance> {
        let animal = self.animals.get(animal_id).await?;
        let show_round = self.show_rounds.get(round_id).await?;

        if show_round.animal_id != animal.id {
            return Err(ServiceError::Validation(
                "This animal is not assigned to this show round".to_string(),
            ));
        }

        tracing::info!(animal_id = %animal.id, round_id = %show_round.id, "Animal is performing");

        Ok(Performance {
            show_round,
            animal,
            status: PERFORMING,
        })
    }
}
