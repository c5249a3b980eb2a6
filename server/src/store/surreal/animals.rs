use std::time::Duration;

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;

use super::SurrealTable;
use crate::models::{Animal, AnimalChanges, NewAnimal};
use crate::store::{new_id, AnimalRepository, StoreResult};

#[derive(Clone)]
pub struct SurrealAnimalRepository {
    table: SurrealTable,
}

impl SurrealAnimalRepository {
    pub fn new(db: Surreal<Any>, timeout: Duration) -> Self {
        Self {
            table: SurrealTable::new(db, timeout, "animals", "animal_id", "Animal"),
        }
    }
}

#[async_trait]
impl AnimalRepository for SurrealAnimalRepository {
    async fn create(&self, animal: NewAnimal) -> StoreResult<Animal> {
        self.table.insert(new_id(), animal).await
    }

    async fn get(&self, id: &str) -> StoreResult<Animal> {
        self.table.fetch(id).await
    }

    async fn list(&self) -> StoreResult<Vec<Animal>> {
        self.table.fetch_all(None, "name").await
    }

    async fn update(&self, id: &str, changes: AnimalChanges) -> StoreResult<Animal> {
        self.table.merge(id, changes).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.table.remove(id).await
    }
}
