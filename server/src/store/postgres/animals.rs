use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ensure_deleted, timed};
use crate::models::{Animal, AnimalChanges, NewAnimal};
use crate::store::{new_id, AnimalRepository, StoreError, StoreResult};

#[derive(Clone)]
pub struct PgAnimalRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgAnimalRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl AnimalRepository for PgAnimalRepository {
    async fn create(&self, animal: NewAnimal) -> StoreResult<Animal> {
        let query = sqlx::query_as::<_, Animal>(
            "INSERT INTO animals (animal_id, name, species, animal_type, show_duration) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(new_id())
        .bind(animal.name)
        .bind(animal.species)
        .bind(animal.kind)
        .bind(animal.show_duration)
        .fetch_one(&self.pool);

        timed(self.timeout, query).await
    }

    async fn get(&self, id: &str) -> StoreResult<Animal> {
        let query = sqlx::query_as::<_, Animal>("SELECT * FROM animals WHERE animal_id = $1")
            .bind(id)
            .fetch_optional(&self.pool);

        timed(self.timeout, query)
            .await?
            .ok_or(StoreError::NotFound("Animal"))
    }

    async fn list(&self) -> StoreResult<Vec<Animal>> {
        let query = sqlx::query_as::<_, Animal>("SELECT * FROM animals ORDER BY name")
            .fetch_all(&self.pool);

        timed(self.timeout, query).await
    }

    async fn update(&self, id: &str, changes: AnimalChanges) -> StoreResult<Animal> {
        let query = sqlx::query_as::<_, Animal>(
            "UPDATE animals SET \
                name = COALESCE($2, name), \
                species = COALESCE($3, species), \
                animal_type = COALESCE($4, animal_type), \
                show_duration = COALESCE($5, show_duration) \
             WHERE animal_id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.species)
        .bind(changes.kind)
        .bind(changes.show_duration)
        .fetch_optional(&self.pool);

        timed(self.timeout, query)
            .await?
            .ok_or(StoreError::NotFound("Animal"))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let query = sqlx::query("DELETE FROM animals WHERE animal_id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = timed(self.timeout, query).await?;
        ensure_deleted(result.rows_affected(), "Animal")
    }
}
