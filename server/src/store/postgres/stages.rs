use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ensure_deleted, timed};
use crate::models::{NewStage, PerformanceStage, StageChanges};
use crate::store::{new_id, StageRepository, StoreError, StoreResult};

#[derive(Clone)]
pub struct PgStageRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgStageRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl StageRepository for PgStageRepository {
    async fn create(&self, stage: NewStage) -> StoreResult<PerformanceStage> {
        let query = sqlx::query_as::<_, PerformanceStage>(
            "INSERT INTO performance_stages (stage_id, room_number, seat_capacity, price_per_seat) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(new_id())
        .bind(stage.room_number)
        .bind(stage.seat_capacity)
        .bind(stage.price_per_seat)
        .fetch_one(&self.pool);

        timed(self.timeout, query).await
    }

    async fn get(&self, id: &str) -> StoreResult<PerformanceStage> {
        let query = sqlx::query_as::<_, PerformanceStage>(
            "SELECT * FROM performance_stages WHERE stage_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool);

        timed(self.timeout, query)
            .await?
            .ok_or(StoreError::NotFound("Performance stage"))
    }

    async fn list(&self) -> StoreResult<Vec<PerformanceStage>> {
        let query = sqlx::query_as::<_, PerformanceStage>(
            "SELECT * FROM performance_stages ORDER BY room_number",
        )
        .fetch_all(&self.pool);

        timed(self.timeout, query).await
    }

    async fn update(&self, id: &str, changes: StageChanges) -> StoreResult<PerformanceStage> {
        let query = sqlx::query_as::<_, PerformanceStage>(
            "UPDATE performance_stages SET \
                room_number = COALESCE($2, room_number), \
                seat_capacity = COALESCE($3, seat_capacity), \
                price_per_seat = COALESCE($4, price_per_seat) \
             WHERE stage_id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.room_number)
        .bind(changes.seat_capacity)
        .bind(changes.price_per_seat)
        .fetch_optional(&self.pool);

        timed(self.timeout, query)
            .await?
            .ok_or(StoreError::NotFound("Performance stage"))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let query = sqlx::query("DELETE FROM performance_stages WHERE stage_id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = timed(self.timeout, query).await?;
        ensure_deleted(result.rows_affected(), "Performance stage")
    }
}
