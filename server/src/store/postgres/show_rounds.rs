use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ensure_deleted, timed};
use crate::models::{NewShowRound, ShowRound, ShowRoundChanges};
use crate::store::{new_id, ShowRoundRepository, StoreError, StoreResult};

#[derive(Clone)]
pub struct PgShowRoundRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgShowRoundRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl ShowRoundRepository for PgShowRoundRepository {
    async fn create(&self, round: NewShowRound) -> StoreResult<ShowRound> {
        let query = sqlx::query_as::<_, ShowRound>(
            "INSERT INTO show_rounds (round_id, animal_id, stage_id, show_time) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(new_id())
        .bind(round.animal_id)
        .bind(round.stage_id)
        .bind(round.show_time)
        .fetch_one(&self.pool);

        timed(self.timeout, query).await
    }

    async fn get(&self, id: &str) -> StoreResult<ShowRound> {
        let query = sqlx::query_as::<_, ShowRound>("SELECT * FROM show_rounds WHERE round_id = $1")
            .bind(id)
            .fetch_optional(&self.pool);

        timed(self.timeout, query)
            .await?
            .ok_or(StoreError::NotFound("Show round"))
    }

    async fn list(&self) -> StoreResult<Vec<ShowRound>> {
        let query = sqlx::query_as::<_, ShowRound>("SELECT * FROM show_rounds ORDER BY show_time")
            .fetch_all(&self.pool);

        timed(self.timeout, query).await
    }

    async fn update(&self, id: &str, changes: ShowRoundChanges) -> StoreResult<ShowRound> {
        let query = sqlx::query_as::<_, ShowRound>(
            "UPDATE show_rounds SET \
                animal_id = COALESCE($2, animal_id), \
                stage_id = COALESCE($3, stage_id), \
                show_time = COALESCE($4, show_time) \
             WHERE round_id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.animal_id)
        .bind(changes.stage_id)
        .bind(changes.show_time)
        .fetch_optional(&self.pool);

        timed(self.timeout, query)
            .await?
            .ok_or(StoreError::NotFound("Show round"))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let query = sqlx::query("DELETE FROM show_rounds WHERE round_id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = timed(self.timeout, query).await?;
        ensure_deleted(result.rows_affected(), "Show round")
    }
}
