use std::time::Duration;

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;

use super::SurrealTable;
use crate::models::{NewShowRound, ShowRound, ShowRoundChanges};
use crate::store::{new_id, ShowRoundRepository, StoreResult};

#[derive(Clone)]
pub struct SurrealShowRoundRepository {
    table: SurrealTable,
}

impl SurrealShowRoundRepository {
    pub fn new(db: Surreal<Any>, timeout: Duration) -> Self {
        Self {
            table: SurrealTable::new(db, timeout, "show_rounds", "round_id", "Show round"),
        }
    }
}

#[async_trait]
impl ShowRoundRepository for SurrealShowRoundRepository {
    async fn create(&self, round: NewShowRound) -> StoreResult<ShowRound> {
        self.table.insert(new_id(), round).await
    }

    async fn get(&self, id: &str) -> StoreResult<ShowRound> {
        self.table.fetch(id).await
    }

    async fn list(&self) -> StoreResult<Vec<ShowRound>> {
        self.table.fetch_all(None, "show_time").await
    }

    async fn update(&self, id: &str, changes: ShowRoundChanges) -> StoreResult<ShowRound> {
        self.table.merge(id, changes).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.table.remove(id).await
    }
}
