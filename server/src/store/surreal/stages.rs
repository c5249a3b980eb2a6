use std::time::Duration;

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;

use super::SurrealTable;
use crate::models::{NewStage, PerformanceStage, StageChanges};
use crate::store::{new_id, StageRepository, StoreResult};

#[derive(Clone)]
pub struct SurrealStageRepository {
    table: SurrealTable,
}

impl SurrealStageRepository {
    pub fn new(db: Surreal<Any>, timeout: Duration) -> Self {
        Self {
            table: SurrealTable::new(
                db,
                timeout,
                "performance_stages",
                "stage_id",
                "Performance stage",
            ),
        }
    }
}

#[async_trait]
impl StageRepository for SurrealStageRepository {
    async fn create(&self, stage: NewStage) -> StoreResult<PerformanceStage> {
        self.table.insert(new_id(), stage).await
    }

    async fn get(&self, id: &str) -> StoreResult<PerformanceStage> {
        self.table.fetch(id).await
    }

    async fn list(&self) -> StoreResult<Vec<PerformanceStage>> {
        self.table.fetch_all(None, "room_number").await
    }

    async fn update(&self, id: &str, changes: StageChanges) -> StoreResult<PerformanceStage> {
        self.table.merge(id, changes).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.table.remove(id).await
    }
}
