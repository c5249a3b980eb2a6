use std::sync::Arc;

use super::ServiceResult;
use crate::models::{NewStage, PerformanceStage, StageChanges};
use crate::store::StageRepository;

#[derive(Clone)]
pub struct StageService {
    stages: Arc<dyn StageRepository>,
}

impl StageService {
    pub fn new(stages: Arc<dyn StageRepository>) -> Self {
        Self { stages }
    }

    pub async fn list(&self) -> ServiceResult<Vec<PerformanceStage>> {
        Ok(self.stages.list().await?)
    }

    pub async fn create(&self, stage: NewStage) -> ServiceResult<PerformanceStage> {
        Ok(self.stages.create(stage).await?)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<PerformanceStage> {
        Ok(self.stages.get(id).await?)
    }

    pub async fn update(&self, id: &str, changes: StageChanges) -> ServiceResult<PerformanceStage> {
        Ok(self.stages.update(id, changes).await?)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        Ok(self.stages.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::store::surreal::test_support::memory_repositories;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_stage_lifecycle() {
        let service = StageService::new(memory_repositories().await.stages);

        let stage = service
            .create(NewStage {
                room_number: "A-1".to_string(),
                seat_capacity: 120,
                price_per_seat: Decimal::new(2550, 2),
            })
            .await
            .unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);

        let updated = service
            .update(
                &stage.id,
                StageChanges {
                    seat_capacity: Some(80),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.seat_capacity, 80);
        assert_eq!(updated.price_per_seat, Decimal::new(2550, 2));

        service.delete(&stage.id).await.unwrap();
        let err = service.delete(&stage.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
