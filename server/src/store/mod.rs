//! Persistence seam. Every entity has a repository trait with one
//! implementation per backend; [`connect`] picks the backend from config.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{DatabaseConfig, DatabaseKind};
use crate::models::{
    Animal, AnimalChanges, Booking, BookingChanges, NewAnimal, NewBooking, NewShowRound,
    NewStage, PerformanceStage, ShowRound, ShowRoundChanges, StageChanges, User, UserRecord,
    UserUpdate,
};

pub mod postgres;
pub mod surreal;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("seat number {0} is already taken for this round")]
    SeatTaken(i32),

    #[error("{0}")]
    Duplicate(String),

    #[error("database operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Database(format!("migration failed: {}", err))
    }
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Bounds a single store call by the configured operation timeout.
pub async fn with_timeout<T, F>(limit: Duration, operation: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, record: UserRecord) -> StoreResult<User>;
    async fn get(&self, id: &str) -> StoreResult<User>;
    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn list(&self) -> StoreResult<Vec<User>>;
    async fn list_by_role(&self, role: &str) -> StoreResult<Vec<User>>;
    async fn update(&self, id: &str, changes: UserUpdate) -> StoreResult<User>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

#[async_trait]
pub trait AnimalRepository: Send + Sync {
    async fn create(&self, animal: NewAnimal) -> StoreResult<Animal>;
    async fn get(&self, id: &str) -> StoreResult<Animal>;
    async fn list(&self) -> StoreResult<Vec<Animal>>;
    async fn update(&self, id: &str, changes: AnimalChanges) -> StoreResult<Animal>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

#[async_trait]
pub trait StageRepository: Send + Sync {
    async fn create(&self, stage: NewStage) -> StoreResult<PerformanceStage>;
    async fn get(&self, id: &str) -> StoreResult<PerformanceStage>;
    async fn list(&self) -> StoreResult<Vec<PerformanceStage>>;
    async fn update(&self, id: &str, changes: StageChanges) -> StoreResult<PerformanceStage>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

#[async_trait]
pub trait ShowRoundRepository: Send + Sync {
    async fn create(&self, round: NewShowRound) -> StoreResult<ShowRound>;
    async fn get(&self, id: &str) -> StoreResult<ShowRound>;
    async fn list(&self) -> StoreResult<Vec<ShowRound>>;
    async fn update(&self, id: &str, changes: ShowRoundChanges) -> StoreResult<ShowRound>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: NewBooking) -> StoreResult<Booking>;
    async fn get(&self, id: &str) -> StoreResult<Booking>;
    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<Booking>>;
    async fn list_by_round(&self, round_id: &str) -> StoreResult<Vec<Booking>>;
    async fn update(&self, id: &str, changes: BookingChanges) -> StoreResult<Booking>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// One handle per entity, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub animals: Arc<dyn AnimalRepository>,
    pub stages: Arc<dyn StageRepository>,
    pub show_rounds: Arc<dyn ShowRoundRepository>,
    pub bookings: Arc<dyn BookingRepository>,
}

pub async fn connect(config: &DatabaseConfig) -> StoreResult<Repositories> {
    match config.kind {
        DatabaseKind::Postgres => {
            let pool = postgres::connect(config).await?;
            Ok(postgres::repositories(pool, config.operation_timeout))
        }
        DatabaseKind::Surreal => {
            let db = surreal::connect(config).await?;
            Ok(surreal::repositories(db, config.operation_timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let value = with_timeout(Duration::from_secs(1), async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);

        let err = with_timeout::<(), _>(Duration::from_secs(1), async {
            Err(StoreError::NotFound("Animal"))
        })
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Animal not found");
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let err = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::Timeout(_)));
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
