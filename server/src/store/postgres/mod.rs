//! Relational backend on PostgreSQL. The schema lives in `server/migrations`
//! and is applied on connect.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use super::{with_timeout, Repositories, StoreError, StoreResult};
use crate::config::DatabaseConfig;

mod animals;
mod bookings;
mod show_rounds;
mod stages;
mod users;

pub use animals::PgAnimalRepository;
pub use bookings::PgBookingRepository;
pub use show_rounds::PgShowRoundRepository;
pub use stages::PgStageRepository;
pub use users::PgUserRepository;

pub async fn connect(config: &DatabaseConfig) -> StoreResult<PgPool> {
    let options = match &config.url {
        Some(url) => PgConnectOptions::from_str(url)?,
        None => PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.name)
            .ssl_mode(PgSslMode::from_str(&config.ssl_mode)?),
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.operation_timeout)
        .connect_with(options)
        .await?;

    tracing::info!(
        host = %config.host,
        database = %config.name,
        "Connected to PostgreSQL"
    );

    sqlx::migrate!().run(&pool).await?;

    tracing::info!("Migrations run successfully");

    Ok(pool)
}

pub fn repositories(pool: PgPool, timeout: Duration) -> Repositories {
    Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone(), timeout)),
        animals: Arc::new(PgAnimalRepository::new(pool.clone(), timeout)),
        stages: Arc::new(PgStageRepository::new(pool.clone(), timeout)),
        show_rounds: Arc::new(PgShowRoundRepository::new(pool.clone(), timeout)),
        bookings: Arc::new(PgBookingRepository::new(pool, timeout)),
    }
}

/// Runs one query under the operation timeout.
async fn timed<T, F>(limit: Duration, query: F) -> StoreResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    with_timeout(limit, async move { query.await.map_err(StoreError::from) }).await
}

/// Like [`timed`], but lets the caller translate a unique violation using the
/// name of the constraint that fired.
async fn timed_write<T, F, U>(limit: Duration, query: F, on_unique: U) -> StoreResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
    U: FnOnce(&str) -> StoreError,
{
    with_timeout(limit, async move {
        query.await.map_err(|err| match unique_constraint(&err) {
            Some(constraint) => on_unique(&constraint),
            None => StoreError::from(err),
        })
    })
    .await
}

fn unique_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Some(db.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

fn ensure_deleted(rows_affected: u64, entity: &'static str) -> StoreResult<()> {
    if rows_affected == 0 {
        return Err(StoreError::NotFound(entity));
    }
    Ok(())
}
