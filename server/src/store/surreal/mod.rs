//! Document backend on SurrealDB. Records are keyed by the entity id, so
//! `users:<user_id>` holds the user with that id.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;

use super::{with_timeout, Repositories, StoreError, StoreResult};
use crate::config::DatabaseConfig;

mod animals;
mod bookings;
mod show_rounds;
mod stages;
mod users;

pub use animals::SurrealAnimalRepository;
pub use bookings::SurrealBookingRepository;
pub use show_rounds::SurrealShowRoundRepository;
pub use stages::SurrealStageRepository;
pub use users::SurrealUserRepository;

pub(crate) const USERNAME_INDEX: &str = "users_username";
pub(crate) const ROUND_SEAT_INDEX: &str = "bookings_round_seat";

const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS users SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS animals SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS performance_stages SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS show_rounds SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS bookings SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS users_username ON TABLE users FIELDS username UNIQUE;
    DEFINE INDEX IF NOT EXISTS users_role ON TABLE users FIELDS role;
    DEFINE INDEX IF NOT EXISTS bookings_user ON TABLE bookings FIELDS user_id;
    DEFINE INDEX IF NOT EXISTS bookings_round_seat ON TABLE bookings FIELDS round_id, seat_number UNIQUE;
";

pub async fn connect(config: &DatabaseConfig) -> StoreResult<Surreal<Any>> {
    let endpoint = endpoint(config);
    let db = surrealdb::engine::any::connect(endpoint.as_str()).await?;

    if !config.username.is_empty() {
        db.signin(Root {
            username: &config.username,
            password: &config.password,
        })
        .await?;
    }

    db.use_ns(&config.namespace).use_db(&config.name).await?;
    db.query(SCHEMA).await?.check()?;

    tracing::info!(
        namespace = %config.namespace,
        database = %config.name,
        "Connected to SurrealDB"
    );

    Ok(db)
}

fn endpoint(config: &DatabaseConfig) -> String {
    if let Some(url) = &config.url {
        return url.clone();
    }

    let scheme = if config.ssl_mode.eq_ignore_ascii_case("disable") {
        "ws"
    } else {
        "wss"
    };
    format!("{}://{}:{}", scheme, config.host, config.port)
}

pub fn repositories(db: Surreal<Any>, timeout: Duration) -> Repositories {
    Repositories {
        users: Arc::new(SurrealUserRepository::new(db.clone(), timeout)),
        animals: Arc::new(SurrealAnimalRepository::new(db.clone(), timeout)),
        stages: Arc::new(SurrealStageRepository::new(db.clone(), timeout)),
        show_rounds: Arc::new(SurrealShowRoundRepository::new(db.clone(), timeout)),
        bookings: Arc::new(SurrealBookingRepository::new(db, timeout)),
    }
}

/// Swaps a unique-index failure on `index` for a domain error.
pub(crate) fn on_index(
    err: StoreError,
    index: &str,
    replace: impl FnOnce() -> StoreError,
) -> StoreError {
    match err {
        StoreError::Database(msg) if msg.contains(index) => replace(),
        other => other,
    }
}

/// Generic CRUD over one table, shared by every entity repository.
///
/// Reads project the record key back under `key`, e.g. `animal_id`.
#[derive(Clone)]
pub(crate) struct SurrealTable {
    db: Surreal<Any>,
    timeout: Duration,
    name: &'static str,
    key: &'static str,
    entity: &'static str,
}

impl SurrealTable {
    pub fn new(
        db: Surreal<Any>,
        timeout: Duration,
        name: &'static str,
        key: &'static str,
        entity: &'static str,
    ) -> Self {
        Self {
            db,
            timeout,
            name,
            key,
            entity,
        }
    }

    pub async fn insert<T, C>(&self, id: String, content: C) -> StoreResult<T>
    where
        T: DeserializeOwned + Send,
        C: Serialize + Send + 'static,
    {
        with_timeout(self.timeout, async {
            self.db
                .query("CREATE type::thing($tb, $id) CONTENT $data RETURN NONE")
                .bind(("tb", self.name))
                .bind(("id", id.clone()))
                .bind(("data", content))
                .await?
                .check()?;
            self.select_one(&id).await
        })
        .await
    }

    pub async fn fetch<T>(&self, id: &str) -> StoreResult<T>
    where
        T: DeserializeOwned + Send,
    {
        with_timeout(self.timeout, self.select_one(id)).await
    }

    /// Lists the table, optionally keeping rows where `field = value`.
    pub async fn fetch_all<T>(
        &self,
        filter: Option<(&'static str, String)>,
        order_by: &'static str,
    ) -> StoreResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        with_timeout(self.timeout, async {
            let mut sql = format!("SELECT *, meta::id(id) AS {} FROM type::table($tb)", self.key);
            if let Some((field, _)) = &filter {
                sql.push_str(&format!(" WHERE {} = $value", field));
            }
            sql.push_str(&format!(" ORDER BY {}", order_by));

            let mut query = self.db.query(sql).bind(("tb", self.name));
            if let Some((_, value)) = filter {
                query = query.bind(("value", value));
            }

            let rows: Vec<T> = query.await?.take(0)?;
            Ok::<_, StoreError>(rows)
        })
        .await
    }

    /// Overwrites only the fields present in `changes`.
    pub async fn merge<T, C>(&self, id: &str, changes: C) -> StoreResult<T>
    where
        T: DeserializeOwned + Send,
        C: Serialize + Send + 'static,
    {
        with_timeout(self.timeout, async {
            // UPDATE on a missing record would create it
            self.ensure_exists(id).await?;
            self.db
                .query("UPDATE type::thing($tb, $id) MERGE $data RETURN NONE")
                .bind(("tb", self.name))
                .bind(("id", id.to_string()))
                .bind(("data", changes))
                .await?
                .check()?;
            self.select_one(id).await
        })
        .await
    }

    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        with_timeout(self.timeout, async {
            self.ensure_exists(id).await?;
            self.db
                .query("DELETE type::thing($tb, $id)")
                .bind(("tb", self.name))
                .bind(("id", id.to_string()))
                .await?
                .check()?;
            Ok::<_, StoreError>(())
        })
        .await
    }

    async fn select_one<T>(&self, id: &str) -> StoreResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let sql = format!("SELECT *, meta::id(id) AS {} FROM type::thing($tb, $id)", self.key);
        let rows: Vec<T> = self
            .db
            .query(sql)
            .bind(("tb", self.name))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;

        rows.into_iter()
            .next()
            .ok_or(StoreError::NotFound(self.entity))
    }

    async fn ensure_exists(&self, id: &str) -> StoreResult<()> {
        let keys: Vec<String> = self
            .db
            .query("SELECT VALUE meta::id(id) FROM type::thing($tb, $id)")
            .bind(("tb", self.name))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;

        if keys.is_empty() {
            return Err(StoreError::NotFound(self.entity));
        }
        Ok(())
    }
}
