use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{ensure_deleted, timed, timed_write};
use crate::models::{User, UserRecord, UserUpdate};
use crate::store::{new_id, StoreError, StoreResult, UserRepository};

const USERNAME_UNIQUE: &str = "users_username_unique";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

fn username_taken(username: &str) -> impl FnOnce(&str) -> StoreError + '_ {
    move |constraint| {
        if constraint == USERNAME_UNIQUE {
            StoreError::Duplicate(format!("username '{}' is already taken", username))
        } else {
            StoreError::Duplicate(format!("unique constraint {} violated", constraint))
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, record: UserRecord) -> StoreResult<User> {
        let query = sqlx::query_as::<_, User>(
            "INSERT INTO users (user_id, username, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(new_id())
        .bind(&record.username)
        .bind(&record.password_hash)
        .bind(&record.role)
        .fetch_one(&self.pool);

        timed_write(self.timeout, query, username_taken(&record.username)).await
    }

    async fn get(&self, id: &str) -> StoreResult<User> {
        let query = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.pool);

        timed(self.timeout, query)
            .await?
            .ok_or(StoreError::NotFound("User"))
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let query = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool);

        timed(self.timeout, query).await
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let query = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username")
            .fetch_all(&self.pool);

        timed(self.timeout, query).await
    }

    async fn list_by_role(&self, role: &str) -> StoreResult<Vec<User>> {
        let query =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = $1 ORDER BY username")
                .bind(role)
                .fetch_all(&self.pool);

        timed(self.timeout, query).await
    }

    async fn update(&self, id: &str, changes: UserUpdate) -> StoreResult<User> {
        let username = changes.username.clone().unwrap_or_default();
        let query = sqlx::query_as::<_, User>(
            "UPDATE users SET \
                username = COALESCE($2, username), \
                password_hash = COALESCE($3, password_hash), \
                role = COALESCE($4, role) \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.username)
        .bind(changes.password_hash)
        .bind(changes.role)
        .fetch_optional(&self.pool);

        timed_write(self.timeout, query, username_taken(&username))
            .await?
            .ok_or(StoreError::NotFound("User"))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let query = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = timed(self.timeout, query).await?;
        ensure_deleted(result.rows_affected(), "User")
    }
}
