use std::time::Duration;

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;

use super::{on_index, SurrealTable, USERNAME_INDEX};
use crate::models::{User, UserRecord, UserUpdate};
use crate::store::{new_id, StoreError, StoreResult, UserRepository};

#[derive(Clone)]
pub struct SurrealUserRepository {
    table: SurrealTable,
}

impl SurrealUserRepository {
    pub fn new(db: Surreal<Any>, timeout: Duration) -> Self {
        Self {
            table: SurrealTable::new(db, timeout, "users", "user_id", "User"),
        }
    }
}

fn username_taken(username: &str) -> StoreError {
    StoreError::Duplicate(format!("username '{}' is already taken", username))
}

#[async_trait]
impl UserRepository for SurrealUserRepository {
    async fn create(&self, record: UserRecord) -> StoreResult<User> {
        let username = record.username.clone();
        self.table
            .insert(new_id(), record)
            .await
            .map_err(|err| on_index(err, USERNAME_INDEX, || username_taken(&username)))
    }

    async fn get(&self, id: &str) -> StoreResult<User> {
        self.table.fetch(id).await
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users: Vec<User> = self
            .table
            .fetch_all(Some(("username", username.to_string())), "username")
            .await?;
        Ok(users.into_iter().next())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        self.table.fetch_all(None, "username").await
    }

    async fn list_by_role(&self, role: &str) -> StoreResult<Vec<User>> {
        self.table
            .fetch_all(Some(("role", role.to_string())), "username")
            .await
    }

    async fn update(&self, id: &str, changes: UserUpdate) -> StoreResult<User> {
        let username = changes.username.clone().unwrap_or_default();
        self.table
            .merge(id, changes)
            .await
            .map_err(|err| on_index(err, USERNAME_INDEX, || username_taken(&username)))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.table.remove(id).await
    }
}
