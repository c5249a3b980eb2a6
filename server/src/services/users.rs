use std::sync::Arc;

use super::{ServiceError, ServiceResult};
use crate::auth::password::check_strength;
use crate::auth::PasswordHasher;
use crate::models::{RegisterRequest, User, UserChanges, UserRecord, UserUpdate, DEFAULT_ROLE};
use crate::store::{BookingRepository, UserRepository};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    bookings: Arc<dyn BookingRepository>,
    hasher: PasswordHasher,
    enforce_password_strength: bool,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        bookings: Arc<dyn BookingRepository>,
        hasher: PasswordHasher,
        enforce_password_strength: bool,
    ) -> Self {
        Self {
            users,
            bookings,
            hasher,
            enforce_password_strength,
        }
    }

    /// Stores a new account with a hashed password. Role falls back to `user`.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        if request.username.trim().is_empty() || request.password.is_empty() {
            return Err(ServiceError::Validation(
                "username and password are required".to_string(),
            ));
        }
        if self.enforce_password_strength {
            check_strength(&request.password)?;
        }

        let password_hash = self.hasher.hash_detached(request.password).await?;
        let role = request
            .role
            .filter(|role| !role.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        let user = self
            .users
            .create(UserRecord {
                username: request.username,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub async fn list(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users.list().await?)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<User> {
        let mut user = self.users.get(id).await?;
        user.bookings = self.bookings.list_by_user(&user.id).await?;
        Ok(user)
    }

    pub async fn by_role(&self, role: &str) -> ServiceResult<Vec<User>> {
        let mut users = self.users.list_by_role(role).await?;
        for user in &mut users {
            user.bookings = self.bookings.list_by_user(&user.id).await?;
        }
        Ok(users)
    }

    pub(crate) async fn find_by_username(&self, username: &str) -> ServiceResult<Option<User>> {
        Ok(self.users.get_by_username(username).await?)
    }

    pub(crate) async fn find_by_id(&self, id: &str) -> ServiceResult<User> {
        Ok(self.users.get(id).await?)
    }

    pub(crate) async fn verify_password(&self, user: &User, password: String) -> bool {
        self.hasher
            .verify_detached(user.password_hash.clone(), password)
            .await
    }

    /// A supplied password is hashed before it reaches the store.
    pub async fn update(&self, id: &str, changes: UserChanges) -> ServiceResult<User> {
        let password_hash = match changes.password {
            Some(password) if !password.is_empty() => {
                if self.enforce_password_strength {
                    check_strength(&password)?;
                }
                Some(self.hasher.hash_detached(password).await?)
            }
            _ => None,
        };

        let update = UserUpdate {
            username: changes.username,
            password_hash,
            role: changes.role,
        };
        Ok(self.users.update(id, update).await?)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        Ok(self.users.delete(id).await?)
    }
}
