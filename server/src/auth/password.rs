use thiserror::Error;

/// bcrypt only looks at the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;
pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password must be at least 6 characters long")]
    TooShort,

    #[error("password is too long")]
    TooLong,

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Salted one-way hashing with a fixed bcrypt work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong);
        }

        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Never fails: a malformed digest is just a mismatch.
    pub fn verify(&self, digest: &str, password: &str) -> bool {
        bcrypt::verify(password, digest).unwrap_or(false)
    }

    /// Runs [`Self::hash`] on the blocking pool so bcrypt does not stall the runtime.
    pub async fn hash_detached(&self, password: String) -> Result<String, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password)).await?
    }

    pub async fn verify_detached(&self, digest: String, password: String) -> bool {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&digest, &password))
            .await
            .unwrap_or(false)
    }
}

pub fn check_strength(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(PasswordError::TooShort);
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_then_verify() {
        let digest = hasher().hash("secret1").unwrap();

        assert_ne!(digest, "secret1");
        assert!(hasher().verify(&digest, "secret1"));
        assert!(!hasher().verify(&digest, "secret2"));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hasher().hash("secret1").unwrap();
        let second = hasher().hash("secret1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_exactly_72_bytes_is_accepted() {
        let password = "a".repeat(MAX_PASSWORD_BYTES);
        let digest = hasher().hash(&password).unwrap();
        assert!(hasher().verify(&digest, &password));
    }

    #[test]
    fn test_too_long_password_is_rejected() {
        let password = "a".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(hasher().hash(&password), Err(PasswordError::TooLong)));
    }

    #[test]
    fn test_verify_against_garbage_digest_is_false() {
        assert!(!hasher().verify("not-a-bcrypt-digest", "secret1"));
    }

    #[test]
    fn test_strength_rules() {
        assert!(matches!(check_strength("abc"), Err(PasswordError::TooShort)));
        assert!(check_strength("abcdef").is_ok());
        // multibyte: 6 characters, 12 bytes
        assert!(check_strength("éééééé").is_ok());
        assert!(matches!(
            check_strength(&"a".repeat(73)),
            Err(PasswordError::TooLong)
        ));
    }

    #[tokio::test]
    async fn test_detached_variants() {
        let digest = hasher().hash_detached("secret1".to_string()).await.unwrap();
        assert!(
            hasher()
                .verify_detached(digest.clone(), "secret1".to_string())
                .await
        );
        assert!(!hasher().verify_detached(digest, "nope".to_string()).await);
    }
}
