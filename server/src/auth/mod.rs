//! Credential hashing and signed session tokens.

pub mod extractor;
pub mod password;
pub mod token;

pub use extractor::AccessClaims;
pub use password::{PasswordError, PasswordHasher};
pub use token::{Claims, TokenError, TokenIssuer, TokenKind};
