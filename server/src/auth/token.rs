use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{TokenPair, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Payload carried by every token. Times are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub username: String,
    pub role: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid claims")]
    InvalidClaims,

    #[error("not an access token")]
    NotAccessToken,

    #[error("not a refresh token")]
    NotRefreshToken,

    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// Issues and checks HS256 tokens. Nothing is stored, so a token stays valid
/// until its `exp` no matter how often it is used.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expired means now > exp, with no grace period
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn issue(&self, user: &User, kind: TokenKind) -> Result<String, TokenError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let now = Utc::now();

        let claims = Claims {
            user_id: user.id.clone(),
            username: user.username.clone(),
            role: user.role.clone(),
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(user, TokenKind::Access)?,
            refresh_token: self.issue(user, TokenKind::Refresh)?,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    TokenError::InvalidClaims
                }
                _ => TokenError::InvalidToken,
            })
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Access {
            return Err(TokenError::NotAccessToken);
        }
        Ok(claims)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(TokenError::NotRefreshToken);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Duration::minutes(15), Duration::days(7))
    }

    fn alice() -> User {
        User {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            password_hash: String::new(),
            role: "admin".to_string(),
            bookings: vec![],
        }
    }

    #[test]
    fn test_issue_then_verify_round_trips_claims() {
        let token = issuer().issue(&alice(), TokenKind::Access).unwrap();
        let claims = issuer().verify(&token).unwrap();

        assert_eq!(claims.user_id, "u-1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_pair_carries_independent_kinds() {
        let pair = issuer().issue_pair(&alice()).unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);

        let access = issuer().verify_access(&pair.access_token).unwrap();
        let refresh = issuer().verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(access.kind, TokenKind::Access);
        assert_eq!(refresh.kind, TokenKind::Refresh);
        assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token() {
        let stale = TokenIssuer::new(SECRET, Duration::seconds(-30), Duration::days(7));
        let token = stale.issue(&alice(), TokenKind::Access).unwrap();

        assert!(matches!(issuer().verify(&token), Err(TokenError::ExpiredToken)));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let other = TokenIssuer::new("other-secret", Duration::minutes(15), Duration::days(7));
        let token = other.issue(&alice(), TokenKind::Access).unwrap();

        assert!(matches!(issuer().verify(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        assert!(matches!(
            issuer().verify("not.a.token"),
            Err(TokenError::InvalidToken)
        ));
        assert!(matches!(issuer().verify(""), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_kind_mismatch() {
        let pair = issuer().issue_pair(&alice()).unwrap();

        assert!(matches!(
            issuer().verify_access(&pair.refresh_token),
            Err(TokenError::NotAccessToken)
        ));
        assert!(matches!(
            issuer().verify_refresh(&pair.access_token),
            Err(TokenError::NotRefreshToken)
        ));
    }

    #[test]
    fn test_wrongly_typed_claims() {
        let now = Utc::now().timestamp();
        let payload = serde_json::json!({
            "user_id": 42,
            "username": "alice",
            "role": "user",
            "type": "access",
            "iat": now,
            "exp": now + 60,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(issuer().verify(&token), Err(TokenError::InvalidClaims)));
    }

    #[test]
    fn test_unknown_kind_tag_is_invalid_claims() {
        let now = Utc::now().timestamp();
        let payload = serde_json::json!({
            "user_id": "u-1",
            "username": "alice",
            "role": "user",
            "type": "session",
            "iat": now,
            "exp": now + 60,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(issuer().verify(&token), Err(TokenError::InvalidClaims)));
    }
}
