use super::{ServiceError, ServiceResult, UserService};
use crate::auth::{TokenIssuer, TokenKind};
use crate::models::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, TokenPair};

/// Register, login and refresh. Sessions are not stored anywhere; the token
/// pair is the whole session.
#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: UserService, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let user = self.users.register(request).await?;
        let tokens = self.tokens.issue_pair(&user)?;
        Ok(AuthResponse { user, tokens })
    }

    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %request.username, "Login for unknown user");
                ServiceError::UnknownUser
            })?;

        if !self.users.verify_password(&user, request.password).await {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(ServiceError::InvalidPassword);
        }

        let tokens = self.tokens.issue_pair(&user)?;
        Ok(AuthResponse { user, tokens })
    }

    /// Issues a fresh access token; the refresh token is handed back unchanged.
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<TokenPair> {
        let claims = self.tokens.verify_refresh(&request.refresh_token)?;
        let user = self
            .users
            .find_by_id(&claims.user_id)
            .await
            .map_err(|err| match err {
                ServiceError::NotFound(_) => ServiceError::UnknownUser,
                other => other,
            })?;

        Ok(TokenPair {
            access_token: self.tokens.issue(&user, TokenKind::Access)?,
            refresh_token: request.refresh_token,
        })
    }
}
