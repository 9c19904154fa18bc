// Authentication service - business logic layer

use std::sync::Arc;

use crate::auth::{
    error::AuthError,
    models::{LoginResponse, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};

/// Authentication service coordinating credential storage and token issuance
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(user_repo: UserRepository, token_service: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Register a new user with a freshly salted password hash
    pub async fn register(&self, username: &str, password: &str) -> Result<UserResponse, AuthError> {
        let password_hash = PasswordService::hash_password(password)?;
        let user = self.user_repo.create(username, &password_hash).await?;

        tracing::info!("Registered new user '{}' (id {})", user.username, user.id);
        Ok(user.into())
    }

    /// Authenticate a user and mint a session token.
    ///
    /// An unknown username and a wrong password both return
    /// `InvalidCredentials`; callers cannot tell which check failed.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.token_service.issue(user.id, &user.username)?;

        tracing::debug!("Issued session token for user '{}'", user.username);
        Ok(LoginResponse {
            token,
            username: user.username,
        })
    }
}
