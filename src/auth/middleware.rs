// Authentication middleware for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::warn;

use crate::auth::{error::AuthError, token::TokenService};

/// Authenticated user extractor for protected routes.
///
/// Rejects the request before the handler runs when the Authorization
/// header is absent or the bearer token does not verify. The TokenService
/// comes from router state, not from the environment.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| {
                warn!(
                    "Missing Authorization header in request to protected endpoint: {}",
                    parts.uri.path()
                );
                AuthError::MissingToken
            })?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let token_service = Arc::<TokenService>::from_ref(state);
        let claims = token_service.verify(token)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use proptest::prelude::*;

    use crate::auth::token::Claims;

    // Helper to create test parts with Authorization header
    fn create_parts_with_auth(auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    // Helper to create test parts without Authorization header
    fn create_parts_without_auth() -> Parts {
        let req = Request::builder().uri("/").body(()).unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    // Helper to create a test token service as router state
    fn test_state() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            "test_secret_key_for_testing_purposes".to_string(),
        ))
    }

    #[tokio::test]
    async fn test_valid_token_is_accepted() {
        let state = test_state();
        let token = state.issue(42, "alice").unwrap();
        let auth_header = format!("Bearer {}", token);

        let mut parts = create_parts_with_auth(&auth_header);
        let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

        assert!(result.is_ok());
        let user = result.unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_missing_authorization_header() {
        let state = test_state();
        let mut parts = create_parts_without_auth();

        let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AuthError::MissingToken));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let state = test_state();

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "alice".to_string(),
            iat: now - 90_000,
            exp: now - 3_600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        let auth_header = format!("Bearer {}", token);
        let mut parts = create_parts_with_auth(&auth_header);

        let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AuthError::ExpiredToken));
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected() {
        let state = test_state();

        let malformed_tokens = vec![
            "Bearer invalid_token",
            "Bearer not.a.valid.jwt",
            "Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature",
        ];

        for token in malformed_tokens {
            let mut parts = create_parts_with_auth(token);
            let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

            assert!(result.is_err());
        }
    }

    #[tokio::test]
    async fn test_invalid_bearer_format() {
        let state = test_state();

        let invalid_formats = vec![
            "InvalidFormat token",
            "token_without_bearer",
            "Basic dXNlcjpwYXNz",
        ];

        for auth_value in invalid_formats {
            let mut parts = create_parts_with_auth(auth_value);
            let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

            assert!(result.is_err());
        }
    }

    proptest! {
        #[test]
        fn prop_garbage_bearer_tokens_rejected(
            garbage in "[a-zA-Z0-9]{10,50}"
        ) {
            let state = test_state();
            let auth_header = format!("Bearer {}", garbage);
            let mut parts = create_parts_with_auth(&auth_header);

            let rt = tokio::runtime::Runtime::new().unwrap();
            let result = rt.block_on(AuthenticatedUser::from_request_parts(&mut parts, &state));

            prop_assert!(result.is_err());
        }
    }
}
