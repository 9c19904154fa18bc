// JWT token generation and validation service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user id
    pub username: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Token service for JWT operations.
///
/// The signing secret is supplied at construction and never read from the
/// environment afterwards.
pub struct TokenService {
    secret: String,
    token_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService with the signing secret.
    /// Session tokens expire 24 hours (86400 seconds) after issuance.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            token_duration: 86_400,
        }
    }

    /// Issue a session token embedding the user's identity
    pub fn issue(&self, user_id: i32, username: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now,
            exp: now + self.token_duration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify a session token, checking signature integrity and expiry
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    #[test]
    fn test_token_expiration_is_24_hours() {
        let service = test_token_service();
        let token = service.issue(1, "alice").unwrap();
        let claims = service.verify(&token).unwrap();

        let duration = claims.exp - claims.iat;
        assert_eq!(duration, 86_400, "Session token should expire in exactly 24 hours");
    }

    #[test]
    fn test_token_claims_contain_user_identity() {
        let service = test_token_service();
        let token = service.issue(42, "bob").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "bob");
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.verify("").is_err());
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("invalid_token_format").is_err());
        assert!(service
            .verify("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_token_signature_verification() {
        let service1 = TokenService::new("secret1".to_string());
        let service2 = TokenService::new("secret2".to_string());

        let token = service1.issue(1, "alice").unwrap();

        assert!(service1.verify(&token).is_ok());
        assert!(matches!(
            service2.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_yields_expired_error() {
        let service = test_token_service();

        // Craft a token whose expiry is well past the default 60s leeway
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

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[test]
    fn test_tampering_any_character_invalidates_token() {
        let service = test_token_service();
        let token = service.issue(7, "mallory").unwrap();

        for (i, original) in token.char_indices() {
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(i..i + original.len_utf8(), &replacement.to_string());

            assert!(
                service.verify(&tampered).is_err(),
                "tampered token at position {} should never verify",
                i
            );
        }
    }

    proptest! {
        #[test]
        fn prop_issued_tokens_roundtrip_identity(
            user_id in 1i32..1000000,
            username in "[a-z][a-z0-9_]{2,15}"
        ) {
            let service = test_token_service();
            let token = service.issue(user_id, &username)?;
            let claims = service.verify(&token)?;

            prop_assert_eq!(claims.sub, user_id);
            prop_assert_eq!(claims.username, username);
            prop_assert_eq!(claims.exp - claims.iat, 86_400);
        }

        #[test]
        fn prop_random_strings_are_rejected(
            garbage in "[a-zA-Z0-9]{10,50}"
        ) {
            let service = test_token_service();
            prop_assert!(service.verify(&garbage).is_err());
        }
    }
}
