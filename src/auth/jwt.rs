//! JWT Token Handler
//! Mints and validates HS256 session tokens

use crate::auth::errors::AuthError;
use crate::auth::models::{Account, Claims, IssuedToken};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::debug;
use uuid::Uuid;

/// JWT Handler for token operations
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key and 24-hour tokens
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(24))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Generate a JWT token for an account
    pub fn generate_token(&self, account: &Account) -> Result<IssuedToken> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .context("Invalid timestamp")?
            .timestamp();

        let claims = Claims {
            sub: account.id.to_string(),
            email: account.email.clone(),
            role: account.role,
            iat: now.timestamp(),
            exp: expiration,
            jti: Uuid::new_v4().to_string(),
        };

        debug!(
            "Generating JWT for {} ({}), expires in {}h",
            account.email,
            account.id,
            self.ttl.num_hours()
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to generate JWT")?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Validate a JWT token and extract claims.
    ///
    /// The signature is checked first; a token is expired once `now >= exp`.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below without leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let decoded = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            }
        })?;

        if Utc::now().timestamp() >= decoded.claims.exp {
            return Err(AuthError::TokenExpired);
        }

        debug!("Validated JWT for {}", decoded.claims.email);

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;

    fn create_test_account(role: Role) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "testuser@example.com".to_string(),
            password_hash: "hash".to_string(),
            full_name: "Test User".to_string(),
            role,
            created_at: Utc::now().to_rfc3339(),
            bio: None,
            profile_image: None,
        }
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let handler = JwtHandler::new("test-secret-key-12345");
        let account = create_test_account(Role::Student);

        let issued = handler.generate_token(&account).unwrap();
        assert!(!issued.token.is_empty());
        assert_eq!(issued.expires_in, 24 * 3600);

        let claims = handler.validate_token(&issued.token).unwrap();
        assert_eq!(claims.email, account.email);
        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.role, Role::Student);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let handler = JwtHandler::new("test-secret-key-12345");

        let result = handler.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AuthError::TokenInvalid)));

        let result = handler.validate_token("");
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_different_secrets_reject() {
        let handler1 = JwtHandler::new("secret1");
        let handler2 = JwtHandler::new("secret2");
        let account = create_test_account(Role::Teacher);

        let issued = handler1.generate_token(&account).unwrap();

        let result = handler2.validate_token(&issued.token);
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_altered_signature_is_invalid() {
        let handler = JwtHandler::new("test-secret-key-12345");
        let account = create_test_account(Role::Student);
        let issued = handler.generate_token(&account).unwrap();

        let (head, sig) = issued.token.rsplit_once('.').unwrap();
        let mut sig: Vec<char> = sig.chars().collect();
        sig[0] = if sig[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}", head, sig.into_iter().collect::<String>());

        let result = handler.validate_token(&tampered);
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_expired_token_rejected_as_expired() {
        let handler = JwtHandler::with_ttl("test-secret-key-12345", Duration::seconds(-5));
        let account = create_test_account(Role::Student);
        let issued = handler.generate_token(&account).unwrap();

        let result = handler.validate_token(&issued.token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_expired_and_tampered_is_invalid() {
        let handler = JwtHandler::with_ttl("test-secret-key-12345", Duration::seconds(-5));
        let other = JwtHandler::with_ttl("another-secret", Duration::seconds(-5));
        let account = create_test_account(Role::Student);
        let issued = other.generate_token(&account).unwrap();

        // Signature failure wins over expiry
        let result = handler.validate_token(&issued.token);
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_tokens_are_distinct() {
        let handler = JwtHandler::new("test-secret-key-12345");
        let account = create_test_account(Role::Teacher);

        let first = handler.generate_token(&account).unwrap();
        let second = handler.generate_token(&account).unwrap();
        assert_ne!(first.token, second.token);
    }
}
