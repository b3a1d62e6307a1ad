//! JWT token utilities for authentication and authorization.
//!
//! Provides secure token creation, validation, and claims management for
//! user sessions. Keys are derived from the signing secret once at startup;
//! the token format is opaque to everything outside this module.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::models::{PublicUser, Role, User};
use crate::errors::{ServiceError, ServiceResult};

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username at issue time
    pub username: String,
    /// Email at issue time
    pub email: String,
    /// User role
    pub role: Role,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens.
///
/// Built once from config at startup and shared across requests; rotating
/// the secret requires a restart and invalidates all outstanding tokens.
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Creates a JwtUtils instance from an explicit secret and lifetime.
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in_seconds,
        }
    }

    /// Creates a JwtUtils instance from the loaded application config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expires_in_seconds)
    }

    /// Token lifetime in seconds, as reported to clients.
    pub fn expires_in_seconds(&self) -> u64 {
        self.expires_in_seconds
    }

    /// Generates a signed token carrying the user's identity claims.
    pub fn generate_token(&self, user: &User) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))
    }

    /// Validates and decodes a token.
    ///
    /// Signature mismatch, expiry, and malformed input all collapse to
    /// `Unauthenticated`; the signature comparison itself is constant-time
    /// inside jsonwebtoken.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    ServiceError::unauthenticated("Token expired")
                }
                _ => ServiceError::unauthenticated("Invalid token"),
            })
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Check if the claims carry a specific role
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Check if the claims carry any of the given roles
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as usize;
        now > self.exp
    }
}

impl From<&Claims> for PublicUser {
    fn from(claims: &Claims) -> Self {
        PublicUser {
            id: claims.sub.clone(),
            username: claims.username.clone(),
            email: claims.email.clone(),
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;

    fn test_user(role: Role) -> User {
        User {
            id: "01890000-0000-7000-8000-000000000001".to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_then_validate() {
        let jwt_utils = JwtUtils::new("test-secret", 3600);
        let token = jwt_utils.generate_token(&test_user(Role::Moderator)).unwrap();

        let claims = jwt_utils.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "01890000-0000-7000-8000-000000000001");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role(), Role::Moderator);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let issuer = JwtUtils::new("test-secret", 3600);
        let verifier = JwtUtils::new("another-secret", 3600);

        let token = issuer.generate_token(&test_user(Role::User)).unwrap();
        assert!(matches!(
            verifier.validate_token(&token),
            Err(ServiceError::Unauthenticated { .. })
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let jwt_utils = JwtUtils::new("test-secret", 3600);
        let token = jwt_utils.generate_token(&test_user(Role::User)).unwrap();

        // Flip part of the payload segment; the signature no longer matches.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = parts[1].chars().rev().collect();
        let tampered = parts.join(".");

        assert!(jwt_utils.validate_token(&tampered).is_err());
        assert!(jwt_utils.validate_token("not.a.token").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt_utils = JwtUtils::new("test-secret", 3600);
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: "01890000-0000-7000-8000-000000000001".to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            role: Role::User,
            exp: (now - 600) as usize,
            iat: (now - 4200) as usize,
        };
        let stale = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(claims.is_expired());
        assert!(matches!(
            jwt_utils.validate_token(&stale),
            Err(ServiceError::Unauthenticated { .. })
        ));
    }

    #[test]
    fn test_role_membership() {
        let jwt_utils = JwtUtils::new("test-secret", 3600);
        let token = jwt_utils.generate_token(&test_user(Role::User)).unwrap();
        let claims = jwt_utils.validate_token(&token).unwrap();

        assert!(claims.has_role(Role::User));
        assert!(claims.has_any_role(&[Role::User, Role::Admin]));
        assert!(!claims.has_any_role(&[Role::Moderator, Role::Admin]));
    }
}
