//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::database::models::{CreateNewUser, PublicUser};
use crate::errors::{ServiceError, ServiceResult};
use crate::services::user_service::UserService;
use crate::utils::jwt::{Claims, JwtUtils};
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for signup, login, and profile retrieval.
///
/// Borrows the pool and the process-wide `JwtUtils`; both are owned by the
/// application and injected per request, so tests can substitute an isolated
/// store and key.
pub struct AuthService<'a> {
    jwt_utils: &'a JwtUtils,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    pub fn new(pool: &'a SqlitePool, jwt_utils: &'a JwtUtils) -> Self {
        AuthService {
            jwt_utils,
            user_service: UserService::new(pool),
        }
    }

    /// Registers a new user and returns the created identity.
    pub async fn signup(&self, request: CreateNewUser) -> ServiceResult<PublicUser> {
        let user = self.user_service.create_user(request).await?;
        Ok(PublicUser::from(user))
    }

    /// Authenticates a user and issues a session token.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginResponse> {
        // Validate input
        if let Err(validation_errors) = login_request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let user = self
            .user_service
            .authenticate_user(&login_request.email, &login_request.password)
            .await?;

        let token = self.jwt_utils.generate_token(&user)?;

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token,
            user: PublicUser::from(user),
            expires_in: self.jwt_utils.expires_in_seconds(),
        })
    }

    /// Returns the identity behind a set of verified claims.
    ///
    /// `NotFound` if the user record no longer exists.
    pub async fn profile(&self, claims: &Claims) -> ServiceResult<PublicUser> {
        let user = self.user_service.get_user_required(claims.user_id()).await?;
        Ok(PublicUser::from(user))
    }
}
