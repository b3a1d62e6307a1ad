//! User business logic service.
//!
//! Handles user creation with uniqueness guarantees, credential
//! authentication, and lookups on behalf of the auth layer.

use crate::database::models::{CreateNewUser, CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::password::{hash_password, verify_password};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user with full validation.
    ///
    /// Usernames are stored trimmed; emails are stored trimmed and
    /// lowercased so that uniqueness and lookup are case-insensitive.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - Duplicate username or email (including insert races lost on the
    ///   unique indexes)
    /// - Hashing or storage failures
    pub async fn create_user(&self, create_user: CreateNewUser) -> ServiceResult<User> {
        // Input validation using validator crate
        if let Err(validation_errors) = create_user.validate() {
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

        let username = create_user.username.trim().to_string();
        let email = create_user.email.trim().to_lowercase();

        if username.is_empty() {
            return Err(ServiceError::validation("Username is required"));
        }

        let repo = UserRepository::new(self.pool);

        // Friendly duplicate checks up front; the unique indexes remain the
        // authority under concurrency.
        if repo.username_exists(&username).await? {
            return Err(ServiceError::already_exists("User", &username));
        }
        if repo.email_exists(&email).await? {
            return Err(ServiceError::already_exists("User", &email));
        }

        let password_hash = hash_password(&create_user.password)?;

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            username: username.clone(),
            email,
            password_hash,
            role: create_user.role.unwrap_or_default(),
        };

        match repo.create_user(data).await {
            Ok(user) => Ok(user),
            Err(source) => {
                let error = ServiceError::Database { source };
                if error.is_unique_violation() {
                    // Lost a race with a concurrent signup
                    Err(ServiceError::already_exists("User", &username))
                } else {
                    Err(error)
                }
            }
        }
    }

    /// Authenticates a user by email and password.
    ///
    /// Unknown email and wrong password both collapse to
    /// `InvalidCredentials` so account existence is not leaked.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        let user = repo
            .get_user_by_email(email.trim())
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Retrieves a user by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the user doesn't exist
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Retrieves all users, newest first.
    pub async fn list_users(&self) -> ServiceResult<Vec<User>> {
        let repo = UserRepository::new(self.pool);
        let users = repo.list_users().await?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Role;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    fn signup(username: &str, email: &str, password: &str) -> CreateNewUser {
        CreateNewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_authenticate() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        let created = service
            .create_user(signup("alice", "a@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(created.username, "alice");
        assert_eq!(created.role, Role::User);
        assert_ne!(created.password_hash, "secret1");

        let authed = service.authenticate_user("a@x.com", "secret1").await.unwrap();
        assert_eq!(authed.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        service
            .create_user(signup("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        let result = service
            .create_user(signup("alice", "other@x.com", "secret2"))
            .await;
        assert!(matches!(result, Err(ServiceError::AlreadyExists { .. })));

        // No second record was created
        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        service
            .create_user(signup("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        let result = service.create_user(signup("bob", "A@X.COM", "secret2")).await;
        assert!(matches!(result, Err(ServiceError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_invalid_credentials_are_indistinguishable() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        service
            .create_user(signup("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        let wrong_password = service.authenticate_user("a@x.com", "wrong").await;
        let unknown_email = service.authenticate_user("nobody@x.com", "secret1").await;

        assert!(matches!(wrong_password, Err(ServiceError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(ServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        let result = service.create_user(signup("alice", "a@x.com", "short")).await;
        assert!(matches!(result, Err(ServiceError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_requested_role_is_kept() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        let mut request = signup("mod", "m@x.com", "secret1");
        request.role = Some(Role::Moderator);

        let created = service.create_user(request).await.unwrap();
        assert_eq!(created.role, Role::Moderator);
    }

    #[tokio::test]
    async fn test_get_user_required_missing() {
        let pool = test_pool().await;
        let service = UserService::new(&pool);

        let result = service.get_user_required("no-such-id").await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }
}
