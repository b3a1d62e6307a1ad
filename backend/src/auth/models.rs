//! Data structures for authentication-related entities.
//!
//! This module defines the request payloads and response bodies used by the
//! authentication endpoints. Responses only ever carry `PublicUser`; the
//! password hash never appears here.

use crate::database::models::PublicUser;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response to a successful signup
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Login response containing the session token and user info
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
    pub expires_in: u64, // Token expiration in seconds
}

/// Response for the profile endpoint
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
}

/// Response for the admin user listing
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<PublicUser>,
}

/// Response for the moderator dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub user: PublicUser,
}
