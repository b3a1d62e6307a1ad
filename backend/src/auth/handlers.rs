//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for signup, login, logout,
//! and profile retrieval, parse request data, and interact with the
//! `auth::service` for core business logic.

use crate::api::common::service_error_to_http;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::database::models::CreateNewUser;
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handle user signup request
#[axum::debug_handler]
pub async fn signup(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    Json(payload): Json<CreateNewUser>,
) -> Result<(StatusCode, ResponseJson<SignupResponse>), (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &jwt_utils);

    match auth_service.signup(payload).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            ResponseJson(SignupResponse {
                message: "User created successfully".to_string(),
                user,
            }),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &jwt_utils);

    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout request (client-side token invalidation)
#[axum::debug_handler]
pub async fn logout() -> Result<ResponseJson<serde_json::Value>, (StatusCode, String)> {
    // Tokens are stateless; logout is handled on the client side by
    // discarding the token. The server keeps no session state to clear.
    Ok(ResponseJson(serde_json::json!({
        "message": "Logged out successfully"
    })))
}

/// Get the current user's profile from their verified claims
#[axum::debug_handler]
pub async fn profile(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ProfileResponse>, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &jwt_utils);

    match auth_service.profile(&claims).await {
        Ok(user) => Ok(ResponseJson(ProfileResponse { user })),
        Err(error) => Err(service_error_to_http(error)),
    }
}
