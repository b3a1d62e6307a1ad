//! Handler functions for admin-only API endpoints.

use crate::api::common::service_error_to_http;
use crate::auth::models::UsersResponse;
use crate::database::models::PublicUser;
use crate::services::user_service::UserService;
use axum::{extract::Extension, http::StatusCode, response::Json as ResponseJson};
use sqlx::SqlitePool;

/// List every registered user, without password hashes.
///
/// Admin role is enforced by the route's middleware stack.
#[axum::debug_handler]
pub async fn list_users(
    Extension(pool): Extension<SqlitePool>,
) -> Result<ResponseJson<UsersResponse>, (StatusCode, String)> {
    let service = UserService::new(&pool);

    match service.list_users().await {
        Ok(users) => Ok(ResponseJson(UsersResponse {
            users: users.into_iter().map(PublicUser::from).collect(),
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}
