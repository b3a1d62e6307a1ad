//! Handler functions for moderator-facing API endpoints.

use crate::auth::models::DashboardResponse;
use crate::database::models::PublicUser;
use crate::utils::jwt::Claims;
use axum::{extract::Extension, http::StatusCode, response::Json as ResponseJson};

/// Greet the caller with their own identity claims.
///
/// Moderator or admin role is enforced by the route's middleware stack; the
/// payload is built straight from the verified claims, no lookup needed.
#[axum::debug_handler]
pub async fn dashboard(
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<DashboardResponse>, (StatusCode, String)> {
    Ok(ResponseJson(DashboardResponse {
        message: "Welcome to the moderator dashboard".to_string(),
        user: PublicUser::from(&claims),
    }))
}
