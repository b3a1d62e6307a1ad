//! Defines the HTTP routes for admin-only operations.

use super::handlers::list_users;
use crate::auth::middleware::{jwt_auth, require_role};
use crate::database::models::Role;
use axum::{Router, middleware, routing::get};

/// Creates the admin router. Every route requires a valid token with the
/// admin role; layers run authentication first, then the role check.
pub fn admin_router() -> Router {
    Router::new()
        .route("/users", get(list_users))
        .layer(middleware::from_fn(require_role(&[Role::Admin])))
        .layer(middleware::from_fn(jwt_auth))
}
