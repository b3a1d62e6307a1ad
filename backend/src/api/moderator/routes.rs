//! Defines the HTTP routes for moderator-facing operations.

use super::handlers::dashboard;
use crate::auth::middleware::{jwt_auth, require_role};
use crate::database::models::Role;
use axum::{Router, middleware, routing::get};

/// Creates the moderator router. Admins are also accepted everywhere a
/// moderator is.
pub fn moderator_router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .layer(middleware::from_fn(require_role(&[
            Role::Moderator,
            Role::Admin,
        ])))
        .layer(middleware::from_fn(jwt_auth))
}
