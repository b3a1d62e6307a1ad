//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle signup, login, logout, and profile retrieval.
//! They are designed to be integrated into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout).layer(middleware::from_fn(jwt_auth)))
        .route("/profile", get(profile).layer(middleware::from_fn(jwt_auth)))
}
