//! Main entry point for the authentication backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and registers all API routes and middleware.
//! Configuration is loaded once here; a missing signing secret or database
//! URL aborts startup.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use crate::utils::jwt::JwtUtils;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    db.migrate().await.unwrap();
    let pool = db.pool().clone();
    let jwt_utils = Arc::new(JwtUtils::from_config(&config));

    let app = Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .nest("/admin", api::admin::routes::admin_router())
        .nest("/moderator", api::moderator::routes::moderator_router())
        .layer(CorsLayer::permissive())
        .layer(Extension(pool))
        .layer(Extension(jwt_utils));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting auth server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Auth Backend",
            "version": "0.1.0"
        }),
        "Welcome to the Auth API",
    ))
}
