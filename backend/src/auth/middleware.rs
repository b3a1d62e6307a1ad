//! Middleware for protecting authenticated routes and handling authorization.
//!
//! Two composable stages: `jwt_auth` establishes identity from a bearer
//! token (401 on failure), and `require_role` gates on a per-route set of
//! acceptable roles (403 when identity is present but the role is not
//! allowed). Layering only `jwt_auth` means "requires login".

use crate::api::common::service_error_to_http;
use crate::database::models::Role;
use crate::errors::ServiceError;
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            service_error_to_http(ServiceError::unauthenticated("Access token required"))
        })?;

    // Check if it's a Bearer token
    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return Err(service_error_to_http(ServiceError::unauthenticated(
            "Access token required",
        )));
    };

    match jwt_utils.validate_token(token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Role authorization middleware, parameterized per route.
///
/// The allowed set is route configuration, handed to `middleware::from_fn`:
///
/// ```ignore
/// .layer(middleware::from_fn(require_role(&[Role::Moderator, Role::Admin])))
/// .layer(middleware::from_fn(jwt_auth))
/// ```
pub fn require_role(
    allowed: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> Pin<Box<dyn Future<Output = Result<Response, (StatusCode, String)>> + Send>>
+ Clone {
    move |request, next| Box::pin(check_role(allowed, request, next))
}

async fn check_role(
    allowed: &'static [Role],
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    // Claims must have been attached by jwt_auth upstream; their absence is
    // a missing login, not a role failure.
    let claims = request.extensions().get::<Claims>().ok_or_else(|| {
        service_error_to_http(ServiceError::unauthenticated("Access token required"))
    })?;

    if !claims.has_any_role(allowed) {
        return Err(service_error_to_http(ServiceError::permission_denied(
            "Insufficient permissions",
        )));
    }

    Ok(next.run(request).await)
}
