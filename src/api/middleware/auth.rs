//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{Actor, UserRole};
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// The domain-level actor identity for service calls
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

fn bearer_user(state: &AppState, request: &Request) -> Result<CurrentUser, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    Ok(CurrentUser {
        id: claims.sub,
        email: claims.email,
        role: UserRole::from(claims.role.as_str()),
    })
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current_user = bearer_user(&state, &request)?;
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Optional authentication for public endpoints whose response differs for
/// the owning side (e.g. a draft job is visible to its owner only).
/// An invalid token is treated as no token.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Ok(current_user) = bearer_user(&state, &request) {
        request.extensions_mut().insert(current_user);
    }

    next.run(request).await
}
