//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum::extract::FromRequestParts;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::Role,
    services::AuthService,
    state::AppState,
    store::Subject,
};

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// The role-scoping subject for this caller
    pub fn subject(&self) -> Subject {
        Subject {
            id: self.id,
            role: self.role,
        }
    }

    /// Require one of the given roles
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Insufficient role for this operation".to_string(),
            ))
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            debug!(path = %path, "Auth failed: missing or malformed Authorization header");
            AppError::Unauthorized
        })?;

    let claims = AuthService::verify_token(token, &state.config().jwt.secret).inspect_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: token verification failed");
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        debug!(path = %path, sub = %claims.sub, "Auth failed: invalid user ID in token");
        AppError::InvalidToken
    })?;

    let user = AuthenticatedUser {
        id: user_id,
        name: claims.name.clone(),
        role: claims.role,
    };
    debug!(path = %path, user_id = %user.id, role = %user.role.as_str(), "User authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
