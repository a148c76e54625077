//! Authentication extractor
//!
//! Runs the auth gate over the raw `Authorization` header. A rejected request
//! never reaches the handler body.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use blog_common::AuthError;
use blog_core::UserId;
use tracing::warn;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: UserId,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A header that is not visible ASCII cannot be a bearer credential.
        let header = match parts.headers.get(AUTHORIZATION).map(|v| v.to_str()) {
            None => None,
            Some(Ok(value)) => Some(value),
            Some(Err(_)) => {
                warn!(kind = AuthError::Unauthenticated.kind(), "Authentication failed");
                return Err(AuthError::Unauthenticated.into());
            }
        };

        let user_id = app_state.auth_gate().authenticate(header).map_err(|e| {
            warn!(
                kind = e.kind(),
                method = %parts.method,
                path = %parts.uri.path(),
                "Authentication failed"
            );
            ApiError::from(e)
        })?;

        Ok(AuthUser::new(user_id))
    }
}
