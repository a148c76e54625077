//! Bearer-token gate
//!
//! Turns a raw `Authorization` header value into an authenticated `UserId`.

use std::sync::Arc;

use blog_core::UserId;

use super::error::AuthError;
use super::jwt::TokenCodec;

const BEARER: &str = "Bearer";

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. The token itself must be a
/// single non-empty word.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.map(str::trim).ok_or(AuthError::Unauthenticated)?;
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::Unauthenticated)?;

    if !scheme.eq_ignore_ascii_case(BEARER) {
        return Err(AuthError::Unauthenticated);
    }

    let token = token.trim_start();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::Unauthenticated);
    }

    Ok(token)
}

/// Authenticates requests against the shared token codec
#[derive(Debug, Clone)]
pub struct AuthGate {
    codec: Arc<TokenCodec>,
}

impl AuthGate {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Resolve the caller's identity from a raw header value
    pub fn authenticate(&self, header: Option<&str>) -> Result<UserId, AuthError> {
        let token = bearer_token(header)?;
        self.codec.verify(token)
    }
}
