//! Authentication failure kinds

use thiserror::Error;

/// Why a request could not be authenticated.
///
/// The variants are kept apart for logging only; callers must answer every
/// one of them with the same generic rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header, or not of the form `Bearer <token>`
    #[error("missing or malformed bearer credentials")]
    Unauthenticated,

    /// Token was signed with a different secret
    #[error("token signature does not match")]
    InvalidSignature,

    /// Token could not be decoded or lacks the required claims
    #[error("token is malformed")]
    Malformed,

    /// Token is older than the configured lifetime
    #[error("token has expired")]
    Expired,
}

impl AuthError {
    /// Short machine-readable kind for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::InvalidSignature => "invalid_signature",
            Self::Malformed => "malformed",
            Self::Expired => "expired",
        }
    }
}
