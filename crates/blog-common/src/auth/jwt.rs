//! Identity token codec
//!
//! Issues and verifies HS256 JWTs carrying a `UserId` subject, using the
//! `jsonwebtoken` crate. Tokens are never stored; every request re-verifies.

use blog_core::UserId;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp); absent when tokens do not expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Get the subject as a `UserId`
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        UserId::parse(&self.sub).map_err(|_| AuthError::Malformed)
    }
}

/// Signs and verifies identity tokens with a single shared secret.
///
/// Expiry is optional: with `None` a token stays valid for as long as the
/// secret does.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Option<Duration>,
}

impl TokenCodec {
    /// Create a codec from the configured secret and lifetime
    #[must_use]
    pub fn new(secret: &str, expiry: Option<Duration>) -> Self {
        // Lifetime is enforced in `verify_at` from `iat`, so the library
        // only checks the signature and shape.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry,
        }
    }

    /// Configured token lifetime
    pub fn expiry(&self) -> Option<Duration> {
        self.expiry
    }

    /// Lifetime in seconds, as reported to clients at login
    pub fn expires_in(&self) -> Option<i64> {
        self.expiry.map(|d| d.num_seconds())
    }

    /// Issue a token for a user, stamped with the current time
    pub fn issue(&self, user_id: UserId) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token with an explicit issue time
    pub fn issue_at(&self, user_id: UserId, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let exp = match self.expiry {
            Some(expiry) => Some(
                issued_at
                    .checked_add_signed(expiry)
                    .ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!(
                            "Token expiry of {}s overflows the issue time",
                            expiry.num_seconds()
                        ))
                    })?
                    .timestamp(),
            ),
            None => None,
        };
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    /// Verify a token and return the user it identifies
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, AuthError> {
        let claims = self.decode_claims(token)?;
        let user_id = claims.user_id()?;

        let now = now.timestamp();
        if let Some(expiry) = self.expiry {
            if now > claims.iat.saturating_add(expiry.num_seconds()) {
                return Err(AuthError::Expired);
            }
        }
        if claims.exp.is_some_and(|exp| now > exp) {
            return Err(AuthError::Expired);
        }

        Ok(user_id)
    }

    /// Check the signature and decode the claims without applying expiry
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}
