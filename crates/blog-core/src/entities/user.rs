//! User entity - an account that can sign in and act on posts

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// User account. The password hash lives only in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a fresh id
    pub fn new(email: String) -> Self {
        Self {
            id: UserId::new(),
            email: normalize_email(&email),
            created_at: Utc::now(),
        }
    }
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
