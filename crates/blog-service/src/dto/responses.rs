//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize`; ids are rendered as hyphenated
//! UUID strings and field names are camelCase.

use chrono::{DateTime, Utc};
use serde::Serialize;

use blog_core::value_objects::PostId;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response carrying the access token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until expiry, absent when tokens never expire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(access_token: String, expires_in: Option<i64>, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Account as shown to its owner
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCountResponse {
    pub post_id: String,
    pub comment_count: i64,
}

// ============================================================================
// Like Responses
// ============================================================================

/// Result of a like toggle
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggleResponse {
    pub post_id: String,
    pub liked: bool,
    pub like_count: i64,
    pub message: String,
}

impl LikeToggleResponse {
    pub fn new(post_id: PostId, liked: bool, like_count: i64) -> Self {
        let message = if liked { "Like added" } else { "Like removed" };
        Self {
            post_id: post_id.to_string(),
            liked,
            like_count,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeCountResponse {
    pub post_id: String,
    pub like_count: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: bool,
}
