//! Like ledger
//!
//! Owns the per-(post, user) like toggle and the per-post like count.
//!
//! A toggle holds the key's async lock across the read and the write, and the
//! store rejects a second record for the same pair. When the store still
//! reports a collision (another process won the race), the toggle re-reads
//! the pair and retries exactly once against what it finds. A second
//! collision is reported as `LedgerError::Conflict`.

use blog_common::AppError;
use blog_core::entities::Like;
use blog_core::value_objects::{PostId, UserId};
use blog_core::DomainError;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::dto::{LikeCountResponse, LikeToggleResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// First try plus one retry after a store collision
const MAX_ATTEMPTS: u32 = 2;

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The pair went from absent to present
    Liked,
    /// The pair went from present to absent
    Unliked,
}

impl ToggleOutcome {
    pub fn is_liked(self) -> bool {
        matches!(self, Self::Liked)
    }
}

/// Like ledger failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Post not found: {0}")]
    NotFound(PostId),

    #[error("Concurrent like updates on post {post_id} by user {user_id}, retry the request")]
    Conflict { post_id: PostId, user_id: UserId },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl LedgerError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Conflict { .. } => 409,
            Self::StoreUnavailable(_) => 503,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "UNKNOWN_POST",
            Self::Conflict { .. } => "CONFLICT",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<DomainError> for LedgerError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PostNotFound(post_id) => Self::NotFound(post_id),
            DomainError::DuplicateKey { post_id, user_id } => Self::Conflict { post_id, user_id },
            DomainError::StoreUnavailable(msg) => Self::StoreUnavailable(msg),
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(post_id) => AppError::Domain(DomainError::PostNotFound(post_id)),
            conflict @ LedgerError::Conflict { .. } => AppError::Conflict(conflict.to_string()),
            LedgerError::StoreUnavailable(msg) => AppError::StoreUnavailable(msg),
        }
    }
}

/// Like ledger
pub struct LikeLedger<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeLedger<'a> {
    /// Create a new LikeLedger
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flip the like state of `(post_id, user_id)`.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> Result<ToggleOutcome, LedgerError> {
        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(LedgerError::NotFound(post_id));
        }

        let _guard = self.ctx.like_locks().lock((post_id, user_id)).await;
        let likes = self.ctx.like_repo();

        let mut current = likes.find(post_id, user_id).await?;
        for attempt in 1..=MAX_ATTEMPTS {
            match current {
                None => match likes.create(&Like::new(post_id, user_id)).await {
                    Ok(()) => {
                        info!(post_id = %post_id, user_id = %user_id, "Like added");
                        return Ok(ToggleOutcome::Liked);
                    }
                    Err(DomainError::DuplicateKey { .. }) => {
                        warn!(post_id = %post_id, user_id = %user_id, attempt, "Like already present in store");
                    }
                    Err(e) => return Err(e.into()),
                },
                Some(existing) => {
                    if likes.delete(existing.id).await? {
                        info!(post_id = %post_id, user_id = %user_id, "Like removed");
                        return Ok(ToggleOutcome::Unliked);
                    }
                    warn!(post_id = %post_id, user_id = %user_id, attempt, "Like already gone from store");
                }
            }
            current = likes.find(post_id, user_id).await?;
        }

        warn!(post_id = %post_id, user_id = %user_id, "Like toggle gave up after repeated collisions");
        Err(LedgerError::Conflict { post_id, user_id })
    }

    /// Number of likes on a post. Unknown posts count zero.
    #[instrument(skip(self))]
    pub async fn count(&self, post_id: PostId) -> Result<i64, LedgerError> {
        Ok(self.ctx.like_repo().count_by_post(post_id).await?)
    }

    /// Toggle and report the resulting count
    pub async fn toggle_and_count(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> ServiceResult<LikeToggleResponse> {
        let outcome = self.toggle(post_id, user_id).await?;
        let like_count = self.count(post_id).await?;
        Ok(LikeToggleResponse::new(post_id, outcome.is_liked(), like_count))
    }

    /// Count wrapped for the API
    pub async fn count_response(&self, post_id: PostId) -> ServiceResult<LikeCountResponse> {
        let like_count = self.count(post_id).await?;
        Ok(LikeCountResponse {
            post_id: post_id.to_string(),
            like_count,
        })
    }
}
