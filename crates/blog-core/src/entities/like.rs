//! Like entity - one user's like on one post

use chrono::{DateTime, Utc};

use crate::value_objects::{LikeId, PostId, UserId};

/// Like record. At most one exists per (post, user); unliking hard-deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: LikeId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Create a new Like
    pub fn new(post_id: PostId, user_id: UserId) -> Self {
        Self {
            id: LikeId::new(),
            post_id,
            user_id,
            created_at: Utc::now(),
        }
    }

    /// The uniqueness key of the record
    #[inline]
    pub fn key(&self) -> (PostId, UserId) {
        (self.post_id, self.user_id)
    }
}
