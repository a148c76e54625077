//! Comment entity - text attached to a post

use chrono::{DateTime, Utc};

use crate::value_objects::{CommentId, PostId, UserId};

/// Comment on a post. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: PostId, author_id: UserId, text: String) -> Self {
        Self {
            id: CommentId::new(),
            post_id,
            author_id,
            text,
            created_at: Utc::now(),
        }
    }
}
