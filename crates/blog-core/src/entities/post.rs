//! Post entity - a blog post

use chrono::{DateTime, Utc};

use crate::value_objects::PostId;

/// Blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a post; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl Post {
    /// Create a new Post
    pub fn new(title: String, content: String, author: String) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            title,
            content,
            author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch, bumping `updated_at` only when something changed
    pub fn apply(&mut self, patch: PostPatch) {
        if patch.is_empty() {
            return;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }
}
