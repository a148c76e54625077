//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-memory).

use async_trait::async_trait;

use crate::entities::{Comment, Like, Post, PostPatch, User};
use crate::error::DomainError;
use crate::value_objects::{LikeId, PostId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    /// List all posts, newest first
    async fn find_all(&self) -> RepoResult<Vec<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Apply a partial update, returning the updated post if it exists
    async fn update(&self, id: PostId, patch: PostPatch) -> RepoResult<Option<Post>>;

    /// Delete a post together with its comments and likes.
    /// Returns false when there was nothing to delete.
    async fn delete(&self, id: PostId) -> RepoResult<bool>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Append a comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// List comments on a post, oldest first
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;

    /// Count comments on a post
    async fn count_by_post(&self, post_id: PostId) -> RepoResult<i64>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Find the like for a (post, user) pair
    async fn find(&self, post_id: PostId, user_id: UserId) -> RepoResult<Option<Like>>;

    /// Insert a like. Fails with `DomainError::DuplicateKey` when the pair
    /// already has one.
    async fn create(&self, like: &Like) -> RepoResult<()>;

    /// Delete a like by id. Returns false when it was already gone.
    async fn delete(&self, id: LikeId) -> RepoResult<bool>;

    /// Count likes on a post
    async fn count_by_post(&self, post_id: PostId) -> RepoResult<i64>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}
