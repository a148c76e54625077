//! Service context - dependency container for services
//!
//! Holds the repositories, the token codec, password hashing and the
//! per-(post, user) lock registry used by the like ledger.

use std::sync::Arc;

use blog_common::{PasswordService, TokenCodec};
use blog_core::traits::{CommentRepository, LikeRepository, PostRepository, UserRepository};
use blog_core::value_objects::{PostId, UserId};
use blog_db::{
    InMemoryStore, PgCommentRepository, PgLikeRepository, PgPool, PgPostRepository,
    PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::lock::KeyedLock;

/// Lock registry keyed by the like's natural key
pub type LikeLocks = KeyedLock<(PostId, UserId)>;

/// Service context containing all dependencies.
///
/// Cheap to clone; every clone shares the same repositories and lock registry.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    like_repo: Arc<dyn LikeRepository>,
    user_repo: Arc<dyn UserRepository>,

    // Auth
    token_codec: Arc<TokenCodec>,
    passwords: PasswordService,

    // Concurrency
    like_locks: Arc<LikeLocks>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        like_repo: Arc<dyn LikeRepository>,
        user_repo: Arc<dyn UserRepository>,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            post_repo,
            comment_repo,
            like_repo,
            user_repo,
            token_codec,
            passwords: PasswordService::new(),
            like_locks: Arc::new(LikeLocks::new()),
        }
    }

    /// Wire every repository to PostgreSQL
    pub fn with_pg_pool(pool: PgPool, token_codec: Arc<TokenCodec>) -> Self {
        Self::new(
            Arc::new(PgPostRepository::new(pool.clone())),
            Arc::new(PgCommentRepository::new(pool.clone())),
            Arc::new(PgLikeRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            token_codec,
        )
    }

    /// Wire every repository to one shared in-memory store
    pub fn with_memory_store(store: InMemoryStore, token_codec: Arc<TokenCodec>) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            token_codec,
        )
    }

    // === Repositories ===

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === Auth ===

    /// Get the token codec
    pub fn token_codec(&self) -> &TokenCodec {
        self.token_codec.as_ref()
    }

    /// Shared handle to the token codec, for the auth gate
    pub fn token_codec_arc(&self) -> Arc<TokenCodec> {
        Arc::clone(&self.token_codec)
    }

    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }

    // === Concurrency ===

    /// Get the per-(post, user) lock registry
    pub fn like_locks(&self) -> &LikeLocks {
        self.like_locks.as_ref()
    }

    /// Probe the backing store with a cheap lookup
    pub async fn check_store(&self) -> ServiceResult<()> {
        self.post_repo.find_by_id(PostId::new()).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("token_codec", &self.token_codec)
            .field("like_locks", &self.like_locks)
            .finish()
    }
}

/// Builder for creating ServiceContext from individual repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    token_codec: Option<Arc<TokenCodec>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an in-memory store for every repository
    pub fn memory(store: &InMemoryStore) -> Self {
        Self::new()
            .post_repo(Arc::new(store.clone()))
            .comment_repo(Arc::new(store.clone()))
            .like_repo(Arc::new(store.clone()))
            .user_repo(Arc::new(store.clone()))
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn token_codec(mut self, codec: Arc<TokenCodec>) -> Self {
        self.token_codec = Some(codec);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            self.like_repo
                .ok_or_else(|| ServiceError::validation("like_repo is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.token_codec
                .ok_or_else(|| ServiceError::validation("token_codec is required"))?,
        ))
    }
}
