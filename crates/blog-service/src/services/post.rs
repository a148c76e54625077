//! Post service
//!
//! Handles post creation, listing, lookup, partial update and deletion.

use blog_core::entities::{Post, PostPatch};
use blog_core::value_objects::PostId;
use blog_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Parse a client-supplied post id
pub fn parse_post_id(raw: &str) -> ServiceResult<PostId> {
    PostId::parse(raw.trim()).map_err(|_| ServiceError::validation(format!("Invalid postId: {raw}")))
}

/// Reject values that are empty once surrounding whitespace is removed
pub(crate) fn require_text(field: &str, value: String) -> ServiceResult<String> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_post(&self, request: CreatePostRequest) -> ServiceResult<PostResponse> {
        let post = Post::new(
            require_text("title", request.title)?,
            require_text("content", request.content)?,
            require_text("author", request.author)?,
        );

        self.ctx.post_repo().create(&post).await?;
        info!(post_id = %post.id, "Post created");

        Ok(PostResponse::from(post))
    }

    /// List all posts, newest first
    #[instrument(skip(self))]
    pub async fn list_posts(&self) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().find_all().await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    /// Get a single post
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: PostId) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;
        Ok(PostResponse::from(post))
    }

    /// Apply a partial update
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        post_id: PostId,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let patch = PostPatch {
            title: request.title.map(|t| require_text("title", t)).transpose()?,
            content: request.content.map(|c| require_text("content", c)).transpose()?,
        };

        let post = self
            .ctx
            .post_repo()
            .update(post_id, patch)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        info!(post_id = %post_id, "Post updated");
        Ok(PostResponse::from(post))
    }

    /// Delete a post together with its comments and likes
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: PostId) -> ServiceResult<()> {
        if !self.ctx.post_repo().delete(post_id).await? {
            return Err(DomainError::PostNotFound(post_id).into());
        }
        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }
}
