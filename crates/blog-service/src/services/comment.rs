//! Comment service
//!
//! Adds and lists comments, and counts them per post. Every operation
//! requires the post to exist.

use blog_core::entities::Comment;
use blog_core::value_objects::{PostId, UserId};
use blog_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CommentCountResponse, CommentResponse, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::require_text;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn require_post(&self, post_id: PostId) -> ServiceResult<()> {
        match self.ctx.post_repo().find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::PostNotFound(post_id).into()),
        }
    }

    /// Add a comment to a post
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        post_id: PostId,
        author_id: UserId,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let text = require_text("comment", request.comment)?;
        self.require_post(post_id).await?;

        let comment = Comment::new(post_id, author_id, text);
        self.ctx.comment_repo().create(&comment).await?;

        info!(post_id = %post_id, comment_id = %comment.id, "Comment added");
        Ok(CommentResponse::from(comment))
    }

    /// List comments on a post, oldest first
    #[instrument(skip(self))]
    pub async fn list_comments(&self, post_id: PostId) -> ServiceResult<Vec<CommentResponse>> {
        self.require_post(post_id).await?;
        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    /// Count comments on a post
    #[instrument(skip(self))]
    pub async fn count(&self, post_id: PostId) -> ServiceResult<i64> {
        self.require_post(post_id).await?;
        Ok(self.ctx.comment_repo().count_by_post(post_id).await?)
    }

    /// Count wrapped for the API
    pub async fn count_response(&self, post_id: PostId) -> ServiceResult<CommentCountResponse> {
        let comment_count = self.count(post_id).await?;
        Ok(CommentCountResponse {
            post_id: post_id.to_string(),
            comment_count,
        })
    }
}
