//! Path parameter extractors
//!
//! Type-safe extraction of post ids from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use blog_core::PostId;

use crate::response::ApiError;

/// The single post id segment of `/blogs/:blog_id` and its sub-routes
#[derive(Debug, Clone, Copy)]
pub struct PostIdPath(pub PostId);

#[async_trait]
impl<S> FromRequestParts<S> for PostIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        let post_id = PostId::parse(&raw)
            .map_err(|_| ApiError::invalid_path(format!("Invalid post id: {raw}")))?;

        Ok(PostIdPath(post_id))
    }
}
