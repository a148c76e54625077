//! Comment handlers
//!
//! Endpoints for adding, listing and counting comments.

use axum::{
    extract::{Query, State},
    Json,
};
use blog_service::dto::{
    CommentCountResponse, CommentResponse, CreateCommentRequest, PostIdQuery,
};
use blog_service::{parse_post_id, CommentService};

use crate::extractors::{AuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Add a comment
///
/// POST /blogs/{blog_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    PostIdPath(post_id): PostIdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .create_comment(post_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(comment)))
}

/// List comments on a post
///
/// GET /blogs/{blog_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.list_comments(post_id).await?))
}

/// Count comments on a post
///
/// GET /comments/count?postId=
pub async fn count_comments(
    State(state): State<AppState>,
    Query(query): Query<PostIdQuery>,
) -> ApiResult<Json<CommentCountResponse>> {
    let raw = query
        .post_id
        .ok_or_else(|| ApiError::invalid_query("postId is required"))?;
    let post_id = parse_post_id(&raw)?;

    let service = CommentService::new(state.service_context());
    Ok(Json(service.count_response(post_id).await?))
}

/// Count comments on a post
///
/// GET /blogs/{blog_id}/comments/count
pub async fn count_comments_for_post(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<Json<CommentCountResponse>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.count_response(post_id).await?))
}
