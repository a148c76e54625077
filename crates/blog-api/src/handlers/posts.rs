//! Post handlers
//!
//! Endpoints for blog post CRUD.

use axum::{extract::State, Json};
use blog_service::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};
use blog_service::PostService;

use crate::extractors::{AuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a post
///
/// POST /blogs
pub async fn create_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(request).await?;
    Ok(Created(Json(post)))
}

/// List posts
///
/// GET /blogs
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.list_posts().await?))
}

/// Get a post
///
/// GET /blogs/{blog_id}
pub async fn get_post(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.get_post(post_id).await?))
}

/// Update a post
///
/// PATCH /blogs/{blog_id}
pub async fn update_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    PostIdPath(post_id): PostIdPath,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.update_post(post_id, request).await?))
}

/// Delete a post with its comments and likes
///
/// DELETE /blogs/{blog_id}
pub async fn delete_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(post_id).await?;
    Ok(NoContent)
}
