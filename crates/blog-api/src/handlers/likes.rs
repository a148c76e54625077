//! Like handlers
//!
//! Endpoints for toggling and counting likes. Toggles answer 201 when a like
//! was added and 200 when one was removed.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use blog_core::{PostId, UserId};
use blog_service::dto::{LikeCountResponse, LikeToggleResponse, PostIdQuery, ToggleLikeRequest};
use blog_service::{parse_post_id, LikeLedger};

use crate::extractors::{AuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

async fn toggle(
    state: &AppState,
    post_id: PostId,
    user_id: UserId,
) -> ApiResult<(StatusCode, Json<LikeToggleResponse>)> {
    let ledger = LikeLedger::new(state.service_context());
    let response = ledger.toggle_and_count(post_id, user_id).await?;
    let status = if response.liked {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// Toggle the caller's like on a post
///
/// POST /likes
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ToggleLikeRequest>,
) -> ApiResult<(StatusCode, Json<LikeToggleResponse>)> {
    let post_id = parse_post_id(&request.post_id)?;
    toggle(&state, post_id, auth.user_id).await
}

/// Toggle the caller's like on a post
///
/// POST /blogs/{blog_id}/likes
pub async fn toggle_like_for_post(
    State(state): State<AppState>,
    auth: AuthUser,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<(StatusCode, Json<LikeToggleResponse>)> {
    toggle(&state, post_id, auth.user_id).await
}

/// Count likes on a post
///
/// GET /likes/count?postId=
pub async fn like_count(
    State(state): State<AppState>,
    Query(query): Query<PostIdQuery>,
) -> ApiResult<Json<LikeCountResponse>> {
    let raw = query
        .post_id
        .ok_or_else(|| ApiError::invalid_query("postId is required"))?;
    let post_id = parse_post_id(&raw)?;

    let ledger = LikeLedger::new(state.service_context());
    Ok(Json(ledger.count_response(post_id).await?))
}

/// Count likes on a post
///
/// GET /blogs/{blog_id}/likes
pub async fn like_count_for_post(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<Json<LikeCountResponse>> {
    let ledger = LikeLedger::new(state.service_context());
    Ok(Json(ledger.count_response(post_id).await?))
}
