//! Route definitions
//!
//! Routes are mounted at the root, without a version prefix.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, comments, health, likes, posts};
use crate::state::AppState;

/// Create the main API router (health is exported separately to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(like_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(posts::list_posts).post(posts::create_post))
        .route(
            "/blogs/:blog_id",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/blogs/:blog_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/blogs/:blog_id/comments/count",
            get(comments::count_comments_for_post),
        )
        .route("/comments/count", get(comments::count_comments))
}

/// Like routes
fn like_routes() -> Router<AppState> {
    Router::new()
        .route("/likes", post(likes::toggle_like))
        .route("/likes/count", get(likes::like_count))
        .route(
            "/blogs/:blog_id/likes",
            get(likes::like_count_for_post).post(likes::toggle_like_for_post),
        )
}
