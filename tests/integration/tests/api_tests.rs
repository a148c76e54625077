//! API Integration Tests
//!
//! Every test spawns its own server on an ephemeral port, backed by the
//! in-memory store, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use blog_core::UserId;
use chrono::{Duration, Utc};
use futures::future::join_all;
use integration_tests::{
    assert_json, assert_status, fixtures::*, forge_token, TestServer, TEST_JWT_SECRET,
};
use reqwest::StatusCode;

async fn like_count(server: &TestServer, post_id: &str) -> i64 {
    let response = server
        .get(&format!("/likes/count?postId={post_id}"))
        .await
        .unwrap();
    let count: LikeCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.post_id, post_id);
    count.like_count
}

async fn assert_unauthorized(response: reqwest::Response) {
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "UNAUTHORIZED");
    assert_eq!(body.error.message, "Unauthorized");
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["store"], true);
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let register = RegisterRequest::unique();

    let response = server.post("/auth/register", &register).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(user.email, register.email);

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.id, user.id);
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.expires_in, Some(3600));
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_short_password() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "short".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.expect("Failed to start server");
    let register = RegisterRequest::unique();
    server.post("/auth/register", &register).await.unwrap();

    let wrong_password = LoginRequest {
        email: register.email.clone(),
        password: "not-the-password".to_string(),
    };
    let response = server.post("/auth/login", &wrong_password).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let unknown = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "whatever-it-is".to_string(),
    };
    let response = server.post("/auth/login", &unknown).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Like Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_like_created_then_ok() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token).await.unwrap();
    let body = ToggleLikeRequest::new(&post.id);

    let response = server
        .post_auth("/likes", &auth.access_token, &body)
        .await
        .unwrap();
    let liked: LikeToggleResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(liked.liked);
    assert_eq!(liked.like_count, 1);
    assert_eq!(liked.message, "Like added");
    assert_eq!(liked.post_id, post.id);

    let response = server
        .post_auth("/likes", &auth.access_token, &body)
        .await
        .unwrap();
    let unliked: LikeToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.like_count, 0);
    assert_eq!(unliked.message, "Like removed");
}

#[tokio::test]
async fn test_two_users_like_same_post() {
    let server = TestServer::start().await.expect("Failed to start server");
    let u1 = register_and_login(&server).await.unwrap();
    let u2 = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &u1.access_token).await.unwrap();
    let body = ToggleLikeRequest::new(&post.id);

    let response = server.post_auth("/likes", &u1.access_token, &body).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    let response = server.post_auth("/likes", &u2.access_token, &body).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(like_count(&server, &post.id).await, 2);

    let response = server.post_auth("/likes", &u1.access_token, &body).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert_eq!(like_count(&server, &post.id).await, 1);
}

#[tokio::test]
async fn test_toggle_like_on_post_route() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token).await.unwrap();
    let path = format!("/blogs/{}/likes", post.id);

    let response = server
        .post_auth(&path, &auth.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let count: LikeCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.like_count, 1);
}

#[tokio::test]
async fn test_parallel_toggles_settle_on_parity() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token).await.unwrap();
    let body = ToggleLikeRequest::new(&post.id);

    let responses = join_all(
        (0..50).map(|_| server.post_auth("/likes", &auth.access_token, &body)),
    )
    .await;

    let mut created = 0;
    let mut ok = 0;
    for response in responses {
        match response.unwrap().status() {
            StatusCode::CREATED => created += 1,
            StatusCode::OK => ok += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 25);
    assert_eq!(ok, 25);
    assert_eq!(like_count(&server, &post.id).await, 0);
}

#[tokio::test]
async fn test_toggle_like_unknown_post() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let missing = blog_core::PostId::new().to_string();

    let response = server
        .post_auth("/likes", &auth.access_token, &ToggleLikeRequest::new(&missing))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_toggle_like_invalid_post_id() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();

    let response = server
        .post_auth("/likes", &auth.access_token, &ToggleLikeRequest::new("not-a-uuid"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_like_count_unknown_post_is_zero() {
    let server = TestServer::start().await.expect("Failed to start server");
    let missing = blog_core::PostId::new().to_string();
    assert_eq!(like_count(&server, &missing).await, 0);
}

#[tokio::test]
async fn test_like_count_requires_post_id() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/likes/count").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get("/likes/count?postId=12").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Authentication Failure Tests
// ============================================================================

#[tokio::test]
async fn test_garbage_token_rejected_without_side_effects() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token).await.unwrap();

    let response = server
        .post_with_authorization("/likes", "Bearer garbage", &ToggleLikeRequest::new(&post.id))
        .await
        .unwrap();
    assert_unauthorized(response).await;
    assert_eq!(like_count(&server, &post.id).await, 0);
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token).await.unwrap();

    let response = server
        .post("/likes", &ToggleLikeRequest::new(&post.id))
        .await
        .unwrap();
    assert_unauthorized(response).await;
    assert_eq!(like_count(&server, &post.id).await, 0);
}

#[tokio::test]
async fn test_wrong_scheme_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token).await.unwrap();

    let header = format!("Token {}", auth.access_token);
    let response = server
        .post_with_authorization("/likes", &header, &ToggleLikeRequest::new(&post.id))
        .await
        .unwrap();
    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_foreign_and_expired_tokens_share_one_response() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token).await.unwrap();
    let body = ToggleLikeRequest::new(&post.id);

    let foreign = forge_token("some-other-secret", UserId::new(), Utc::now()).unwrap();
    let expired = forge_token(TEST_JWT_SECRET, UserId::new(), Utc::now() - Duration::hours(2)).unwrap();

    let foreign_response = server.post_auth("/likes", &foreign, &body).await.unwrap();
    let expired_response = server.post_auth("/likes", &expired, &body).await.unwrap();

    assert_eq!(foreign_response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(expired_response.status(), StatusCode::UNAUTHORIZED);
    let foreign_body = foreign_response.text().await.unwrap();
    let expired_body = expired_response.text().await.unwrap();
    assert_eq!(foreign_body, expired_body);

    assert_eq!(like_count(&server, &post.id).await, 0);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_count() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token).await.unwrap();
    let path = format!("/blogs/{}/comments", post.id);

    for i in 0..3 {
        let response = server
            .post_auth(&path, &auth.access_token, &CreateCommentRequest::new(format!("comment {i}")))
            .await
            .unwrap();
        let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(comment.post_id, post.id);
        assert_eq!(comment.author_id, auth.user.id);
    }

    let response = server
        .get(&format!("/comments/count?postId={}", post.id))
        .await
        .unwrap();
    let count: CommentCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.post_id, post.id);
    assert_eq!(count.comment_count, 3);

    let response = server.get(&path).await.unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 3);
}

#[tokio::test]
async fn test_comment_count_unknown_post() {
    let server = TestServer::start().await.expect("Failed to start server");
    let missing = blog_core::PostId::new();

    let response = server
        .get(&format!("/comments/count?postId={missing}"))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_comment_requires_auth() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let post = create_post(&server, &auth.access_token).await.unwrap();

    let response = server
        .post(
            &format!("/blogs/{}/comments", post.id),
            &CreateCommentRequest::new("anonymous"),
        )
        .await
        .unwrap();
    assert_unauthorized(response).await;
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_post_lifecycle() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let token = &auth.access_token;
    let post = create_post(&server, token).await.unwrap();
    let path = format!("/blogs/{}", post.id);

    let response = server.get(&path).await.unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.title, post.title);

    let response = server
        .patch_auth(&path, token, &serde_json::json!({ "title": "Renamed" }))
        .await
        .unwrap();
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.content, post.content);

    let response = server.get("/blogs").await.unwrap();
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(posts.iter().any(|p| p.id == post.id));

    let response = server.delete_auth(&path, token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_auth(&path, token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_post_removes_comments_and_likes() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_and_login(&server).await.unwrap();
    let token = &auth.access_token;
    let post = create_post(&server, token).await.unwrap();

    server
        .post_auth(
            &format!("/blogs/{}/comments", post.id),
            token,
            &CreateCommentRequest::new("first"),
        )
        .await
        .unwrap();
    server
        .post_auth("/likes", token, &ToggleLikeRequest::new(&post.id))
        .await
        .unwrap();
    assert_eq!(like_count(&server, &post.id).await, 1);

    let response = server
        .delete_auth(&format!("/blogs/{}", post.id), token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    assert_eq!(like_count(&server, &post.id).await, 0);
    let response = server
        .get(&format!("/comments/count?postId={}", post.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_invalid_post_path() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/blogs/not-a-uuid").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
