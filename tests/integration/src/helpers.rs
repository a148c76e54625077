//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use blog_api::{create_app, create_app_state};
use blog_common::{AppConfig, TokenCodec};
use blog_core::UserId;
use chrono::{DateTime, Utc};
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret every test server signs with
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Token lifetime of test servers
pub const TEST_TOKEN_EXPIRY: Duration = Duration::from_secs(3600);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server backed by the in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        // Port 0 lets the OS pick a free port per server
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with a bearer token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        self.post_with_authorization(path, &format!("Bearer {token}"), body)
            .await
    }

    /// Make a POST request with a raw `Authorization` header value
    pub async fn post_with_authorization<T: Serialize>(
        &self,
        path: &str,
        authorization: &str,
        body: &T,
    ) -> Result<Response> {
        let request = self.client.post(self.url(path)).json(body);
        send_with(request, authorization).await
    }

    /// Make a PATCH request with a bearer token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let request = self.client.patch(self.url(path)).json(body);
        send_with(request, &format!("Bearer {token}")).await
    }

    /// Make a DELETE request with a bearer token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let request = self.client.delete(self.url(path));
        send_with(request, &format!("Bearer {token}")).await
    }
}

async fn send_with(request: RequestBuilder, authorization: &str) -> Result<Response> {
    Ok(request.header(AUTHORIZATION, authorization).send().await?)
}

/// Create a test configuration.
///
/// Built from a fixed map rather than the process environment so a
/// `DATABASE_URL` exported in the shell never leaks into these tests.
pub fn test_config() -> Result<AppConfig> {
    let expiry = TEST_TOKEN_EXPIRY.as_secs().to_string();
    let vars: HashMap<&str, String> = HashMap::from([
        ("APP_ENV", "development".to_string()),
        ("API_HOST", "127.0.0.1".to_string()),
        ("API_PORT", "0".to_string()),
        ("JWT_SECRET", TEST_JWT_SECRET.to_string()),
        ("JWT_EXPIRY_SECONDS", expiry),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Sign a token for `user_id` as of `issued_at` with the given secret
pub fn forge_token(secret: &str, user_id: UserId, issued_at: DateTime<Utc>) -> Result<String> {
    let codec = TokenCodec::new(secret, Some(chrono::Duration::from_std(TEST_TOKEN_EXPIRY).expect("test expiry fits in chrono::Duration")));
    Ok(codec.issue_at(user_id, issued_at)?)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
