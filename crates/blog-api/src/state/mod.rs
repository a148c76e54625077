//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, the auth gate and configuration.

use std::sync::Arc;

use blog_common::{AppConfig, AuthGate};
use blog_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Bearer token check shared by every protected route
    auth_gate: Arc<AuthGate>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState; the gate verifies with the context's codec
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let auth_gate = AuthGate::new(service_context.token_codec_arc());
        Self {
            service_context: Arc::new(service_context),
            auth_gate: Arc::new(auth_gate),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the auth gate
    pub fn auth_gate(&self) -> &AuthGate {
        &self.auth_gate
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
