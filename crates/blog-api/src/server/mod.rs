//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use blog_common::{AppConfig, AppError, TokenCodec};
use blog_db::{create_pool, run_migrations, InMemoryStore};
use blog_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the application with the base middleware stack and no rate limiting
pub fn create_app(state: AppState) -> Router {
    apply_middleware(create_router().merge(health_routes())).with_state(state)
}

/// Build the application with rate limiting and configured CORS.
///
/// Health routes are merged after the limiter so probes are never throttled.
pub fn create_app_with_config(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    api.merge(apply_middleware(health_routes())).with_state(state)
}

/// Initialize all dependencies and create AppState.
///
/// With `DATABASE_URL` set the repositories run on PostgreSQL (schema applied
/// at startup); without it everything lives in an in-memory store.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let token_codec = Arc::new(TokenCodec::new(&config.jwt.secret, config.jwt.expiry()));

    let service_context = match blog_db::DatabaseConfig::from_app_config(&config.database) {
        Some(db_config) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&db_config)
                .await
                .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
            info!("PostgreSQL connection established");
            ServiceContext::with_pg_pool(pool, token_codec)
        }
        None => {
            warn!("DATABASE_URL not set, using the in-memory store; data is lost on exit");
            ServiceContext::with_memory_store(InMemoryStore::new(), token_codec)
        }
    };

    if config.jwt.expiry().is_none() {
        warn!("JWT_EXPIRY_SECONDS disables expiry; issued tokens never expire");
    }

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app_with_config(state);

    run_server(app, addr).await
}
