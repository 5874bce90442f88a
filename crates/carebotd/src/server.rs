//! HTTP server for carebotd

use crate::metrics::RouterMetrics;
use crate::routes;
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use carebot_common::config::ServerConfig;
use carebot_common::{Config, HealthService};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub service: HealthService,
    pub metrics: RouterMetrics,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: HealthService) -> Result<Self> {
        Ok(Self {
            service,
            metrics: RouterMetrics::new()?,
            start_time: Instant::now(),
        })
    }
}

/// Routes plus tracing, timeout and body size layers
pub fn build_app(state: Arc<AppState>, server: &ServerConfig) -> Router {
    routes::api_routes()
        .with_state(state)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(config: Config) -> Result<()> {
    let service = HealthService::from_config(&config)?;
    info!(
        "  Provider: {} ({} mode), {} curated topics",
        service.provider(),
        service.mode(),
        service.topics().len()
    );

    let state = Arc::new(AppState::new(service)?);
    let app = build_app(state, &config.server);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    info!("  Listening on http://{}", config.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
