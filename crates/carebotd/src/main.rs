//! Carebot Daemon - health question answering over HTTP.

use anyhow::Result;
use carebot_common::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG, default info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("carebotd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    carebotd::server::run(config).await
}
