//! BrandForge daemon - brand kit generation service

use anyhow::Result;
use brandforge_common::ForgeConfig;
use brandforged::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("BrandForge daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = ForgeConfig::from_env();
    if config.groq_api_key.is_none() {
        info!("No text generation credential; text capabilities run in simulation mode");
    }
    if config.stability_api_key.is_none() {
        info!("No image generation credential; logos use the local placeholder");
    }

    server::run(config).await
}
