//! TJM engine HTTP server.
//!
//! Environment:
//! - `TJM_CONFIG_DIR`: configuration directory (default `./config/fr`)
//! - `TJM_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `TJM_CACHE_FILE`: optional JSON file the last result is persisted to
//! - `RUST_LOG`: log filter (default `info`)

use std::env;
use std::path::PathBuf;

use tjm_engine::api::{AppState, create_router};
use tjm_engine::cache::ResultCache;
use tjm_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/fr";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_dir = env::var("TJM_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("TJM_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let cache_file = env::var_os("TJM_CACHE_FILE").map(PathBuf::from);

    let config = ConfigLoader::load(&config_dir)?;
    let cache = match &cache_file {
        Some(path) => ResultCache::load_or_empty(path),
        None => ResultCache::new(),
    };
    let state = AppState::with_cache(config, cache, cache_file);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, config_dir = %config_dir, "TJM engine listening");

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
