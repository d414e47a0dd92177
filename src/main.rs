//! HLS media proxy.
//!
//! Fetches remote playlists and segments on the server side and relays them
//! to a browser player with permissive CORS headers. Playlist bodies are
//! rewritten so that every segment and nested-playlist fetch routes back
//! through this proxy instead of the origin.

mod config;
mod error;
mod proxy;
mod rewrite;
mod server;
mod state;

use clap::Parser;
use std::sync::Arc;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "hls_media_proxy={},tower_http=info",
                    config.log_level
                ))
            }),
        )
        .init();

    let state = Arc::new(AppState::new()?);
    let router = server::create_router(state);

    server::run_http_server(&config, router).await?;

    Ok(())
}
