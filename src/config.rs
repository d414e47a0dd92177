//! Command-line configuration for the proxy server.

use clap::Parser;
use std::net::SocketAddr;

/// HLS media proxy configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "hls-media-proxy")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind the proxy server to.
    #[arg(short = 'b', long, default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Logging level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
