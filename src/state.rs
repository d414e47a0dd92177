//! Shared application state.

use crate::error::Result;

/// State shared across all proxy requests.
///
/// Requests are otherwise independent; the client is the only thing worth
/// sharing (connection pooling).
pub struct AppState {
    /// Client used for outbound fetches to media origins.
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder().build()?;
        Ok(Self { http_client })
    }
}
