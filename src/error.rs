//! Error types for the media proxy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::proxy::cors_headers;

/// Main error type for the proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The inbound request carried no `url` query parameter.
    #[error("missing required 'url' query parameter")]
    MissingUrl,

    /// The `url` parameter could not be percent-decoded.
    #[error("invalid url encoding: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The outbound fetch to the media origin failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// A response header value could not be constructed.
    #[error("invalid header value: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProxyError::MissingUrl => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to fetch media url: {}", self),
            ),
        };

        (status, cors_headers(), body).into_response()
    }
}

/// Result type alias using our error type.
pub type Result<T> = std::result::Result<T, ProxyError>;
