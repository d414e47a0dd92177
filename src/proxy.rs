//! Proxy request handlers.
//!
//! One GET handler fetches the requested upstream resource, classifies it as
//! binary or text, rewrites playlist text, and relays it with CORS headers.
//! The OPTIONS handler answers CORS preflights. There is no per-request state
//! beyond the arguments: one request in, one response out.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ProxyError, Result};
use crate::rewrite::rewrite_playlist;
use crate::state::AppState;

/// HLS playlist media type.
const MIME_HLS: &str = "application/vnd.apple.mpegurl";
/// MPEG transport stream media type.
const MIME_MPEG_TS: &str = "video/mp2t";

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    url: Option<String>,
}

/// CORS headers attached to every proxy response.
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

/// `GET /api/proxy?url=<percent-encoded-absolute-url>`
///
/// Relays the upstream body and status as-is; playlist text gets its media
/// references rewritten first so the player keeps talking to the proxy.
pub async fn proxy_media(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProxyQuery>,
) -> Result<Response> {
    let raw_url = params.url.as_deref().ok_or(ProxyError::MissingUrl)?;
    let target_url = urlencoding::decode(raw_url)?.into_owned();

    info!("Proxying media request for {}", target_url);

    let upstream = state.http_client.get(&target_url).send().await?;
    // Non-success upstream statuses are relayed as-is, not translated.
    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    debug!(
        "Upstream response for {}: {} (content-type {:?})",
        target_url, status, content_type
    );

    if is_binary(&target_url, content_type.as_deref()) {
        let body = upstream.bytes().await?;
        return binary_response(status, content_type.as_deref(), body);
    }

    let text = upstream.text().await?;
    let body = if is_playlist(&target_url, content_type.as_deref()) {
        rewrite_playlist(&target_url, &text)
    } else {
        text
    };

    let content_type = content_type.unwrap_or_else(|| infer_content_type(&target_url).to_string());
    let mut headers = cors_headers();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(&content_type)?);

    Ok((status, headers, body).into_response())
}

/// `OPTIONS /api/proxy` — CORS preflight. Always 200, empty body.
pub async fn proxy_preflight() -> Response {
    let mut headers = cors_headers();
    // Browsers may cache the preflight result for 24 hours.
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );
    (StatusCode::OK, headers).into_response()
}

/// Segments are binary; so is anything the origin labels as media.
fn is_binary(target_url: &str, content_type: Option<&str>) -> bool {
    target_url.ends_with(".ts")
        || content_type.is_some_and(|ct| {
            ct.contains("video/") || ct.contains("audio/") || ct.contains("binary")
        })
}

/// Playlist text gets rewritten; any other text passes through.
fn is_playlist(target_url: &str, content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains(MIME_HLS)) || target_url.ends_with(".m3u8")
}

/// Fallback content type when the origin does not send one.
fn infer_content_type(target_url: &str) -> &'static str {
    if target_url.ends_with(".m3u8") {
        MIME_HLS
    } else if target_url.ends_with(".ts") {
        MIME_MPEG_TS
    } else {
        "application/octet-stream"
    }
}

fn binary_response(status: StatusCode, content_type: Option<&str>, body: Bytes) -> Result<Response> {
    let mut headers = cors_headers();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type.unwrap_or(MIME_MPEG_TS))?,
    );

    Ok((status, headers, body).into_response())
}
