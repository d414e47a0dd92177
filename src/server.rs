//! Axum server setup and configuration.

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::proxy::{proxy_media, proxy_preflight};
use crate::state::AppState;

/// Create the main router for the application.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(|| async { "OK" }))
        // Media proxy; OPTIONS answers CORS preflights
        .route("/api/proxy", get(proxy_media).options(proxy_preflight))
        // Add tracing layer
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server.
pub async fn run_http_server(config: &Config, router: Router) -> Result<()> {
    info!("Listening on {}", config.bind);

    axum_server::bind(config.bind)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let state = Arc::new(AppState::new().expect("client"));
        create_router(state)
    }

    #[tokio::test]
    async fn missing_url_parameter_is_bad_request() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/proxy")
            .body(Body::empty())
            .unwrap();

        // Fails before any outbound fetch is issued.
        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("url"));
    }

    #[tokio::test]
    async fn preflight_returns_cors_headers_and_empty_body() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/proxy")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_METHODS)
                .unwrap(),
            "GET, OPTIONS"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
                .unwrap(),
            "Content-Type"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_MAX_AGE)
                .unwrap(),
            "86400"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn health_check_responds_ok() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
