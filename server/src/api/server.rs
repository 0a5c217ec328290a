//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::middleware;
use super::routes::{books, health};
use crate::core::config::ServerConfig;
use crate::core::constants::API_BODY_LIMIT;
use crate::domain::BookSearchService;

pub struct ApiServer {
    search: Arc<BookSearchService>,
    config: ServerConfig,
}

impl ApiServer {
    pub fn new(search: Arc<BookSearchService>, config: ServerConfig) -> Self {
        Self { search, config }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/v1/health", get(health::health))
            .nest("/api/v1/books", books::routes(self.search.clone()))
            .fallback(middleware::handle_404)
            .layer(middleware::cors(&self.config.host, self.config.port))
            .layer(DefaultBodyLimit::max(API_BODY_LIMIT))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr = SocketAddr::new(
            self.config
                .host
                .parse()
                .with_context(|| format!("Invalid host address: {}", self.config.host))?,
            self.config.port,
        );
        let router = self.router();

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(addr = %addr, "API server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::debug!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::debug!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{StubCompletion, sample_books, service_with};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server() -> ApiServer {
        let (service, _, _) = service_with(StubCompletion::replying("{}"), sample_books());
        ApiServer::new(
            Arc::new(service),
            ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5390,
            },
        )
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = server()
            .router()
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_books_routes_are_nested() {
        let response = server()
            .router()
            .oneshot(Request::get("/api/v1/books/quick").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = server()
            .router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "ROUTE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let body = format!(r#"{{"query": "{}"}}"#, "a".repeat(API_BODY_LIMIT + 1));
        let response = server()
            .router()
            .oneshot(
                Request::post("/api/v1/books/search")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::OK);
    }
}
