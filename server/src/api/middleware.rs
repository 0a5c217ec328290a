//! API middleware

use axum::http::{HeaderValue, Method, Uri, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::types::ApiError;
use crate::core::config::is_all_interfaces;

/// Browser origins allowed to call the API: the server's own address
pub fn cors(host: &str, port: u16) -> CorsLayer {
    let mut hosts = vec!["localhost".to_string(), "127.0.0.1".to_string()];
    if !is_all_interfaces(host) && !hosts.iter().any(|h| h == host) {
        hosts.push(host.to_string());
    }
    let origins: Vec<HeaderValue> = hosts
        .iter()
        .filter_map(|h| HeaderValue::from_str(&format!("http://{}:{}", h, port)).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// JSON 404 for unknown routes
pub async fn handle_404(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "Route not found");
    ApiError::not_found("ROUTE_NOT_FOUND", format!("No route for {}", uri.path()))
}
