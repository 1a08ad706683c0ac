//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /links`               - Store a new link bundle
//! - `GET  /links/{vanity_url}`  - Read a stored bundle
//! - `GET  /health`              - Storage health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/links` (optional)
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{get_links_handler, health_handler, save_links_handler};
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limiter for the bundle routes; `None` disables it
pub fn app_router(state: AppState, rate_limit: Option<RateLimitLayer>) -> NormalizePath<Router> {
    let mut links_router = Router::new()
        .route("/links", post(save_links_handler))
        .route("/links/{vanity_url}", get(get_links_handler));

    if let Some(rate_limit) = rate_limit {
        links_router = links_router.layer(rate_limit);
    }

    let router = Router::new()
        .merge(links_router)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
