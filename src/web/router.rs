//! Router configuration for the feed proxy.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{favicon, serve_feed, AppState};

/// Create the proxy router.
///
/// The favicon route short-circuits to a redirect; every other path falls
/// through to feed resolution.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/favicon.ico", get(favicon))
        .fallback(serve_feed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
