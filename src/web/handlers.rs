//! Request handlers for the feed proxy.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::error::LetterfeedError;
use crate::feed::FeedService;

/// Shared application state for the web layer.
pub struct AppState {
    /// Feed service handling fetch, extraction and serialization.
    pub service: FeedService,
    /// Redirect target for the favicon route.
    pub favicon_url: String,
}

/// Serve the RSS feed for the requested archive path.
///
/// The full request path is taken verbatim as the archive path; fetch and
/// upstream failures map to 502, everything else to 500, with empty
/// bodies.
pub async fn serve_feed(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path();
    match state.service.rss_for(path).await {
        Ok(rss) => (
            [(header::CONTENT_TYPE, "application/rss+xml")],
            rss,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(path = %path, error = %err, "feed request failed");
            status_for(&err).into_response()
        }
    }
}

/// Redirect the favicon to the archive host's own icon; no extraction.
pub async fn favicon(State(state): State<Arc<AppState>>) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, state.favicon_url.clone())],
    )
        .into_response()
}

/// Map a pipeline error onto the response status.
fn status_for(err: &LetterfeedError) -> StatusCode {
    match err {
        LetterfeedError::Fetch(_) | LetterfeedError::Upstream(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
