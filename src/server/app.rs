// Router construction and shared state

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::extractor::MediaExtractor;
use crate::server::routes;
use crate::storage::Uploader;

/// Shared state injected into every handler. Both collaborators sit behind
/// trait objects so tests can substitute mocks.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn MediaExtractor>,
    pub uploader: Arc<dyn Uploader>,
}

/// Build the application router. With no configured origins, cross-origin
/// access is wide open (development); otherwise it is restricted to the
/// listed frontend origins.
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE])
    };

    Router::new()
        .route("/", get(routes::home))
        .route("/convert", post(routes::convert))
        .route("/api/search", get(routes::search))
        .route("/api/video_info", get(routes::video_info))
        .route("/api/playlist_info", get(routes::playlist_info))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
