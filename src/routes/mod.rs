//! Router assembly: HTTP endpoints, function gateway, static files, CORS, and HTTP tracing.

use std::{path::Path, sync::Arc};

use axum::{
    routing::{any, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::GameStore;

pub mod function;
pub mod http;

/// Build the application router with:
/// - JSON API under `/api/...`
/// - the same API through the function gateway path
/// - Static SPA from `static_dir` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(store: Arc<GameStore>, static_dir: &Path) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/health", get(http::http_health))
        .route("/api/categories", get(http::http_get_categories))
        .route("/api/game/start", post(http::http_post_start_game))
        .route("/api/game/answer", post(http::http_post_answer))
        .route("/api/game/summary", post(http::http_post_summary))
        .route("/.netlify/functions/api/*rest", any(function::function_gateway))
        // State + CORS + HTTP tracing
        .with_state(store)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
