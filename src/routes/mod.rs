//! Router assembly: page endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - Server-rendered pages at `/` and the generation/evaluation endpoints
/// - Static assets from `./static`
/// - No body limit: uploads are accepted whole, whatever their size
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::http_index))
        .route("/generate-quiz", post(http::http_generate_quiz))
        .route("/generate-assessment", post(http::http_generate_assessment))
        .route("/legacy/generate-quiz", post(http::http_generate_quiz_legacy))
        .route("/evaluate", post(http::http_evaluate))
        .nest_service("/static", ServeDir::new("./static"))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
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
}
