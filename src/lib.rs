pub mod config;
pub mod email;
pub mod error;
pub mod media;
pub mod routes;
pub mod state;
pub mod submission;
pub mod submission_log;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::state::{AppState, SharedState};

pub fn build_app(state: AppState) -> Router {
    let max_body_size = state.config.max_body_size;
    let state: SharedState = Arc::new(state);

    Router::new()
        .merge(routes::submit_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Outside CORS: the limit's response body has no `Default`.
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::disable()),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
