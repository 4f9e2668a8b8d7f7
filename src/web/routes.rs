//! Route definitions for the control API

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::HttpConfig;
use crate::AppState;

use super::api;

/// Create the main router with all routes
pub fn create_router(app_state: Arc<AppState>, config: &HttpConfig) -> Router {
    let cors = if config.cors_enabled {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/api/status", get(api::get_status))
        .route("/api/scene", get(api::get_scene))
        .route("/api/prop/next", post(api::next_prop))
        .route("/api/prop/prev", post(api::prev_prop))
        .route("/api/snapshot", post(api::take_snapshot))
        // SSE stream of applied poses
        .route("/api/stream", get(api::pose_stream))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
