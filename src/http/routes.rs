use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Transcription control
        .route("/streams/start", post(handlers::start_stream))
        .route("/streams/stop/:channel_id", post(handlers::stop_stream))
        // Session queries
        .route("/streams", get(handlers::list_streams))
        .route(
            "/streams/:channel_id/status",
            get(handlers::get_stream_status),
        )
        // Campaign dashboards are served from other origins
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
