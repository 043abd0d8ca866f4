use super::state::AppState;
use crate::channel::ChannelId;
use crate::session::StartOutcome;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartStreamRequest {
    /// Channel to monitor: a handle ("@newsfirst") or a channel ID ("UC...")
    pub channel_id: String,

    /// Optional API key; installed if no credential is active yet
    pub api_key: Option<String>,

    /// Publish only chunks that mention a tracked candidate (default: false)
    pub political_only: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct StreamControlResponse {
    pub channel_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ActiveStreamsResponse {
    pub channels: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /streams/start
/// Start live transcription for a channel
pub async fn start_stream(
    State(state): State<AppState>,
    Json(req): Json<StartStreamRequest>,
) -> impl IntoResponse {
    let channel = ChannelId::new(&req.channel_id);
    info!("Start requested for channel: {}", channel);

    let outcome = state
        .orchestrator
        .start_session(
            channel.clone(),
            req.api_key,
            req.political_only.unwrap_or(false),
        )
        .await;

    match outcome {
        StartOutcome::Started => (
            StatusCode::ACCEPTED,
            Json(StreamControlResponse {
                channel_id: channel.as_str().to_string(),
                status: "started".to_string(),
                message: format!("Transcription started for {}", channel),
            }),
        )
            .into_response(),
        StartOutcome::AlreadyRunning => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Channel {} is already being transcribed", channel),
            }),
        )
            .into_response(),
        StartOutcome::MissingCredential => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "no transcription credential configured".to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /streams/stop/:channel_id
/// Stop live transcription for a channel
pub async fn stop_stream(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> impl IntoResponse {
    info!("Stop requested for channel: {}", channel_id);

    if state.orchestrator.stop_session(&channel_id) {
        (
            StatusCode::OK,
            Json(StreamControlResponse {
                channel_id: channel_id.clone(),
                status: "stopping".to_string(),
                message: format!("Transcription stopping for {}", channel_id),
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Channel {} has no active session", channel_id),
            }),
        )
            .into_response()
    }
}

/// GET /streams
/// List channels with active sessions
pub async fn list_streams(State(state): State<AppState>) -> impl IntoResponse {
    let mut channels = state.orchestrator.registry().active_channels();
    channels.sort();

    (StatusCode::OK, Json(ActiveStreamsResponse { channels }))
}

/// GET /streams/:channel_id/status
/// Status of one channel's session
pub async fn get_stream_status(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> impl IntoResponse {
    match state.orchestrator.registry().get(&channel_id) {
        Some(session) => (StatusCode::OK, Json(session.snapshot())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Channel {} has no active session", channel_id),
            }),
        )
            .into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
