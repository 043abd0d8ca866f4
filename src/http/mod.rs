//! HTTP API for external control (campaign dashboard)
//!
//! This module provides a REST API for controlling transcription sessions:
//! - POST /streams/start - Start transcribing a channel's live stream
//! - POST /streams/stop/:channel_id - Stop a session
//! - GET /streams - List active sessions
//! - GET /streams/:channel_id/status - Query session status
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
