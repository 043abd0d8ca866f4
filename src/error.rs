//! Error types for the transcription pipeline.

use thiserror::Error;

/// Failures that can occur while driving one channel's capture loop.
///
/// Only `Resolution` before the first chunk is fatal to a session; every
/// other variant is absorbed by the worker, which logs it and retries on the
/// next chunk.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("stream resolution failed for {channel}: {message}")]
    Resolution { channel: String, message: String },

    #[error("audio capture failed: {message}")]
    Capture { message: String },

    #[error("audio capture timed out after {seconds}s")]
    CaptureTimeout { seconds: u64 },

    #[error("no transcription credential configured")]
    MissingCredential,

    #[error("transcription request failed: {message}")]
    Transcription { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
