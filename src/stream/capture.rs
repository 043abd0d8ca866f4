use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::PipelineError;

/// Slack added on top of the requested capture duration before the
/// transcoder is forcibly terminated. Live HLS sources stall rather than
/// fail, so a hard deadline is the only reliable exit.
const CAPTURE_GRACE_SECS: u64 = 10;

/// Captures a bounded audio segment from a live stream URL.
#[async_trait]
pub trait AudioCapturer: Send + Sync {
    /// Capture exactly `duration` of audio from `stream_url` into `dest`.
    ///
    /// On any failure `dest` is removed; there is no partial-file recovery.
    async fn capture(
        &self,
        stream_url: &str,
        dest: &Path,
        duration: Duration,
    ) -> Result<(), PipelineError>;
}

/// Capturer backed by the ffmpeg binary.
///
/// Produces 16 kHz mono 16-bit PCM WAV, the input format the speech-to-text
/// adapter expects.
pub struct FfmpegCapturer {
    binary: String,
}

impl FfmpegCapturer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn args(stream_url: &str, dest: &Path, duration: Duration) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            stream_url.to_string(),
            "-t".to_string(),
            duration.as_secs().to_string(),
            "-vn".to_string(),
            "-ac".to_string(),
            "1".to_string(),
            "-ar".to_string(),
            "16000".to_string(),
            "-acodec".to_string(),
            "pcm_s16le".to_string(),
            "-f".to_string(),
            "wav".to_string(),
            dest.to_string_lossy().to_string(),
        ]
    }

    /// Reject captures whose WAV header reports zero samples. ffmpeg can exit
    /// zero after writing only a header when the stream drops mid-segment.
    fn validate_output(dest: &Path) -> Result<(), PipelineError> {
        let reader = hound::WavReader::open(dest).map_err(|e| PipelineError::Capture {
            message: format!("capture produced an unreadable file: {}", e),
        })?;

        if reader.len() == 0 {
            return Err(PipelineError::Capture {
                message: "capture produced an empty file".to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl AudioCapturer for FfmpegCapturer {
    async fn capture(
        &self,
        stream_url: &str,
        dest: &Path,
        duration: Duration,
    ) -> Result<(), PipelineError> {
        let deadline = duration + Duration::from_secs(CAPTURE_GRACE_SECS);

        debug!(
            "Capturing {}s of audio to {} (deadline {}s)",
            duration.as_secs(),
            dest.display(),
            deadline.as_secs()
        );

        let child = tokio::process::Command::new(&self.binary)
            .args(Self::args(stream_url, dest, duration))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PipelineError::Capture {
                message: format!("failed to run {}: {}", self.binary, e),
            })?;

        // Dropping the wait future on timeout kills the transcoder via
        // kill_on_drop, so the deadline also guarantees process cleanup.
        let result = tokio::time::timeout(deadline, child.wait_with_output()).await;

        let outcome = match result {
            Err(_) => Err(PipelineError::CaptureTimeout {
                seconds: deadline.as_secs(),
            }),
            Ok(Err(e)) => Err(PipelineError::Capture {
                message: format!("transcoder did not exit cleanly: {}", e),
            }),
            Ok(Ok(output)) if !output.status.success() => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(PipelineError::Capture {
                    message: stderr.trim().to_string(),
                })
            }
            Ok(Ok(_)) => {
                if dest.exists() {
                    Self::validate_output(dest)
                } else {
                    Err(PipelineError::Capture {
                        message: "transcoder produced no output file".to_string(),
                    })
                }
            }
        };

        if outcome.is_err() {
            // Discard any partial file; the next chunk starts clean.
            let _ = tokio::fs::remove_file(dest).await;
        }

        outcome
    }
}
