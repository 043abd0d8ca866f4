use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::channel::ChannelId;
use crate::error::PipelineError;

/// Resolves a channel to a currently-playable direct media URL.
///
/// Live stream URLs rotate, so a resolved URL is only valid for a while; the
/// session worker re-resolves whenever a capture fails.
#[async_trait]
pub trait StreamResolver: Send + Sync {
    async fn resolve(&self, channel: &ChannelId) -> Result<String, PipelineError>;
}

/// Resolver backed by the yt-dlp binary.
///
/// Asks for the lowest-quality format that still carries audio and prints
/// only the direct URL; nothing is downloaded. One process per call, no
/// internal retries.
pub struct YtDlpResolver {
    binary: String,
}

impl YtDlpResolver {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn args(page_url: &str) -> Vec<String> {
        vec![
            "-g".to_string(),
            "-f".to_string(),
            "worstaudio/worst".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            page_url.to_string(),
        ]
    }
}

#[async_trait]
impl StreamResolver for YtDlpResolver {
    async fn resolve(&self, channel: &ChannelId) -> Result<String, PipelineError> {
        let page_url = channel.page_url();
        debug!("Resolving live stream for {} via {}", channel, page_url);

        let output = tokio::process::Command::new(&self.binary)
            .args(Self::args(&page_url))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| PipelineError::Resolution {
                channel: channel.to_string(),
                message: format!("failed to run {}: {}", self.binary, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::Resolution {
                channel: channel.to_string(),
                message: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let url = stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| PipelineError::Resolution {
                channel: channel.to_string(),
                message: "extractor produced no URL".to_string(),
            })?;

        info!("Resolved live stream for {}", channel);

        Ok(url.to_string())
    }
}
