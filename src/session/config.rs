use std::path::PathBuf;
use std::time::Duration;

use crate::config::PipelineSection;

/// Timing and workspace settings for session workers.
///
/// Injected rather than hard-coded so tests can run the loop at millisecond
/// cadence; production values come from the config file.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Length of each captured audio segment
    pub chunk_duration: Duration,

    /// Pause between chunks, and after a failed chunk
    pub pause: Duration,

    /// Directory holding transient audio segments
    pub workdir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_duration: Duration::from_secs(30),
            pause: Duration::from_secs(2),
            workdir: std::env::temp_dir().join("vedika"),
        }
    }
}

impl From<&PipelineSection> for PipelineConfig {
    fn from(section: &PipelineSection) -> Self {
        Self {
            chunk_duration: Duration::from_secs(section.chunk_secs),
            pause: Duration::from_secs(section.pause_secs),
            workdir: PathBuf::from(&section.workdir),
        }
    }
}
