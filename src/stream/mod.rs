//! Live stream access: URL resolution and bounded audio capture.
//!
//! Both operations shell out to external tools (yt-dlp and ffmpeg). Each is
//! behind a trait so session workers can be exercised without the binaries.

pub mod capture;
pub mod resolver;

pub use capture::{AudioCapturer, FfmpegCapturer};
pub use resolver::{StreamResolver, YtDlpResolver};
