use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub nats: NatsConfig,
    pub pipeline: PipelineSection,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct NatsConfig {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PipelineSection {
    /// Seconds of audio captured per chunk
    pub chunk_secs: u64,
    /// Pause between chunks (and after a failed chunk)
    pub pause_secs: u64,
    /// Directory for transient audio segments
    pub workdir: String,
    /// Stream-extraction binary (yt-dlp or compatible)
    pub ytdlp_bin: String,
    /// Transcoder binary
    pub ffmpeg_bin: String,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiConfig {
    /// API key; may be empty and supplied later via a start request
    pub api_key: Option<String>,
    pub api_base: String,
    pub transcribe_model: String,
    pub translate_model: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
