pub mod channel;
pub mod classify;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod publish;
pub mod session;
pub mod speech;
pub mod stream;

pub use channel::ChannelId;
pub use classify::{classify, ContentTags, Sentiment};
pub use config::Config;
pub use credentials::CredentialStore;
pub use error::PipelineError;
pub use http::{create_router, AppState};
pub use publish::{EventPublisher, NatsPublisher, TranscriptEvent, TranscriptionErrorEvent};
pub use session::{Orchestrator, PipelineConfig, SessionRegistry, SessionState, SessionStatus, StartOutcome};
pub use speech::{ChatTranslator, Transcriber, Translation, Translator, WhisperApiTranscriber};
pub use stream::{AudioCapturer, FfmpegCapturer, StreamResolver, YtDlpResolver};
