use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::config::PipelineConfig;
use super::registry::{RegistryGuard, SessionRegistry, SessionState};
use crate::channel::ChannelId;
use crate::classify::classify;
use crate::credentials::CredentialStore;
use crate::error::PipelineError;
use crate::publish::{EventPublisher, TranscriptEvent, TranscriptionErrorEvent};
use crate::speech::{Transcriber, Translator};
use crate::stream::{AudioCapturer, StreamResolver};

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new session was registered and its worker spawned
    Started,
    /// The channel already has a live session; the request was a no-op
    AlreadyRunning,
    /// No credential could be established; an error event was published and
    /// nothing was registered
    MissingCredential,
}

/// Drives the per-channel capture → transcribe → translate → classify →
/// publish cycle.
///
/// Each session runs as one spawned task. The loop absorbs every mid-stream
/// failure: a failed capture or transcription logs, refreshes the stream URL
/// (live URLs rotate), and tries again next chunk. Only an explicit stop or
/// a failure of the very first resolution ends a session.
#[derive(Clone)]
pub struct Orchestrator {
    registry: Arc<SessionRegistry>,
    credentials: Arc<CredentialStore>,
    resolver: Arc<dyn StreamResolver>,
    capturer: Arc<dyn AudioCapturer>,
    transcriber: Arc<dyn Transcriber>,
    translator: Arc<dyn Translator>,
    publisher: Arc<dyn EventPublisher>,
    config: PipelineConfig,
}

impl Orchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: Arc<SessionRegistry>,
        credentials: Arc<CredentialStore>,
        resolver: Arc<dyn StreamResolver>,
        capturer: Arc<dyn AudioCapturer>,
        transcriber: Arc<dyn Transcriber>,
        translator: Arc<dyn Translator>,
        publisher: Arc<dyn EventPublisher>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            registry,
            credentials,
            resolver,
            capturer,
            transcriber,
            translator,
            publisher,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Start a transcription session for `channel`.
    ///
    /// A supplied key seeds the credential store when none is active yet.
    /// Without any credential the request publishes an error event and
    /// registers nothing.
    pub async fn start_session(
        &self,
        channel: ChannelId,
        api_key: Option<String>,
        political_only: bool,
    ) -> StartOutcome {
        if let Some(key) = api_key {
            if !self.credentials.is_set() {
                info!("Installing credential supplied by start request");
                self.credentials.set(key);
            }
        }

        if !self.credentials.is_set() {
            warn!("Refusing to start session for {}: no credential", channel);
            self.notify_error(channel.as_str(), "no transcription credential configured")
                .await;
            return StartOutcome::MissingCredential;
        }

        let session = Arc::new(SessionState::new(channel.clone(), political_only));
        if !self.registry.try_register(Arc::clone(&session)) {
            info!("Session for {} already running, ignoring start", channel);
            return StartOutcome::AlreadyRunning;
        }

        info!(
            "Starting session for {} (political_only={})",
            channel, political_only
        );

        let worker = self.clone();
        tokio::spawn(async move { worker.run_session(session).await });

        StartOutcome::Started
    }

    /// Request a stop. Returns false when the channel has no session.
    ///
    /// Cooperative: the worker finishes its in-flight chunk, then exits and
    /// unregisters itself.
    pub fn stop_session(&self, channel: &str) -> bool {
        match self.registry.get(channel) {
            Some(session) => {
                info!("Stop requested for {}", channel);
                session.stop();
                true
            }
            None => {
                debug!("Stop requested for {} but no session exists", channel);
                false
            }
        }
    }

    /// Worker body for one session. The registry entry is dropped exactly
    /// once when this returns, whatever the exit path.
    async fn run_session(self, session: Arc<SessionState>) {
        let channel = session.channel().clone();
        let _guard = RegistryGuard::new(
            Arc::clone(&self.registry),
            channel.as_str().to_string(),
        );

        if let Err(e) = tokio::fs::create_dir_all(&self.config.workdir).await {
            error!("Cannot create workdir for {}: {}", channel, e);
            self.notify_error(channel.as_str(), format!("workdir unavailable: {}", e))
                .await;
            return;
        }

        // The first resolution is the only fatal step: without a stream URL
        // there is nothing to loop over.
        match self.resolver.resolve(&channel).await {
            Ok(url) => session.set_stream_url(url),
            Err(e) => {
                warn!("Session for {} failed to resolve: {}", channel, e);
                self.notify_error(channel.as_str(), e.to_string()).await;
                return;
            }
        }

        info!("Session for {} entering capture loop", channel);

        while session.is_running() {
            let seq = session.chunk_seq();
            let audio_path = self
                .config
                .workdir
                .join(format!("{}-{:05}.wav", channel.slug(), seq));

            match self.capture_and_transcribe(&session, &audio_path).await {
                Ok(text) => {
                    if text.trim().is_empty() {
                        debug!("Chunk {} of {} recognized no speech", seq, channel);
                    } else {
                        self.publish_chunk(&session, &text).await;
                    }
                }
                Err(e) => {
                    // Absorbed: the stream URL may have rotated, so refresh
                    // it and try again next chunk. No retry cap.
                    warn!("Chunk {} of {} failed: {}", seq, channel, e);
                    match self.resolver.resolve(&channel).await {
                        Ok(url) => session.set_stream_url(url),
                        Err(e) => {
                            warn!("Stream refresh for {} failed: {}", channel, e);
                        }
                    }
                }
            }

            // The segment is transient; it must be gone before the next
            // capture regardless of how this chunk went.
            let _ = tokio::fs::remove_file(&audio_path).await;

            session.advance_chunk();
            tokio::time::sleep(self.config.pause).await;
        }

        info!("Session for {} stopped", channel);
    }

    async fn capture_and_transcribe(
        &self,
        session: &SessionState,
        audio_path: &Path,
    ) -> Result<String, PipelineError> {
        let stream_url = session.stream_url().ok_or_else(|| PipelineError::Capture {
            message: "session has no stream URL".to_string(),
        })?;

        self.capturer
            .capture(&stream_url, audio_path, self.config.chunk_duration)
            .await?;

        self.transcriber.transcribe(audio_path).await
    }

    async fn publish_chunk(&self, session: &SessionState, text: &str) {
        let translation = self.translator.translate(text).await;
        let tags = classify(text);

        if session.political_only() && !tags.mentions_jayaweera && !tags.mentions_raveendran {
            debug!(
                "Chunk on {} has no tracked mentions, skipped by filter",
                session.channel()
            );
            return;
        }

        let event = TranscriptEvent::new(session.channel().as_str(), translation, tags);
        if let Err(e) = self.publisher.publish_transcript(&event).await {
            error!(
                "Failed to publish transcript for {}: {}",
                session.channel(),
                e
            );
        }
    }

    async fn notify_error(&self, channel: &str, message: impl Into<String>) {
        let event = TranscriptionErrorEvent::new(channel, message);
        if let Err(e) = self.publisher.publish_error(&event).await {
            error!("Failed to publish error event for {}: {}", channel, e);
        }
    }
}
