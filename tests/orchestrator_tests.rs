// Scenario tests for the session orchestrator, run against in-memory stage
// fakes at millisecond cadence. These pin the lifecycle rules: what is fatal,
// what is absorbed, and when events reach the publisher.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;
use vedika::session::{Orchestrator, PipelineConfig, SessionRegistry, StartOutcome};
use vedika::{
    AudioCapturer, ChannelId, CredentialStore, EventPublisher, PipelineError, StreamResolver,
    Transcriber, Translation, Translator, TranscriptEvent, TranscriptionErrorEvent,
};

// ============================================================================
// Stage fakes
// ============================================================================

struct FakeResolver {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeResolver {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamResolver for FakeResolver {
    async fn resolve(&self, channel: &ChannelId) -> Result<String, PipelineError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(PipelineError::Resolution {
                channel: channel.to_string(),
                message: "no live broadcast".to_string(),
            })
        } else {
            Ok(format!("https://cdn.example/{}/{}.m3u8", channel.slug(), n))
        }
    }
}

struct FakeCapturer {
    fail: bool,
}

#[async_trait]
impl AudioCapturer for FakeCapturer {
    async fn capture(
        &self,
        _stream_url: &str,
        _dest: &Path,
        _duration: Duration,
    ) -> Result<(), PipelineError> {
        if self.fail {
            Err(PipelineError::Capture {
                message: "connection reset".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

struct FakeTranscriber {
    text: String,
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> Result<String, PipelineError> {
        Ok(self.text.clone())
    }
}

struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str) -> Translation {
        Translation::passthrough(text)
    }
}

#[derive(Default)]
struct MemoryPublisher {
    transcripts: Mutex<Vec<TranscriptEvent>>,
    errors: Mutex<Vec<TranscriptionErrorEvent>>,
}

impl MemoryPublisher {
    fn transcript_count(&self) -> usize {
        self.transcripts.lock().unwrap().len()
    }

    fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish_transcript(&self, event: &TranscriptEvent) -> Result<()> {
        self.transcripts.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn publish_error(&self, event: &TranscriptionErrorEvent) -> Result<()> {
        self.errors.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    orchestrator: Orchestrator,
    registry: Arc<SessionRegistry>,
    publisher: Arc<MemoryPublisher>,
    resolver: Arc<FakeResolver>,
    _workdir: TempDir,
}

fn harness(
    resolver: Arc<FakeResolver>,
    capture_fails: bool,
    recognized_text: &str,
    with_credential: bool,
) -> Harness {
    let workdir = TempDir::new().expect("tempdir");
    let registry = Arc::new(SessionRegistry::new());
    let publisher = Arc::new(MemoryPublisher::default());

    let credentials = if with_credential {
        Arc::new(CredentialStore::new(Some("sk-test".to_string())))
    } else {
        Arc::new(CredentialStore::new(None))
    };

    let config = PipelineConfig {
        chunk_duration: Duration::from_millis(10),
        pause: Duration::from_millis(10),
        workdir: workdir.path().to_path_buf(),
    };

    let orchestrator = Orchestrator::new(
        Arc::clone(&registry),
        credentials,
        Arc::clone(&resolver) as Arc<dyn StreamResolver>,
        Arc::new(FakeCapturer {
            fail: capture_fails,
        }),
        Arc::new(FakeTranscriber {
            text: recognized_text.to_string(),
        }),
        Arc::new(PassthroughTranslator),
        Arc::clone(&publisher) as Arc<dyn EventPublisher>,
        config,
    );

    Harness {
        orchestrator,
        registry,
        publisher,
        resolver,
        _workdir: workdir,
    }
}

/// Poll until `predicate` holds, or panic after two seconds.
async fn wait_until(what: &str, predicate: impl Fn() -> bool) {
    for _ in 0..200 {
        if predicate() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting until {}", what);
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_start_without_credential_publishes_error_and_registers_nothing() {
    let h = harness(FakeResolver::ok(), false, "hello", false);

    let outcome = h
        .orchestrator
        .start_session(ChannelId::new("@examplechannel"), None, false)
        .await;

    assert_eq!(outcome, StartOutcome::MissingCredential);
    assert_eq!(h.publisher.error_count(), 1);
    assert!(h.registry.get("@examplechannel").is_none());
    assert_eq!(h.resolver.calls(), 0);
}

#[tokio::test]
async fn test_start_request_can_supply_the_credential() {
    let h = harness(FakeResolver::ok(), false, "hello world", false);

    let outcome = h
        .orchestrator
        .start_session(
            ChannelId::new("@newsfirst"),
            Some("sk-from-request".to_string()),
            false,
        )
        .await;

    assert_eq!(outcome, StartOutcome::Started);
    wait_until("a transcript is published", || {
        h.publisher.transcript_count() >= 1
    })
    .await;

    h.orchestrator.stop_session("@newsfirst");
    wait_until("the session unregisters", || {
        h.registry.get("@newsfirst").is_none()
    })
    .await;
}

#[tokio::test]
async fn test_initial_resolution_failure_ends_the_session() {
    let h = harness(FakeResolver::failing(), false, "hello", true);

    let outcome = h
        .orchestrator
        .start_session(ChannelId::new("@newsfirst"), None, false)
        .await;
    assert_eq!(outcome, StartOutcome::Started);

    wait_until("the session unregisters", || {
        h.registry.get("@newsfirst").is_none()
    })
    .await;

    assert_eq!(h.publisher.error_count(), 1);
    assert_eq!(h.publisher.transcript_count(), 0);
}

#[tokio::test]
async fn test_capture_failures_are_absorbed_with_reresolution() {
    let h = harness(FakeResolver::ok(), true, "hello", true);

    h.orchestrator
        .start_session(ChannelId::new("UC12345"), None, false)
        .await;

    // Initial resolve plus one refresh per failed chunk
    wait_until("several re-resolutions happen", || h.resolver.calls() >= 4).await;

    assert_eq!(h.publisher.transcript_count(), 0);
    assert!(h.registry.get("UC12345").is_some(), "session must survive");
    // Mid-loop failures never become error events
    assert_eq!(h.publisher.error_count(), 0);

    h.orchestrator.stop_session("UC12345");
    wait_until("the session unregisters", || {
        h.registry.get("UC12345").is_none()
    })
    .await;
}

#[tokio::test]
async fn test_political_filter_drops_chunks_without_mentions() {
    let h = harness(FakeResolver::ok(), false, "the weather is pleasant", true);

    h.orchestrator
        .start_session(ChannelId::new("@newsfirst"), None, true)
        .await;

    // Let a few chunks go through the loop
    wait_until("a few chunks are processed", || {
        h.registry
            .get("@newsfirst")
            .map(|s| s.chunk_seq() >= 3)
            .unwrap_or(false)
    })
    .await;

    assert_eq!(
        h.publisher.transcript_count(),
        0,
        "non-political chunks must not be published"
    );

    h.orchestrator.stop_session("@newsfirst");
    wait_until("the session unregisters", || {
        h.registry.get("@newsfirst").is_none()
    })
    .await;
}

#[tokio::test]
async fn test_political_filter_passes_chunks_with_mentions() {
    let h = harness(
        FakeResolver::ok(),
        false,
        "Jayaweera spoke of victory",
        true,
    );

    h.orchestrator
        .start_session(ChannelId::new("@newsfirst"), None, true)
        .await;

    wait_until("a transcript is published", || {
        h.publisher.transcript_count() >= 1
    })
    .await;

    let event = h.publisher.transcripts.lock().unwrap()[0].clone();
    assert!(event.mentions_jayaweera);
    assert_eq!(event.original, "Jayaweera spoke of victory");
    assert_eq!(event.english, event.original, "pass-through translator");

    h.orchestrator.stop_session("@newsfirst");
    wait_until("the session unregisters", || {
        h.registry.get("@newsfirst").is_none()
    })
    .await;
}

#[tokio::test]
async fn test_empty_recognition_publishes_nothing_but_advances() {
    let h = harness(FakeResolver::ok(), false, "   ", true);

    h.orchestrator
        .start_session(ChannelId::new("@newsfirst"), None, false)
        .await;

    wait_until("chunks advance", || {
        h.registry
            .get("@newsfirst")
            .map(|s| s.chunk_seq() >= 2)
            .unwrap_or(false)
    })
    .await;

    assert_eq!(h.publisher.transcript_count(), 0);

    h.orchestrator.stop_session("@newsfirst");
    wait_until("the session unregisters", || {
        h.registry.get("@newsfirst").is_none()
    })
    .await;
}

#[tokio::test]
async fn test_duplicate_start_is_a_no_op() {
    let h = harness(FakeResolver::ok(), false, "hello world", true);

    let first = h
        .orchestrator
        .start_session(ChannelId::new("@newsfirst"), None, false)
        .await;
    let second = h
        .orchestrator
        .start_session(ChannelId::new("@newsfirst"), None, false)
        .await;

    assert_eq!(first, StartOutcome::Started);
    assert_eq!(second, StartOutcome::AlreadyRunning);
    assert_eq!(h.registry.active_channels().len(), 1);

    h.orchestrator.stop_session("@newsfirst");
    wait_until("the session unregisters", || {
        h.registry.get("@newsfirst").is_none()
    })
    .await;
}

#[tokio::test]
async fn test_stop_ends_the_loop_and_emits_no_further_events() {
    let h = harness(FakeResolver::ok(), false, "hello world", true);

    h.orchestrator
        .start_session(ChannelId::new("@newsfirst"), None, false)
        .await;

    wait_until("a transcript is published", || {
        h.publisher.transcript_count() >= 1
    })
    .await;

    assert!(h.orchestrator.stop_session("@newsfirst"));
    wait_until("the session unregisters", || {
        h.registry.get("@newsfirst").is_none()
    })
    .await;

    // Once unregistered, the worker is gone: the event count must freeze.
    let count = h.publisher.transcript_count();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(h.publisher.transcript_count(), count);
}

#[tokio::test]
async fn test_stop_on_absent_channel_is_a_no_op() {
    let h = harness(FakeResolver::ok(), false, "hello", true);
    assert!(!h.orchestrator.stop_session("@nobody"));
}
