use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channel::ChannelId;

/// Live state of one channel's transcription run.
///
/// Mutated only by its own worker (stream URL refresh, chunk counter) and by
/// a stop request (running flag). Everything else reads snapshots.
pub struct SessionState {
    channel: ChannelId,
    political_only: bool,
    running: AtomicBool,
    chunk_seq: AtomicU64,
    stream_url: RwLock<Option<String>>,
    started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(channel: ChannelId, political_only: bool) -> Self {
        Self {
            channel,
            political_only,
            running: AtomicBool::new(true),
            chunk_seq: AtomicU64::new(0),
            stream_url: RwLock::new(None),
            started_at: Utc::now(),
        }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    pub fn political_only(&self) -> bool {
        self.political_only
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Cooperative stop: the worker observes this at the top of its next
    /// iteration; in-flight external calls are allowed to finish.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn chunk_seq(&self) -> u64 {
        self.chunk_seq.load(Ordering::SeqCst)
    }

    pub fn advance_chunk(&self) {
        self.chunk_seq.fetch_add(1, Ordering::SeqCst);
    }

    pub fn stream_url(&self) -> Option<String> {
        self.stream_url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_stream_url(&self, url: String) {
        let mut guard = self
            .stream_url
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(url);
    }

    pub fn snapshot(&self) -> SessionStatus {
        SessionStatus {
            channel_id: self.channel.as_str().to_string(),
            running: self.is_running(),
            political_only: self.political_only,
            chunks_processed: self.chunk_seq(),
            stream_resolved: self.stream_url().is_some(),
            started_at: self.started_at,
        }
    }
}

/// Serializable view of a session for the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub channel_id: String,
    pub running: bool,
    pub political_only: bool,
    pub chunks_processed: u64,
    pub stream_resolved: bool,
    pub started_at: DateTime<Utc>,
}

/// Process-wide map of active sessions, one per channel at most.
///
/// Synchronous API over a plain mutex: the lock is never held across an
/// await, and keeping it sync lets [`RegistryGuard`] unregister from `Drop`
/// on every worker exit path, panics included.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Arc<SessionState>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<SessionState>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a session under its channel id.
    ///
    /// Returns false (and changes nothing) when the channel already has a
    /// session; the caller must not start a second worker.
    pub fn try_register(&self, session: Arc<SessionState>) -> bool {
        let mut sessions = self.lock();
        let key = session.channel().as_str().to_string();
        if sessions.contains_key(&key) {
            return false;
        }
        sessions.insert(key, session);
        true
    }

    pub fn unregister(&self, channel: &str) -> Option<Arc<SessionState>> {
        self.lock().remove(channel)
    }

    pub fn get(&self, channel: &str) -> Option<Arc<SessionState>> {
        self.lock().get(channel).cloned()
    }

    pub fn is_running(&self, channel: &str) -> bool {
        self.lock()
            .get(channel)
            .map(|s| s.is_running())
            .unwrap_or(false)
    }

    pub fn active_channels(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}

/// Removes a session from the registry when dropped.
///
/// A worker holds one of these for its whole lifetime, so the registry entry
/// disappears exactly once however the worker exits.
pub struct RegistryGuard {
    registry: Arc<SessionRegistry>,
    channel: String,
}

impl RegistryGuard {
    pub fn new(registry: Arc<SessionRegistry>, channel: String) -> Self {
        Self { registry, channel }
    }
}

impl Drop for RegistryGuard {
    fn drop(&mut self) {
        if self.registry.unregister(&self.channel).is_some() {
            debug!("Session for {} removed from registry", self.channel);
        }
    }
}
