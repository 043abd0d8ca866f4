//! Outbound event delivery.
//!
//! The pipeline broadcasts two event kinds to whoever is currently listening:
//! transcript chunks and terminal error notifications. Delivery is
//! fire-and-forget; nothing is stored or replayed.

pub mod events;
pub mod nats;

use anyhow::Result;
use async_trait::async_trait;

pub use events::{TranscriptEvent, TranscriptionErrorEvent};
pub use nats::NatsPublisher;

/// Sink for published events. NATS in production; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish_transcript(&self, event: &TranscriptEvent) -> Result<()>;

    async fn publish_error(&self, event: &TranscriptionErrorEvent) -> Result<()>;
}
