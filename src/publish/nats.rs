use anyhow::{Context, Result};
use async_nats::Client;
use async_trait::async_trait;
use tracing::info;

use super::events::{TranscriptEvent, TranscriptionErrorEvent};
use super::EventPublisher;
use crate::channel::ChannelId;

/// Publishes transcript events over NATS.
///
/// Transcripts go to `transcript.live.{slug}` and error notifications to
/// `transcript.error.{slug}`; dashboards subscribe to `transcript.>`.
pub struct NatsPublisher {
    client: Client,
}

impl NatsPublisher {
    /// Connect to the NATS server
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client })
    }

    fn subject(prefix: &str, channel_id: &str) -> String {
        format!("{}.{}", prefix, ChannelId::new(channel_id).slug())
    }
}

#[async_trait]
impl EventPublisher for NatsPublisher {
    async fn publish_transcript(&self, event: &TranscriptEvent) -> Result<()> {
        let subject = Self::subject("transcript.live", &event.channel_id);
        let payload = serde_json::to_vec(event)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish transcript event")?;

        info!(
            "Published transcript to {} (id={}, sentiment={:?})",
            subject, event.id, event.sentiment
        );

        Ok(())
    }

    async fn publish_error(&self, event: &TranscriptionErrorEvent) -> Result<()> {
        let subject = Self::subject("transcript.error", &event.channel_id);
        let payload = serde_json::to_vec(event)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish error event")?;

        info!("Published error event to {}: {}", subject, event.error);

        Ok(())
    }
}
