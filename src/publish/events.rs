use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{ContentTags, Sentiment};
use crate::speech::Translation;

/// One published transcript chunk.
///
/// Built exactly once per non-empty recognized chunk and never mutated;
/// delivery is fire-and-forget to whoever is subscribed at publish time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEvent {
    /// Channel id plus epoch milliseconds, unique enough for a live feed
    pub id: String,
    pub channel_id: String,
    /// RFC 3339 timestamp of when the chunk was processed
    pub timestamp: String,
    /// Recognized text in the speaker's language
    pub original: String,
    pub english: String,
    pub tamil: String,
    pub mentions_jayaweera: bool,
    pub mentions_raveendran: bool,
    pub sentiment: Sentiment,
}

impl TranscriptEvent {
    pub fn new(channel_id: &str, translation: Translation, tags: ContentTags) -> Self {
        let now: DateTime<Utc> = Utc::now();
        Self {
            id: format!("{}-{}", channel_id, now.timestamp_millis()),
            channel_id: channel_id.to_string(),
            timestamp: now.to_rfc3339(),
            original: translation.original,
            english: translation.english,
            tamil: translation.tamil,
            mentions_jayaweera: tags.mentions_jayaweera,
            mentions_raveendran: tags.mentions_raveendran,
            sentiment: tags.sentiment,
        }
    }
}

/// Emitted when a session fails before producing any output, or when no
/// credential is available at start time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionErrorEvent {
    pub channel_id: String,
    pub error: String,
    pub timestamp: String,
}

impl TranscriptionErrorEvent {
    pub fn new(channel_id: &str, error: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            error: error.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
