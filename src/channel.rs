//! Channel identifiers and their mapping onto live-stream page URLs.

use std::fmt;

/// Prefix of canonical YouTube channel IDs (`UCxxxx...`).
const CHANNEL_ID_PREFIX: &str = "UC";

/// A monitored channel, as supplied by the client.
///
/// Two shapes are accepted: a handle (`@newsfirst`) or a canonical channel ID
/// (`UCxxxx...`). Anything else is treated as a bare handle; a malformed
/// identifier therefore surfaces as a resolution failure rather than being
/// rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The live-broadcast page URL for this channel.
    ///
    /// The branch order matters: a handle marker wins over everything, then
    /// the canonical ID prefix, then bare strings fall back to handle form.
    pub fn page_url(&self) -> String {
        if self.0.starts_with('@') {
            format!("https://www.youtube.com/{}/live", self.0)
        } else if self.0.starts_with(CHANNEL_ID_PREFIX) {
            format!("https://www.youtube.com/channel/{}/live", self.0)
        } else {
            format!("https://www.youtube.com/@{}/live", self.0)
        }
    }

    /// Filesystem- and subject-safe form of the identifier.
    ///
    /// Keeps `[A-Za-z0-9_-]`, maps everything else to `-`. Used to namespace
    /// chunk files on disk and NATS subjects.
    pub fn slug(&self) -> String {
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
