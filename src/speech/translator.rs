use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::credentials::CredentialStore;

const SYSTEM_PROMPT: &str = "You translate transcripts of Sri Lankan political \
speeches. The input may be Sinhala, Tamil, or English. Respond with only a JSON \
object of the form {\"english\": \"...\", \"tamil\": \"...\"} holding the English \
and Tamil translations of the input.";

/// A transcript chunk in its original language plus the two renditions the
/// campaign dashboards display side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub original: String,
    pub english: String,
    pub tamil: String,
}

impl Translation {
    /// Degraded-mode result: every rendition is the untranslated input.
    pub fn passthrough(text: &str) -> Self {
        Self {
            original: text.to_string(),
            english: text.to_string(),
            tamil: text.to_string(),
        }
    }
}

/// Produces parallel-language renditions of recognized text.
///
/// Infallible by contract: implementations degrade to pass-through rather
/// than surfacing errors, because a missing translation must never cost a
/// transcript chunk.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Translation;
}

/// Shape of the JSON object the model is instructed to return. Both fields
/// are optional so a half-formed reply still contributes what it has.
#[derive(Debug, Deserialize)]
struct TranslationFields {
    english: Option<String>,
    tamil: Option<String>,
}

/// Translator backed by a chat-completion endpoint.
pub struct ChatTranslator {
    client: reqwest::Client,
    credentials: Arc<CredentialStore>,
    api_base: String,
    model: String,
}

impl ChatTranslator {
    pub fn new(credentials: Arc<CredentialStore>, api_base: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            api_base,
            model,
        }
    }

    async fn request_translation(&self, api_key: &str, text: &str) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));

        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0.2,
            "response_format": {"type": "json_object"},
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": text},
            ],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error {}: {}", status, body);
        }

        let json: serde_json::Value = response.json().await?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("response carried no message content"))?;

        Ok(content.to_string())
    }
}

/// Fill a [`Translation`] from the model's reply, falling back to the source
/// text for each field the reply is missing or that fails to parse.
fn translation_from_reply(original: &str, reply: &str) -> Translation {
    let fields: TranslationFields = match serde_json::from_str(reply) {
        Ok(f) => f,
        Err(e) => {
            warn!("Malformed translation response ({}), using pass-through", e);
            return Translation::passthrough(original);
        }
    };

    Translation {
        original: original.to_string(),
        english: fields.english.unwrap_or_else(|| original.to_string()),
        tamil: fields.tamil.unwrap_or_else(|| original.to_string()),
    }
}

#[async_trait]
impl Translator for ChatTranslator {
    async fn translate(&self, text: &str) -> Translation {
        let Some(api_key) = self.credentials.get() else {
            return Translation::passthrough(text);
        };

        match self.request_translation(&api_key, text).await {
            Ok(reply) => translation_from_reply(text, &reply),
            Err(e) => {
                warn!("Translation failed ({}), using pass-through", e);
                Translation::passthrough(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reply_fills_both_renditions() {
        let reply = r#"{"english": "We will win", "tamil": "நாம் வெல்வோம்"}"#;
        let t = translation_from_reply("අපි දිනනවා", reply);
        assert_eq!(t.original, "අපි දිනනවා");
        assert_eq!(t.english, "We will win");
        assert_eq!(t.tamil, "நாம் வெல்வோம்");
    }

    #[test]
    fn test_missing_field_falls_back_individually() {
        let reply = r#"{"english": "We will win"}"#;
        let t = translation_from_reply("අපි දිනනවා", reply);
        assert_eq!(t.english, "We will win");
        assert_eq!(t.tamil, "අපි දිනනවා");
    }

    #[test]
    fn test_malformed_reply_degrades_to_passthrough() {
        let t = translation_from_reply("hello", "not json at all");
        assert_eq!(t, Translation::passthrough("hello"));
    }

    #[test]
    fn test_passthrough_of_empty_string() {
        let t = Translation::passthrough("");
        assert_eq!(t.original, "");
        assert_eq!(t.english, "");
        assert_eq!(t.tamil, "");
    }
}
