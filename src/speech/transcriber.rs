use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::credentials::CredentialStore;
use crate::error::PipelineError;

/// Converts a captured audio segment into recognized text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `audio_path`.
    ///
    /// An empty string is a valid result (silence, music, crowd noise).
    async fn transcribe(&self, audio_path: &Path) -> Result<String, PipelineError>;
}

/// Speech-to-text over the OpenAI transcription endpoint.
pub struct WhisperApiTranscriber {
    client: reqwest::Client,
    credentials: Arc<CredentialStore>,
    api_base: String,
    model: String,
}

impl WhisperApiTranscriber {
    pub fn new(credentials: Arc<CredentialStore>, api_base: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            api_base,
            model,
        }
    }
}

#[async_trait]
impl Transcriber for WhisperApiTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, PipelineError> {
        let api_key = self
            .credentials
            .get()
            .ok_or(PipelineError::MissingCredential)?;

        let wav_bytes = tokio::fs::read(audio_path).await?;
        debug!(
            "Transcribing {} ({} bytes)",
            audio_path.display(),
            wav_bytes.len()
        );

        let part = reqwest::multipart::Part::bytes(wav_bytes)
            .file_name("chunk.wav")
            .mime_str("audio/wav")
            .map_err(|e| PipelineError::Transcription {
                message: e.to_string(),
            })?;

        // No language hint: the endpoint rejects Sinhala as an explicit
        // language, so detection is left to the model.
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone());

        let url = format!(
            "{}/audio/transcriptions",
            self.api_base.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PipelineError::Transcription {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Transcription {
                message: format!("API error {}: {}", status, body),
            });
        }

        let json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| PipelineError::Transcription {
                    message: e.to_string(),
                })?;

        Ok(json["text"].as_str().unwrap_or("").to_string())
    }
}
