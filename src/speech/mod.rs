//! Speech-to-text and translation adapters.
//!
//! Both talk to an external capability over HTTP and share the injected
//! [`CredentialStore`](crate::credentials::CredentialStore). Transcription
//! failures are errors the session worker absorbs; translation failures never
//! surface at all.

pub mod transcriber;
pub mod translator;

pub use transcriber::{Transcriber, WhisperApiTranscriber};
pub use translator::{ChatTranslator, Translation, Translator};
