//! Shared holder for the speech/translation API credential.

use std::sync::{PoisonError, RwLock};

/// At most one active API key for the transcription and translation
/// capability, shared by every session.
///
/// Seeded from configuration at startup or from the first start request that
/// carries a key; later initializations replace the previous key. Constructed
/// explicitly and injected, so its lifetime is tied to the service rather
/// than to module load.
#[derive(Debug, Default)]
pub struct CredentialStore {
    key: RwLock<Option<String>>,
}

impl CredentialStore {
    pub fn new(initial: Option<String>) -> Self {
        // Treat an empty string from config the same as no key at all.
        let initial = initial.filter(|k| !k.trim().is_empty());
        Self {
            key: RwLock::new(initial),
        }
    }

    /// Install or replace the active key.
    pub fn set(&self, key: impl Into<String>) {
        let mut guard = self.key.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(key.into());
    }

    pub fn get(&self) -> Option<String> {
        self.key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_set(&self) -> bool {
        self.key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
