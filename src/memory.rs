//! Conversational memory seam
//!
//! Per-conversation key/value state surviving across turns. The backing
//! store is owned by the host; this crate reads and writes JSON blobs
//! through [`ConversationMemory`] and degrades to "absent" on anything
//! it cannot decode, so a conversation never gets stuck on corrupted
//! memory.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the remembered city is stored.
pub const CITY_KEY: &str = "city";

/// Key under which the dialog cursor is stored.
pub const DIALOG_KEY: &str = "dialog";

/// Store-level failure (I/O, backend unavailable).
#[derive(Debug, Clone, Error)]
#[error("conversation memory unavailable: {0}")]
pub struct MemoryError(pub String);

/// Per-conversation key/value store.
///
/// Values are opaque bytes to the store; this crate always writes JSON.
/// The host must serialize turns within one conversation id: entries
/// are read-modify-written across a turn with no locking here.
#[async_trait]
pub trait ConversationMemory: Send + Sync {
    async fn get(&self, conversation_id: &str, key: &str) -> Result<Option<Vec<u8>>, MemoryError>;

    async fn set(
        &self,
        conversation_id: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), MemoryError>;

    async fn remove(&self, conversation_id: &str, key: &str) -> Result<(), MemoryError>;
}

#[async_trait]
impl<T: ConversationMemory + ?Sized> ConversationMemory for Arc<T> {
    async fn get(&self, conversation_id: &str, key: &str) -> Result<Option<Vec<u8>>, MemoryError> {
        (**self).get(conversation_id, key).await
    }

    async fn set(
        &self,
        conversation_id: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), MemoryError> {
        (**self).set(conversation_id, key, value).await
    }

    async fn remove(&self, conversation_id: &str, key: &str) -> Result<(), MemoryError> {
        (**self).remove(conversation_id, key).await
    }
}

/// Read a typed value, treating every failure as absent.
///
/// Store errors and undecodable blobs are logged at `warn` and degrade
/// to `None` rather than propagating.
pub async fn recall<T: DeserializeOwned>(
    store: &dyn ConversationMemory,
    conversation_id: &str,
    key: &str,
) -> Option<T> {
    let bytes = match store.get(conversation_id, key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "memory read failed, treating as absent");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "undecodable memory entry, treating as absent");
            None
        }
    }
}

/// Write a typed value as JSON. Failures are logged, not surfaced; the
/// next turn simply observes the key as unchanged or absent.
pub async fn memorize<T: Serialize>(
    store: &dyn ConversationMemory,
    conversation_id: &str,
    key: &str,
    value: &T,
) {
    let bytes = match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not serialize memory entry");
            return;
        }
    };
    if let Err(e) = store.set(conversation_id, key, bytes).await {
        tracing::warn!(key, error = %e, "memory write failed");
    }
}

/// Remove a key. Failures are logged, not surfaced.
pub async fn forget(store: &dyn ConversationMemory, conversation_id: &str, key: &str) {
    if let Err(e) = store.remove(conversation_id, key).await {
        tracing::warn!(key, error = %e, "memory remove failed");
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// `Mutex<HashMap>`-backed store for tests and embedded hosts.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<(String, String), Vec<u8>>>, MemoryError> {
        self.entries
            .lock()
            .map_err(|e| MemoryError(format!("store lock poisoned: {e}")))
    }
}

#[async_trait]
impl ConversationMemory for InMemoryStore {
    async fn get(&self, conversation_id: &str, key: &str) -> Result<Option<Vec<u8>>, MemoryError> {
        let entries = self.lock()?;
        Ok(entries
            .get(&(conversation_id.to_string(), key.to_string()))
            .cloned())
    }

    async fn set(
        &self,
        conversation_id: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), MemoryError> {
        let mut entries = self.lock()?;
        entries.insert((conversation_id.to_string(), key.to_string()), value);
        Ok(())
    }

    async fn remove(&self, conversation_id: &str, key: &str) -> Result<(), MemoryError> {
        let mut entries = self.lock()?;
        entries.remove(&(conversation_id.to_string(), key.to_string()));
        Ok(())
    }
}
