//! City resolution
//!
//! A freshly extracted city always beats the remembered one, so
//! "actually, I'm in Boston" corrections win without ceremony. Memory
//! is only consulted when extraction finds nothing; a hard extraction
//! failure propagates with no fallback attempted.

use crate::memory::{self, ConversationMemory};
use crate::message::Msg;
use crate::nlp::{City, CityExtractor, ExtractError};
use std::sync::Arc;

pub struct CityResolver {
    extractor: Arc<dyn CityExtractor>,
    store: Arc<dyn ConversationMemory>,
}

impl CityResolver {
    pub fn new(extractor: Arc<dyn CityExtractor>, store: Arc<dyn ConversationMemory>) -> Self {
        Self { extractor, store }
    }

    /// Full resolution: extraction first, remembered city second,
    /// `None` (not found) third.
    pub async fn resolve(&self, msg: &Msg) -> Result<Option<City>, ExtractError> {
        if let Some(city) = self.extract_only(msg).await? {
            return Ok(Some(city));
        }
        Ok(self.remembered(&msg.conversation_id).await)
    }

    /// Extraction-only step: first candidate wins, memory is ignored.
    /// Used by the collect-city dialog state, which stores the result
    /// itself.
    pub async fn extract_only(&self, msg: &Msg) -> Result<Option<City>, ExtractError> {
        let mut candidates = self.extractor.extract(msg).await?;
        if candidates.is_empty() {
            tracing::debug!(conversation = %msg.conversation_id, "no city extracted");
            return Ok(None);
        }
        Ok(Some(candidates.remove(0)))
    }

    /// The city remembered for this conversation, if any. Corrupt
    /// entries read as absent.
    pub async fn remembered(&self, conversation_id: &str) -> Option<City> {
        memory::recall(self.store.as_ref(), conversation_id, memory::CITY_KEY).await
    }

    /// Remember `city` for this conversation.
    pub async fn remember(&self, conversation_id: &str, city: &City) {
        memory::memorize(self.store.as_ref(), conversation_id, memory::CITY_KEY, city).await;
    }

    /// Drop the remembered city.
    pub async fn forget(&self, conversation_id: &str) {
        memory::forget(self.store.as_ref(), conversation_id, memory::CITY_KEY).await;
    }
}
