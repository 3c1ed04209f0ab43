//! Dialog driver
//!
//! Loads the persisted cursor and remembered city, runs the pure step,
//! executes its memory effects, persists the new cursor, and renders
//! the reply. All dialog I/O lives here; the transition stays pure.

use super::state::{DialogCursor, Extraction, MemoryEffect, StepReply};
use super::transition::{needs_input, step};
use crate::config::RecallPolicy;
use crate::memory::{self, ConversationMemory};
use crate::message::Msg;
use crate::resolver::CityResolver;
use crate::weather::WeatherReport;
use std::sync::Arc;

pub struct DialogDriver {
    resolver: Arc<CityResolver>,
    report: Arc<WeatherReport>,
    store: Arc<dyn ConversationMemory>,
    policy: RecallPolicy,
}

impl DialogDriver {
    pub fn new(
        resolver: Arc<CityResolver>,
        report: Arc<WeatherReport>,
        store: Arc<dyn ConversationMemory>,
        policy: RecallPolicy,
    ) -> Self {
        Self {
            resolver,
            report,
            store,
            policy,
        }
    }

    /// Run one dialog turn. An empty reply means "nothing to say".
    pub async fn next(&self, msg: &Msg) -> String {
        let conversation_id = msg.conversation_id.as_str();

        let cursor: DialogCursor =
            memory::recall(self.store.as_ref(), conversation_id, memory::DIALOG_KEY)
                .await
                .unwrap_or_default();
        let remembered = self.resolver.remembered(conversation_id).await;

        // The extractor is only consulted on turns the collect-city
        // state will actually consume.
        let extraction = if needs_input(cursor, remembered.is_some(), self.policy) {
            match self.resolver.extract_only(msg).await {
                Ok(Some(city)) => Extraction::City(city),
                Ok(None) => Extraction::None,
                Err(e) => {
                    tracing::warn!(
                        conversation = conversation_id,
                        error = %e,
                        "city extraction failed mid-dialog"
                    );
                    Extraction::Failed
                }
            }
        } else {
            Extraction::None
        };

        let outcome = step(cursor, remembered, &extraction, self.policy);

        for effect in &outcome.effects {
            match effect {
                MemoryEffect::StoreCity(city) => {
                    self.resolver.remember(conversation_id, city).await;
                }
                MemoryEffect::ClearCity => self.resolver.forget(conversation_id).await,
            }
        }
        memory::memorize(
            self.store.as_ref(),
            conversation_id,
            memory::DIALOG_KEY,
            &outcome.next,
        )
        .await;

        match outcome.reply {
            StepReply::Silence => String::new(),
            StepReply::Prompt(text) => text,
            StepReply::Weather(city) => self.report.for_city(&city).await,
        }
    }
}
