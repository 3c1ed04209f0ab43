//! The weather skill: turn dispatch and host registration
//!
//! One externally invoked operation per message: [`WeatherSkill::handle_turn`].
//! The keyword vocabulary runs first; when it defers, the dialog
//! machine takes over.
//!
//! Precondition: the host serializes turns within a conversation.
//! Memory and the dialog cursor are read-modify-written across a turn
//! with no locking here, so at most one in-flight turn per conversation
//! id is assumed. Distinct conversations may be handled concurrently.

use crate::config::SkillConfig;
use crate::dialog::DialogDriver;
use crate::handlers::{CurrentConditions, RainingCheck};
use crate::memory::ConversationMemory;
use crate::message::Msg;
use crate::nlp::CityExtractor;
use crate::resolver::CityResolver;
use crate::vocab::{KeywordOutcome, Trigger, VocabEntry, Vocabulary};
use crate::weather::{HttpWeatherProvider, WeatherProvider, WeatherReport};
use std::sync::Arc;

pub const SKILL_NAME: &str = "weather";

pub struct WeatherSkill {
    vocabulary: Vocabulary,
    dialog: DialogDriver,
}

impl WeatherSkill {
    /// Wire the skill from its external collaborators, once at startup.
    pub fn new(
        config: &SkillConfig,
        extractor: Arc<dyn CityExtractor>,
        store: Arc<dyn ConversationMemory>,
        provider: Arc<dyn WeatherProvider>,
    ) -> Self {
        let resolver = Arc::new(CityResolver::new(extractor, store.clone()));
        let report = Arc::new(WeatherReport::new(provider));

        let vocabulary = Vocabulary::new(vec![
            VocabEntry {
                trigger: Trigger::new(
                    &["what", "show", "tell"],
                    &["weather", "temperature", "temp", "outside"],
                ),
                handler: Arc::new(CurrentConditions::new(resolver.clone(), report.clone())),
            },
            VocabEntry {
                trigger: Trigger::new(&["tell", "is"], &["rain"]),
                handler: Arc::new(RainingCheck::new(resolver.clone(), report.clone())),
            },
        ]);

        let dialog = DialogDriver::new(resolver, report, store, config.recall_policy);

        Self { vocabulary, dialog }
    }

    /// Convenience constructor using the production HTTP provider built
    /// from `config`.
    pub fn with_http_provider(
        config: &SkillConfig,
        extractor: Arc<dyn CityExtractor>,
        store: Arc<dyn ConversationMemory>,
    ) -> Self {
        let provider = Arc::new(HttpWeatherProvider::new(config));
        Self::new(config, extractor, store, provider)
    }

    /// Trigger the host router should register for this skill, so only
    /// plausibly weather-related messages reach [`Self::handle_turn`].
    pub fn trigger() -> Trigger {
        Trigger::new(
            &["what", "show", "tell", "is", "how"],
            &["weather", "temperature", "temp", "outside", "raining"],
        )
    }

    /// Handle one turn. An empty reply means the skill has nothing to
    /// say for this message.
    pub async fn handle_turn(&self, msg: &Msg) -> String {
        match self.vocabulary.dispatch(msg).await {
            KeywordOutcome::Handled(text) => text,
            KeywordOutcome::Deferred => self.dialog.next(msg).await,
        }
    }
}
