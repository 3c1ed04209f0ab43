//! Weathervane — a conversational weather skill
//!
//! One pluggable skill for a host assistant: given a short utterance,
//! decide whether it is a weather request, resolve a city from the
//! message or conversational memory, fetch current conditions, and
//! render a templated reply. Keyword triggers answer in one shot when
//! they can; a small two-state dialog collects the city across turns
//! when they cannot.
//!
//! The host owns message routing, token extraction, the memory
//! backend, and skill registration; this crate sees them as the
//! [`CityExtractor`], [`ConversationMemory`], and [`WeatherProvider`]
//! traits plus the registration [`Trigger`].

mod config;
mod dialog;
mod handlers;
mod memory;
mod message;
mod nlp;
mod resolver;
mod skill;
mod vocab;
mod weather;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{RecallPolicy, SkillConfig, DEFAULT_WEATHER_URL};
pub use memory::{ConversationMemory, InMemoryStore, MemoryError, CITY_KEY, DIALOG_KEY};
pub use message::{Msg, StructuredInput};
pub use nlp::{City, CityExtractor, ExtractError};
pub use resolver::CityResolver;
pub use skill::{WeatherSkill, SKILL_NAME};
pub use vocab::{KeywordHandler, KeywordOutcome, Trigger, VocabEntry, Vocabulary};
pub use weather::{
    Conditions, HttpWeatherProvider, WeatherError, WeatherProvider, WeatherReport, APOLOGY,
};
