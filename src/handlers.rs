//! Keyword handlers
//!
//! The two single-shot answers this skill can give without starting a
//! dialog: current conditions, and the raining yes/no check. Both
//! resolve a city first (fresh extraction, then memory) and defer when
//! none is known, letting the dialog machine ask the user.

use crate::message::Msg;
use crate::resolver::CityResolver;
use crate::vocab::{KeywordHandler, KeywordOutcome};
use crate::weather::{WeatherReport, APOLOGY};
use async_trait::async_trait;
use std::sync::Arc;

/// "what's the weather" and friends.
pub struct CurrentConditions {
    resolver: Arc<CityResolver>,
    report: Arc<WeatherReport>,
}

impl CurrentConditions {
    pub fn new(resolver: Arc<CityResolver>, report: Arc<WeatherReport>) -> Self {
        Self { resolver, report }
    }
}

#[async_trait]
impl KeywordHandler for CurrentConditions {
    async fn handle(&self, msg: &Msg) -> KeywordOutcome {
        match self.resolver.resolve(msg).await {
            Ok(Some(city)) => KeywordOutcome::Handled(self.report.for_city(&city).await),
            Ok(None) => KeywordOutcome::Deferred,
            Err(e) => {
                tracing::warn!(conversation = %msg.conversation_id, error = %e, "city extraction failed");
                KeywordOutcome::Handled(APOLOGY.to_string())
            }
        }
    }
}

/// "is it raining" — answered from the rendered conditions sentence.
pub struct RainingCheck {
    resolver: Arc<CityResolver>,
    report: Arc<WeatherReport>,
}

impl RainingCheck {
    pub fn new(resolver: Arc<CityResolver>, report: Arc<WeatherReport>) -> Self {
        Self { resolver, report }
    }
}

#[async_trait]
impl KeywordHandler for RainingCheck {
    async fn handle(&self, msg: &Msg) -> KeywordOutcome {
        match self.resolver.resolve(msg).await {
            Ok(Some(city)) => KeywordOutcome::Handled(self.report.raining_for_city(&city).await),
            Ok(None) => KeywordOutcome::Deferred,
            Err(e) => {
                tracing::warn!(conversation = %msg.conversation_id, error = %e, "city extraction failed");
                KeywordOutcome::Handled(APOLOGY.to_string())
            }
        }
    }
}
