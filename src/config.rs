//! Skill configuration
//!
//! Built once at startup and passed into [`crate::skill::WeatherSkill::new`];
//! nothing in the crate reads the environment after construction.

use std::time::Duration;

/// Default weather provider endpoint.
pub const DEFAULT_WEATHER_URL: &str = "https://www.itsabot.org/api/weather.json";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// What the dialog does when it starts and a city is already
/// remembered for the conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecallPolicy {
    /// Ask "Are you still in {city}?" once before reporting.
    #[default]
    Confirm,
    /// Proceed with the remembered city, no confirmation prompt.
    Overwrite,
}

#[derive(Debug, Clone)]
pub struct SkillConfig {
    /// Base URL for the weather provider; the city name is appended as
    /// an escaped `city` query parameter.
    pub weather_base_url: String,
    /// Timeout applied to each provider request. A slow provider stalls
    /// only the turn that is waiting on it.
    pub http_timeout: Duration,
    pub recall_policy: RecallPolicy,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            weather_base_url: DEFAULT_WEATHER_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            recall_policy: RecallPolicy::default(),
        }
    }
}

impl SkillConfig {
    /// Configuration from the environment, with defaults:
    /// `WEATHERVANE_URL`, `WEATHERVANE_TIMEOUT_SECS`,
    /// `WEATHERVANE_RECALL` (`confirm` | `overwrite`).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("WEATHERVANE_URL") {
            if !url.is_empty() {
                config.weather_base_url = url;
            }
        }

        if let Some(secs) = std::env::var("WEATHERVANE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.http_timeout = Duration::from_secs(secs);
        }

        if let Ok(policy) = std::env::var("WEATHERVANE_RECALL") {
            match policy.to_lowercase().as_str() {
                "overwrite" => config.recall_policy = RecallPolicy::Overwrite,
                "confirm" => config.recall_policy = RecallPolicy::Confirm,
                other => {
                    tracing::warn!(value = other, "unknown WEATHERVANE_RECALL, using default");
                }
            }
        }

        config
    }
}
