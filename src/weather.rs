//! Weather fetch and rendering
//!
//! One GET against the provider per turn, three fixed sentence
//! templates, and a fixed apology whenever the call fails. Failures are
//! logged and swallowed here; nothing weather-related propagates as an
//! error to the conversation.

use crate::config::SkillConfig;
use crate::nlp::City;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Fixed apology used whenever an external call fails mid-turn. No
/// error detail ever reaches the end user.
pub const APOLOGY: &str = "Something went wrong, but I'll try to get that fixed right away.";

/// Current conditions as returned by the provider.
///
/// `humidity` is part of the wire contract but unused by rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conditions {
    #[serde(rename = "Description", default)]
    pub description: Vec<String>,
    #[serde(rename = "Temp")]
    pub temp: f64,
    #[serde(rename = "Humidity", default)]
    pub humidity: i64,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("weather provider returned {0}")]
    Status(StatusCode),
    #[error("undecodable weather payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// External weather data provider.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &City) -> Result<Conditions, WeatherError>;
}

#[async_trait]
impl<T: WeatherProvider + ?Sized> WeatherProvider for Arc<T> {
    async fn current(&self, city: &City) -> Result<Conditions, WeatherError> {
        (**self).current(city).await
    }
}

// ============================================================================
// HTTP provider
// ============================================================================

/// Production provider: `GET {base_url}?city={name}` with a JSON body.
/// The city name is escaped by the query encoder.
pub struct HttpWeatherProvider {
    client: Client,
    base_url: String,
}

impl HttpWeatherProvider {
    pub fn new(config: &SkillConfig) -> Self {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url: config.weather_base_url.clone(),
        }
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    async fn current(&self, city: &City) -> Result<Conditions, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("city", city.name.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders fetched conditions for a city, falling back to the fixed
/// apology on any provider failure.
pub struct WeatherReport {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherReport {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Current-conditions sentence for `city`, or the apology.
    pub async fn for_city(&self, city: &City) -> String {
        match self.provider.current(city).await {
            Ok(conditions) => render(&conditions, city),
            Err(e) => {
                tracing::warn!(city = %city.name, error = %e, "weather fetch failed");
                APOLOGY.to_string()
            }
        }
    }

    /// Raining yes/no sentence for `city`, or the apology.
    ///
    /// The decision is a token scan over the already-rendered sentence,
    /// not a second provider field.
    pub async fn raining_for_city(&self, city: &City) -> String {
        let conditions = match self.provider.current(city).await {
            Ok(conditions) => conditions,
            Err(e) => {
                tracing::warn!(city = %city.name, error = %e, "weather fetch failed");
                return APOLOGY.to_string();
            }
        };
        if mentions_rain(&render(&conditions, city)) {
            format!("It's raining in {} right now.", city.name)
        } else {
            format!("It's not raining in {} right now.", city.name)
        }
    }
}

/// Sentence selection keys on the first description's word count.
fn render(conditions: &Conditions, city: &City) -> String {
    let temp = conditions.temp;
    match conditions.description.first() {
        None => format!("It's {temp:.0} in {} right now.", city.name),
        Some(description) if description.split_whitespace().count() > 1 => {
            // Multi-word description, e.g. "moderate rain"
            format!("It's {temp:.0} with {description} in {}.", city.name)
        }
        Some(description) => {
            // Single word, e.g. "sunny"
            format!("It's {temp:.0} and {description} in {}.", city.name)
        }
    }
}

/// Whitespace-tokenized, case-sensitive scan for the exact token
/// "rain". "light rain" matches on its second token; "drain" does not.
fn mentions_rain(sentence: &str) -> bool {
    sentence.split_whitespace().any(|word| word == "rain")
}
