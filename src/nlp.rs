//! City extraction seam
//!
//! City-name extraction from free text is an external NLP service; the
//! skill only sees this trait. Zero candidates is the "not found"
//! signal and is not an error. [`ExtractError`] is a hard failure from
//! the service and is never retried within a turn.

use crate::message::Msg;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// A resolved city. Immutable once produced within a turn; serialized
/// into conversational memory for recall on later turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl City {
    /// City known by name only; geocoding fields left for the provider.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country_code: None,
            lat: None,
            lon: None,
        }
    }
}

/// Hard failure from the extraction service.
#[derive(Debug, Clone, Error)]
#[error("city extraction failed: {0}")]
pub struct ExtractError(pub String);

/// External city-extraction service.
#[async_trait]
pub trait CityExtractor: Send + Sync {
    /// Extract candidate cities from a message, in the service's own
    /// preference order. The skill always takes the first candidate.
    /// An empty vec means "no city found".
    async fn extract(&self, msg: &Msg) -> Result<Vec<City>, ExtractError>;
}

#[async_trait]
impl<T: CityExtractor + ?Sized> CityExtractor for Arc<T> {
    async fn extract(&self, msg: &Msg) -> Result<Vec<City>, ExtractError> {
        (**self).extract(msg).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_roundtrips_through_json() {
        let city = City {
            name: "Boston".to_string(),
            country_code: Some("US".to_string()),
            lat: Some(42.36),
            lon: Some(-71.06),
        };
        let bytes = serde_json::to_vec(&city).unwrap();
        let back: City = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, city);
    }

    #[test]
    fn test_city_decodes_with_name_only() {
        let back: City = serde_json::from_str(r#"{"name":"Austin"}"#).unwrap();
        assert_eq!(back, City::named("Austin"));
    }
}
