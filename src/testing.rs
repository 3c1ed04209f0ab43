//! Mock implementations of the external seams
//!
//! Queue-based mocks in the spirit of recorded test doubles: tests
//! queue one response per expected call and can inspect what the skill
//! asked for. These enable exercising the full skill without real I/O.

use crate::message::Msg;
use crate::nlp::{City, CityExtractor, ExtractError};
use crate::weather::{Conditions, WeatherError, WeatherProvider};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock city extractor
// ============================================================================

/// Mock extraction service returning queued results. An empty queue
/// behaves as "no city found", so turns that never reach the extractor
/// need nothing queued.
pub struct MockCityExtractor {
    responses: Mutex<VecDeque<Result<Vec<City>, ExtractError>>>,
    /// Message texts the skill asked to extract from.
    calls: Mutex<Vec<String>>,
}

impl MockCityExtractor {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_cities(&self, cities: Vec<City>) {
        self.responses.lock().unwrap().push_back(Ok(cities));
    }

    pub fn queue_not_found(&self) {
        self.responses.lock().unwrap().push_back(Ok(Vec::new()));
    }

    pub fn queue_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ExtractError(message.to_string())));
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CityExtractor for MockCityExtractor {
    async fn extract(&self, msg: &Msg) -> Result<Vec<City>, ExtractError> {
        self.calls.lock().unwrap().push(msg.text.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

// ============================================================================
// Mock weather provider
// ============================================================================

/// Mock provider returning queued conditions or errors. An empty queue
/// behaves as a server error, so a test that forgets to queue fails
/// loudly with the apology rather than hanging.
pub struct MockWeatherProvider {
    responses: Mutex<VecDeque<Result<Conditions, WeatherError>>>,
    /// City names the skill fetched weather for.
    calls: Mutex<Vec<String>>,
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_conditions(&self, conditions: Conditions) {
        self.responses.lock().unwrap().push_back(Ok(conditions));
    }

    pub fn queue_status(&self, status: StatusCode) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(WeatherError::Status(status)));
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn current(&self, city: &City) -> Result<Conditions, WeatherError> {
        self.calls.lock().unwrap().push(city.name.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WeatherError::Status(StatusCode::INTERNAL_SERVER_ERROR)))
    }
}
