//! Dialog state types

use crate::nlp::City;
use serde::{Deserialize, Serialize};

/// Index of the collect-city state.
pub(crate) const COLLECT_CITY: usize = 0;

/// Index of the report-weather state (terminal).
pub(crate) const REPORT_WEATHER: usize = 1;

/// Persisted position in the dialog: the active state index and
/// whether that state's entry prompt has been shown. Stored in
/// conversational memory next to the remembered city; exactly one
/// cursor exists per conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogCursor {
    pub index: usize,
    pub entered: bool,
}

impl DialogCursor {
    /// Cursor parked in `index`, entry prompt already shown.
    pub(crate) fn entered(index: usize) -> Self {
        Self {
            index,
            entered: true,
        }
    }
}

/// What this turn's message yielded from the extraction service, as
/// seen by the collect-city state.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// First candidate, in service order.
    City(City),
    /// The service found nothing; not an error.
    None,
    /// Hard extraction failure, already logged by the driver. The
    /// dialog swallows it and keeps waiting.
    Failed,
}

/// What the pure step decided to say this turn.
#[derive(Debug, Clone, PartialEq)]
pub enum StepReply {
    /// Nothing to say; the machine waits in place.
    Silence,
    /// A fixed prompt.
    Prompt(String),
    /// Report current conditions for `city`; the driver renders this
    /// through the weather fetcher.
    Weather(City),
}

/// Memory mutation requested by the pure step; executed by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryEffect {
    StoreCity(City),
    ClearCity,
}
