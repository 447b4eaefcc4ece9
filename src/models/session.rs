//! Search session state published by the orchestrator

use serde::{Deserialize, Serialize};

use super::{Place, PointOfInterest, WeatherSnapshot};

/// The published state of the current search
///
/// Owned exclusively by the orchestrator, which applies atomic
/// transitions; presentation layers only read it. The place from a prior
/// successful search stays visible until a new geocode succeeds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SearchSession {
    /// The currently resolved place, if any search has geocoded yet
    pub place: Option<Place>,
    /// Ranked POIs of the current search, at most the configured maximum
    pub pois: Vec<PointOfInterest>,
    /// Current conditions, absent on degraded success
    pub weather: Option<WeatherSnapshot>,
    /// True while a search is in flight
    pub loading: bool,
    /// User-visible error message, if the last search failed
    pub error: Option<String>,
}

impl SearchSession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
