//! Weather snapshot model for current conditions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at the search center
///
/// Absent entirely when the weather service is unreachable or returns no
/// current-conditions payload; that is a degraded success, not an error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Air temperature in degrees Celsius
    pub temperature_c: f64,
    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
    /// Wind direction in degrees
    pub wind_direction_deg: u16,
    /// Human-readable condition description from the code lookup table
    pub description: String,
    /// Observation timestamp
    pub observed_at: DateTime<Utc>,
}
