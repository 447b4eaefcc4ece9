//! Place model for a geocoded location

use serde::{Deserialize, Serialize};

/// A resolved location, created by the geocode step and replaced
/// wholesale on each new search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Place {
    /// Latitude in decimal degrees (WGS-84)
    pub latitude: f64,
    /// Longitude in decimal degrees (WGS-84)
    pub longitude: f64,
    /// Display label as returned by the geocoder
    pub display_name: String,
}

impl Place {
    /// Create a new place
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, display_name: String) -> Self {
        Self {
            latitude,
            longitude,
            display_name,
        }
    }

    /// Format the place as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
