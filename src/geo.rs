//! Distance and formatting utilities

use haversine::{Location as HaversineLocation, Units, distance};

/// Great-circle distance between two coordinates in meters
#[must_use]
pub fn distance_meters(from: (f64, f64), to: (f64, f64)) -> f64 {
    let from = HaversineLocation {
        latitude: from.0,
        longitude: from.1,
    };
    let to = HaversineLocation {
        latitude: to.0,
        longitude: to.1,
    };
    distance(from, to, Units::Kilometers) * 1000.0
}

/// Human-readable distance label: meters below 1 km, kilometers above
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
