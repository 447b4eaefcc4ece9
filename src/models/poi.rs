//! Point of interest model with fields derived during normalization

use serde::{Deserialize, Serialize};

/// A normalized feature discovered near a place
///
/// Every published POI has a valid finite coordinate; source records
/// without one are dropped during normalization.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PointOfInterest {
    /// Source-provided identifier, unique within a single result set
    pub id: String,
    /// Display name derived via the name fallback chain
    pub name: String,
    /// Category rendered as `"<field>: <value>"`, or `"Other"`
    pub category: String,
    /// Latitude in decimal degrees (direct point or area centroid)
    pub latitude: f64,
    /// Longitude in decimal degrees (direct point or area centroid)
    pub longitude: f64,
    /// Great-circle distance from the search center in meters
    pub distance_m: f64,
    /// Street or full address if the source tags carry one
    pub address: Option<String>,
}
