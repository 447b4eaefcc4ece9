//! Overpass API client for nearby tagged features
//!
//! Issues a single Overpass QL query selecting point (node) and area (way)
//! features within a radius of a coordinate, filtered by the POI tag
//! categories, with `out center` so area features come back with a
//! computed centroid.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::config::OverpassConfig;
use crate::{PoiMapError, USER_AGENT};

/// Tag categories searched for nearby features
const POI_TAG_CATEGORIES: [&str; 4] = ["tourism", "amenity", "historic", "leisure"];

/// A raw Overpass element: a node with direct coordinates, or a way with
/// a centroid under `center`
#[derive(Debug, Clone, Deserialize)]
pub struct OsmElement {
    #[serde(rename = "type", default)]
    pub element_type: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<OsmCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Centroid of an area-shaped element
#[derive(Debug, Clone, Deserialize)]
pub struct OsmCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OsmElement>,
}

/// Source of raw tagged features around a coordinate
pub trait PoiProvider: Send + Sync {
    async fn nearby_features(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
    ) -> Result<Vec<OsmElement>, PoiMapError>;
}

/// Client for the Overpass interpreter endpoint
pub struct OverpassClient {
    client: reqwest::Client,
    base_url: String,
}

impl OverpassClient {
    /// Create a new Overpass client from configuration
    pub fn new(config: &OverpassConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client for Overpass")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Build the Overpass QL body for a radius query over the POI tag
    /// categories, across nodes and ways
    fn build_query(lat: f64, lon: f64, radius_m: u32) -> String {
        let mut selectors = String::new();
        for category in POI_TAG_CATEGORIES {
            selectors.push_str(&format!(
                "node[\"{category}\"](around:{radius_m},{lat},{lon});"
            ));
            selectors.push_str(&format!(
                "way[\"{category}\"](around:{radius_m},{lat},{lon});"
            ));
        }
        format!("[out:json][timeout:25];({selectors});out center;")
    }
}

impl PoiProvider for OverpassClient {
    #[tracing::instrument(skip(self))]
    async fn nearby_features(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
    ) -> Result<Vec<OsmElement>, PoiMapError> {
        let query = Self::build_query(lat, lon, radius_m);
        debug!("Overpass query: {}", query);

        let response = self.client.post(&self.base_url).body(query).send().await?;

        if !response.status().is_success() {
            return Err(PoiMapError::upstream(format!(
                "Overpass returned status {}",
                response.status()
            )));
        }

        let body: OverpassResponse = response.json().await?;
        debug!("Overpass returned {} element(s)", body.elements.len());
        Ok(body.elements)
    }
}
