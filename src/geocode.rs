//! Nominatim geocoding client
//!
//! Resolves a free-text place name to coordinates, constrained to the
//! configured country. Nominatim returns latitude and longitude as text;
//! parsing happens in the orchestrator so malformed numbers surface as a
//! not-found failure instead of a crash.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::config::GeocodingConfig;
use crate::{PoiMapError, USER_AGENT};

/// A single raw geocoder match
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodedPlace {
    /// Latitude as text, to be parsed by the caller
    #[serde(default)]
    pub lat: String,
    /// Longitude as text, to be parsed by the caller
    #[serde(default)]
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

/// Source of geocoder matches for a free-text query
pub trait GeocodeProvider: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodedPlace>, PoiMapError>;
}

/// Client for the Nominatim search endpoint
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    country_codes: String,
    language: String,
}

impl NominatimClient {
    /// Create a new Nominatim client from configuration
    pub fn new(config: &GeocodingConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client for Nominatim")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            country_codes: config.country_codes.clone(),
            language: config.language.clone(),
        })
    }
}

impl GeocodeProvider for NominatimClient {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodedPlace>, PoiMapError> {
        let url = format!(
            "{}/search?q={}&format=json&countrycodes={}&limit=1&addressdetails=1&accept-language={}",
            self.base_url,
            urlencoding::encode(query),
            self.country_codes,
            self.language,
        );

        debug!("Geocoding query: {}", query);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(PoiMapError::upstream(format!(
                "Geocoder returned status {}",
                response.status()
            )));
        }

        let places: Vec<GeocodedPlace> = response.json().await?;
        debug!("Geocoder returned {} match(es)", places.len());
        Ok(places)
    }
}
