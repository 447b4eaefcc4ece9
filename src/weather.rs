//! Open-Meteo weather client
//!
//! Fetches current conditions for a coordinate. The current-conditions
//! block is optional in the response; its absence is handled by the
//! orchestrator as a degraded success, never an error.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::config::WeatherConfig;
use crate::{PoiMapError, USER_AGENT};

/// Forecast response carrying an optional current-conditions block
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
}

/// Raw current weather from Open-Meteo
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    /// Air temperature in degrees Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    pub windspeed: f64,
    /// Wind direction in degrees
    pub winddirection: f64,
    /// WMO weather interpretation code
    pub weathercode: u8,
    /// Observation time, local ISO-8601 without offset
    #[serde(default)]
    pub time: String,
}

/// Source of current conditions for a coordinate
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Option<CurrentWeather>, PoiMapError>;
}

/// Client for the Open-Meteo forecast endpoint
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client from configuration
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client for Open-Meteo")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

impl WeatherProvider for OpenMeteoClient {
    #[tracing::instrument(skip(self))]
    async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Option<CurrentWeather>, PoiMapError> {
        let url = format!(
            "{}/forecast?latitude={lat}&longitude={lon}&current_weather=true",
            self.base_url
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(PoiMapError::upstream(format!(
                "Weather service returned status {}",
                response.status()
            )));
        }

        let body: ForecastResponse = response.json().await?;
        debug!(
            "Weather response has current conditions: {}",
            body.current_weather.is_some()
        );
        Ok(body.current_weather)
    }
}
