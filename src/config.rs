//! Configuration management for the `poimap` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::PoiMapError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `poimap` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PoiMapConfig {
    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Overpass area-query service configuration
    #[serde(default)]
    pub overpass: OverpassConfig,
    /// Weather service configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Translation service configuration
    #[serde(default)]
    pub translation: TranslationConfig,
    /// Search pipeline settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Geocoding service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the Nominatim instance
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Country filter passed to the geocoder
    #[serde(default = "default_country_codes")]
    pub country_codes: String,
    /// Preferred response language tag
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Overpass service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Overpass interpreter endpoint
    #[serde(default = "default_overpass_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_overpass_timeout")]
    pub timeout_seconds: u32,
}

/// Weather service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the Open-Meteo API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Translation service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Translation endpoint; translation is rejected locally when unset
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Source language tag
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    /// Target language tag
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Request timeout in seconds
    #[serde(default = "default_translation_timeout")]
    pub timeout_seconds: u32,
}

/// Search pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Radius of the POI area query in meters
    #[serde(default = "default_radius_m")]
    pub radius_m: u32,
    /// Maximum number of POIs in a published result set
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the web server listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_country_codes() -> String {
    "vn".to_string()
}

fn default_language() -> String {
    "vi".to_string()
}

fn default_overpass_base_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "vi".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_overpass_timeout() -> u32 {
    25
}

fn default_translation_timeout() -> u32 {
    20
}

fn default_radius_m() -> u32 {
    2000
}

fn default_max_results() -> usize {
    5
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            country_codes: default_country_codes(),
            language: default_language(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: default_overpass_base_url(),
            timeout_seconds: default_overpass_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            timeout_seconds: default_translation_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
            max_results: default_max_results(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PoiMapConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with POIMAP_ prefix, e.g.
        // POIMAP_TRANSLATION__ENDPOINT=http://localhost:8000
        builder = builder.add_source(
            Environment::with_prefix("POIMAP")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: PoiMapConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("poimap").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("geocoding", &self.geocoding.base_url),
            ("overpass", &self.overpass.base_url),
            ("weather", &self.weather.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PoiMapError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if let Some(endpoint) = &self.translation.endpoint {
            if !endpoint.trim().is_empty()
                && !endpoint.starts_with("http://")
                && !endpoint.starts_with("https://")
            {
                return Err(PoiMapError::config(
                    "translation endpoint must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        if self.search.radius_m == 0 || self.search.radius_m > 50_000 {
            return Err(
                PoiMapError::config("search radius must be between 1 and 50000 meters").into(),
            );
        }

        if self.search.max_results == 0 || self.search.max_results > 50 {
            return Err(PoiMapError::config("max results must be between 1 and 50").into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PoiMapError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoiMapConfig::default();
        assert_eq!(config.geocoding.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.geocoding.country_codes, "vn");
        assert_eq!(config.geocoding.language, "vi");
        assert_eq!(config.search.radius_m, 2000);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.translation.source_lang, "en");
        assert_eq!(config.translation.target_lang, "vi");
        assert!(config.translation.endpoint.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(PoiMapConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let mut config = PoiMapConfig::default();
        config.overpass.base_url = "ftp://overpass".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("overpass"));
    }

    #[test]
    fn test_validation_rejects_zero_radius() {
        let mut config = PoiMapConfig::default();
        config.search.radius_m = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let mut config = PoiMapConfig::default();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = PoiMapConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("poimap"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
