//! `poimap` - Place search, nearby POI discovery, weather and translation
//! for Vietnam
//!
//! This library provides the search-and-aggregation pipeline: resolve a
//! free-text place name to coordinates, fan out to the POI and weather
//! services in parallel, normalize and rank the results, and publish them
//! as a consistent search session. A separate client translates short
//! English sentences to Vietnamese.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod models;
pub mod normalize;
pub mod overpass;
pub mod search;
pub mod translate;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use auth::{AuthContext, IdentityGate, UserIdentity};
pub use config::PoiMapConfig;
pub use error::PoiMapError;
pub use models::{Place, PointOfInterest, SearchSession, WeatherSnapshot};
pub use search::{SearchOrchestrator, SearchSettings};
pub use translate::TranslationClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent to upstream services, required by the OSM usage policy
pub(crate) const USER_AGENT: &str = "poimap/0.1";

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PoiMapError>;
