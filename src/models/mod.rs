//! Data models for the `poimap` application
//!
//! This module contains the core domain models organized by concern:
//! - Place: a geocoded location with a display label
//! - PointOfInterest: a normalized nearby feature with derived fields
//! - WeatherSnapshot: current conditions at the search center
//! - SearchSession: the published state of the current search

pub mod place;
pub mod poi;
pub mod session;
pub mod weather;

// Re-export all public types for convenient access
pub use place::Place;
pub use poi::PointOfInterest;
pub use session::SearchSession;
pub use weather::WeatherSnapshot;
