//! Search orchestrator: the search-and-aggregation pipeline
//!
//! Given a raw query string: geocode, derive a coordinate, fan out to the
//! weather and POI services in parallel, normalize, rank, truncate, and
//! publish the result as an atomic session transition. Weather failure
//! degrades the search; POI failure fails it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::PoiMapError;
use crate::auth::IdentityGate;
use crate::geocode::GeocodeProvider;
use crate::models::{Place, PointOfInterest, SearchSession, WeatherSnapshot};
use crate::normalize;
use crate::overpass::PoiProvider;
use crate::weather::WeatherProvider;

/// Tunables of the search pipeline
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Radius of the POI area query in meters
    pub radius_m: u32,
    /// Maximum number of POIs in a published result set
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_m: 2000,
            max_results: 5,
        }
    }
}

struct SearchOutcome {
    place: Place,
    pois: Vec<PointOfInterest>,
    weather: Option<WeatherSnapshot>,
    info: Option<String>,
}

/// Drives the search pipeline and owns the session state
///
/// Overlapping searches are serialized by a monotonically increasing
/// sequence number: a completion whose number is stale is discarded, so
/// a slow earlier search can never overwrite a faster later one.
pub struct SearchOrchestrator<G, P, W> {
    geocoder: G,
    pois: P,
    weather: W,
    auth: Arc<dyn IdentityGate>,
    settings: SearchSettings,
    session: RwLock<SearchSession>,
    sequence: AtomicU64,
}

impl<G, P, W> SearchOrchestrator<G, P, W>
where
    G: GeocodeProvider,
    P: PoiProvider,
    W: WeatherProvider,
{
    /// Create a new orchestrator with an empty session
    pub fn new(
        geocoder: G,
        pois: P,
        weather: W,
        auth: Arc<dyn IdentityGate>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            geocoder,
            pois,
            weather,
            auth,
            settings,
            session: RwLock::new(SearchSession::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current session
    pub fn session(&self) -> SearchSession {
        self.session.read().expect("session lock poisoned").clone()
    }

    /// Run a search for a free-text place name and publish the outcome
    pub async fn search(&self, query: &str) -> SearchSession {
        let query = query.trim();
        if query.is_empty() {
            return self.apply(None, |session| {
                session.error =
                    Some(PoiMapError::validation("search query cannot be empty").user_message());
            });
        }
        if self.auth.current_user().is_none() {
            return self.apply(None, |session| {
                session.error =
                    Some(PoiMapError::validation("sign in to search for places").user_message());
            });
        }

        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Starting search #{ticket} for \"{query}\"");

        // Enter loading: prior POIs and weather are cleared up front, the
        // prior place stays visible until a new geocode succeeds.
        self.apply(Some(ticket), |session| {
            session.loading = true;
            session.pois.clear();
            session.weather = None;
            session.error = None;
        });

        match self.run_search(ticket, query).await {
            Ok(outcome) => self.apply(Some(ticket), |session| {
                session.place = Some(outcome.place.clone());
                session.pois = outcome.pois.clone();
                session.weather = outcome.weather.clone();
                session.error = outcome.info.clone();
                session.loading = false;
            }),
            Err(err) => {
                warn!("Search #{ticket} failed: {err}");
                self.apply(Some(ticket), |session| {
                    session.pois.clear();
                    session.weather = None;
                    session.error = Some(err.user_message());
                    session.loading = false;
                })
            }
        }
    }

    async fn run_search(&self, ticket: u64, query: &str) -> Result<SearchOutcome, PoiMapError> {
        let matches = self.geocoder.geocode(query).await?;
        let best = matches.into_iter().next().ok_or_else(|| {
            PoiMapError::not_found(format!("No places found for \"{query}\""))
        })?;

        // Nominatim sends coordinates as text; a malformed number is a
        // not-found failure, never a panic.
        let lat: f64 = best
            .lat
            .trim()
            .parse()
            .map_err(|_| PoiMapError::not_found(format!("No places found for \"{query}\"")))?;
        let lon: f64 = best
            .lon
            .trim()
            .parse()
            .map_err(|_| PoiMapError::not_found(format!("No places found for \"{query}\"")))?;

        let place = Place::new(lat, lon, best.display_name);
        debug!("Geocoded \"{}\" to {}", query, place.format_coordinates());
        self.apply(Some(ticket), |session| {
            session.place = Some(place.clone());
        });

        // The only true concurrency in the system: both requests are in
        // flight before either is awaited.
        let (weather_result, poi_result) = tokio::join!(
            self.weather.current_weather(lat, lon),
            self.pois.nearby_features(lat, lon, self.settings.radius_m),
        );

        let elements = poi_result?;

        let weather = match weather_result {
            Ok(Some(current)) => Some(normalize::normalize_weather(&current)),
            Ok(None) => None,
            Err(err) => {
                // Degraded success: the search proceeds without weather.
                warn!("Weather fetch failed, continuing without it: {err}");
                None
            }
        };

        let center = (lat, lon);
        let pois: Vec<PointOfInterest> = elements
            .iter()
            .filter_map(|element| normalize::normalize_element(element, center))
            .collect();
        let dropped = elements.len() - pois.len();
        if dropped > 0 {
            debug!("Dropped {dropped} feature(s) without a usable coordinate");
        }

        let pois = normalize::rank_pois(pois, self.settings.max_results);
        let info = pois
            .is_empty()
            .then(|| "No notable places found nearby".to_string());

        Ok(SearchOutcome {
            place,
            pois,
            weather,
            info,
        })
    }

    /// Apply an atomic session transition and return the new snapshot
    ///
    /// With a ticket, the transition is discarded when a newer search has
    /// already started; without one (local validation) it always applies.
    fn apply(
        &self,
        ticket: Option<u64>,
        transition: impl FnOnce(&mut SearchSession),
    ) -> SearchSession {
        let mut session = self.session.write().expect("session lock poisoned");
        match ticket {
            Some(ticket) if ticket != self.sequence.load(Ordering::SeqCst) => {
                debug!("Discarding stale completion of search #{ticket}");
            }
            _ => transition(&mut session),
        }
        session.clone()
    }
}
