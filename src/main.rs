use std::env;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use poimap::api::AppState;
use poimap::auth::{AuthContext, IdentityGate};
use poimap::config::PoiMapConfig;
use poimap::geo;
use poimap::geocode::NominatimClient;
use poimap::overpass::OverpassClient;
use poimap::search::{SearchOrchestrator, SearchSettings};
use poimap::translate::TranslationClient;
use poimap::weather::OpenMeteoClient;
use poimap::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = PoiMapConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let auth = Arc::new(AuthContext::new());
    let gate: Arc<dyn IdentityGate> = auth.clone();

    let orchestrator = Arc::new(SearchOrchestrator::new(
        NominatimClient::new(&config.geocoding)?,
        OverpassClient::new(&config.overpass)?,
        OpenMeteoClient::new(&config.weather)?,
        gate.clone(),
        SearchSettings {
            radius_m: config.search.radius_m,
            max_results: config.search.max_results,
        },
    ));
    let translator = Arc::new(TranslationClient::new(&config.translation, gate)?);

    // One-shot search from the command line, otherwise serve the web app.
    match env::args().nth(1) {
        Some(query) => run_once(orchestrator.as_ref(), auth.as_ref(), &query).await,
        None => {
            let state = AppState {
                orchestrator,
                translator,
                auth,
            };
            web::run(config.server.port, state).await
        }
    }
}

async fn run_once(
    orchestrator: &poimap::api::Orchestrator,
    auth: &AuthContext,
    query: &str,
) -> Result<()> {
    // The pipeline is gated behind a signed-in user; a one-shot run signs
    // in a local operator identity first.
    auth.sign_in("operator@localhost", "local-search")?;

    let session = orchestrator.search(query).await;

    if let Some(error) = &session.error {
        println!("{error}");
    }

    if let Some(place) = &session.place {
        println!(
            "{} ({})",
            place.display_name,
            place.format_coordinates()
        );
    }

    if let Some(weather) = &session.weather {
        println!(
            "Currently {}: {:.1} °C, wind {:.0} km/h from {}°",
            weather.description,
            weather.temperature_c,
            weather.wind_speed_kmh,
            weather.wind_direction_deg
        );
    }

    for poi in &session.pois {
        let address = poi
            .address
            .as_deref()
            .map(|address| format!(", {address}"))
            .unwrap_or_default();
        println!(
            "  - {} [{}] {} away{}",
            poi.name,
            poi.category,
            geo::format_distance(poi.distance_m),
            address
        );
    }

    Ok(())
}
