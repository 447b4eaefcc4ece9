//! Result normalization: raw geo-tagged records into uniform POIs and
//! weather snapshots
//!
//! Pure, stateless mapping functions. Name, category and address
//! derivation are ordered priority tables evaluated short-circuit, so the
//! ranking policy stays auditable in one place.

use chrono::Utc;

use crate::geo;
use crate::models::{PointOfInterest, WeatherSnapshot};
use crate::overpass::OsmElement;
use crate::weather::CurrentWeather;

/// Tag fields tried in order when deriving a POI display name
const NAME_TAGS: [&str; 6] = ["name", "name:vi", "name:en", "amenity", "tourism", "leisure"];

/// Tag fields tried in order when deriving a POI category
const CATEGORY_TAGS: [&str; 5] = ["tourism", "amenity", "historic", "leisure", "shop"];

/// Tag fields tried in order when deriving a POI address
const ADDRESS_TAGS: [&str; 2] = ["addr:street", "addr:full"];

/// Name used when no recognized name field is present
pub const DEFAULT_POI_NAME: &str = "Point of interest";

/// Category used when no recognized category field is present
pub const DEFAULT_CATEGORY: &str = "Other";

/// Sentinel description for unrecognized weather codes
pub const CONDITION_UNAVAILABLE: &str = "Unavailable";

/// Normalize a raw Overpass element into a POI
///
/// Returns `None` for records lacking a usable coordinate (neither a
/// direct point nor a centroid, or a non-finite value); such records are
/// dropped, never surfaced as partial entries.
#[must_use]
pub fn normalize_element(element: &OsmElement, center: (f64, f64)) -> Option<PointOfInterest> {
    let (lat, lon) = resolve_coordinate(element)?;

    let name = first_tag(element, &NAME_TAGS).unwrap_or_else(|| DEFAULT_POI_NAME.to_string());

    let category = CATEGORY_TAGS
        .iter()
        .find_map(|field| {
            element
                .tags
                .get(*field)
                .map(|value| format!("{field}: {value}"))
        })
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let address = first_tag(element, &ADDRESS_TAGS);

    Some(PointOfInterest {
        id: format!("{}/{}", element.element_type, element.id),
        name,
        category,
        latitude: lat,
        longitude: lon,
        distance_m: geo::distance_meters(center, (lat, lon)),
        address,
    })
}

/// Resolve the element coordinate: direct point, else area centroid
fn resolve_coordinate(element: &OsmElement) -> Option<(f64, f64)> {
    let (lat, lon) = match (element.lat, element.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            let center = element.center.as_ref()?;
            (center.lat, center.lon)
        }
    };

    if lat.is_finite() && lon.is_finite() {
        Some((lat, lon))
    } else {
        None
    }
}

fn first_tag(element: &OsmElement, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| element.tags.get(*field).cloned())
}

/// Order POIs ascending by distance and keep the first `max`
#[must_use]
pub fn rank_pois(mut pois: Vec<PointOfInterest>, max: usize) -> Vec<PointOfInterest> {
    pois.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    pois.truncate(max);
    pois
}

/// Map a raw current-conditions block into a weather snapshot
#[must_use]
pub fn normalize_weather(current: &CurrentWeather) -> WeatherSnapshot {
    let observed_at = chrono::NaiveDateTime::parse_from_str(&current.time, "%Y-%m-%dT%H:%M")
        .map_or_else(|_| Utc::now(), |dt| dt.and_utc());

    WeatherSnapshot {
        temperature_c: current.temperature,
        wind_speed_kmh: current.windspeed,
        wind_direction_deg: current.winddirection.round().rem_euclid(360.0) as u16,
        description: describe_weather_code(current.weathercode).to_string(),
        observed_at,
    }
}

/// Convert a WMO weather interpretation code to a human-readable
/// description; unrecognized codes map to the unavailable sentinel
#[must_use]
pub fn describe_weather_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => CONDITION_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;
    use crate::overpass::OsmCenter;

    fn node(id: i64, lat: f64, lon: f64, tags: &[(&str, &str)]) -> OsmElement {
        OsmElement {
            element_type: "node".to_string(),
            id,
            lat: Some(lat),
            lon: Some(lon),
            center: None,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    const CENTER: (f64, f64) = (21.0285, 105.8542);

    #[test]
    fn test_node_coordinate_is_direct() {
        let element = node(1, 21.03, 105.85, &[("name", "Hoan Kiem Lake")]);
        let poi = normalize_element(&element, CENTER).unwrap();
        assert_eq!(poi.latitude, 21.03);
        assert_eq!(poi.longitude, 105.85);
        assert_eq!(poi.id, "node/1");
    }

    #[test]
    fn test_way_resolves_to_centroid() {
        let element = OsmElement {
            element_type: "way".to_string(),
            id: 7,
            lat: None,
            lon: None,
            center: Some(OsmCenter {
                lat: 21.04,
                lon: 105.86,
            }),
            tags: HashMap::from([("tourism".to_string(), "museum".to_string())]),
        };
        let poi = normalize_element(&element, CENTER).unwrap();
        assert_eq!(poi.latitude, 21.04);
        assert_eq!(poi.id, "way/7");
    }

    #[test]
    fn test_element_without_coordinate_is_dropped() {
        let element = OsmElement {
            element_type: "way".to_string(),
            id: 9,
            lat: None,
            lon: None,
            center: None,
            tags: HashMap::from([("amenity".to_string(), "cafe".to_string())]),
        };
        assert!(normalize_element(&element, CENTER).is_none());
    }

    #[test]
    fn test_non_finite_coordinate_is_dropped() {
        let element = node(3, f64::NAN, 105.85, &[("amenity", "cafe")]);
        assert!(normalize_element(&element, CENTER).is_none());
    }

    #[rstest]
    #[case(&[("name", "Văn Miếu"), ("amenity", "cafe")], "Văn Miếu")]
    #[case(&[("name:vi", "Hồ Tây")], "Hồ Tây")]
    #[case(&[("name:en", "West Lake"), ("name:vi", "Hồ Tây")], "Hồ Tây")]
    #[case(&[("amenity", "cafe")], "cafe")]
    #[case(&[], DEFAULT_POI_NAME)]
    fn test_name_fallback_chain(#[case] tags: &[(&str, &str)], #[case] expected: &str) {
        let element = node(1, 21.03, 105.85, tags);
        let poi = normalize_element(&element, CENTER).unwrap();
        assert_eq!(poi.name, expected);
    }

    #[rstest]
    #[case(&[("tourism", "museum"), ("amenity", "cafe")], "tourism: museum")]
    #[case(&[("amenity", "cafe"), ("shop", "bakery")], "amenity: cafe")]
    #[case(&[("shop", "bakery")], "shop: bakery")]
    #[case(&[("name", "Somewhere")], DEFAULT_CATEGORY)]
    fn test_category_fallback_chain(#[case] tags: &[(&str, &str)], #[case] expected: &str) {
        let element = node(1, 21.03, 105.85, tags);
        let poi = normalize_element(&element, CENTER).unwrap();
        assert_eq!(poi.category, expected);
    }

    #[test]
    fn test_address_derivation() {
        let with_street = node(1, 21.03, 105.85, &[("addr:street", "Phố Tràng Tiền")]);
        let poi = normalize_element(&with_street, CENTER).unwrap();
        assert_eq!(poi.address.as_deref(), Some("Phố Tràng Tiền"));

        let without = node(2, 21.03, 105.85, &[("amenity", "cafe")]);
        let poi = normalize_element(&without, CENTER).unwrap();
        assert!(poi.address.is_none());
    }

    #[test]
    fn test_rank_pois_sorts_and_truncates() {
        let pois: Vec<_> = [40.0, 10.0, 30.0, 20.0, 60.0, 50.0, 5.0]
            .iter()
            .enumerate()
            .map(|(i, d)| PointOfInterest {
                id: format!("node/{i}"),
                name: DEFAULT_POI_NAME.to_string(),
                category: DEFAULT_CATEGORY.to_string(),
                latitude: 21.0,
                longitude: 105.8,
                distance_m: *d,
                address: None,
            })
            .collect();

        let ranked = rank_pois(pois, 5);
        assert_eq!(ranked.len(), 5);
        let distances: Vec<f64> = ranked.iter().map(|p| p.distance_m).collect();
        assert_eq!(distances, vec![5.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[rstest]
    #[case(0, "Clear sky")]
    #[case(3, "Overcast")]
    #[case(95, "Thunderstorm")]
    #[case(12, CONDITION_UNAVAILABLE)]
    fn test_weather_code_lookup(#[case] code: u8, #[case] expected: &str) {
        assert_eq!(describe_weather_code(code), expected);
    }

    #[rstest]
    #[case(247.0, 247)]
    #[case(0.0, 0)]
    #[case(359.4, 359)]
    #[case(359.7, 0)]
    #[case(-90.0, 270)]
    fn test_wind_direction_stays_in_degree_range(#[case] raw: f64, #[case] expected: u16) {
        let current = CurrentWeather {
            temperature: 20.0,
            windspeed: 5.0,
            winddirection: raw,
            weathercode: 0,
            time: String::new(),
        };
        assert_eq!(normalize_weather(&current).wind_direction_deg, expected);
    }

    #[test]
    fn test_normalize_weather() {
        let current = CurrentWeather {
            temperature: 31.5,
            windspeed: 12.3,
            winddirection: 247.0,
            weathercode: 3,
            time: "2024-06-01T14:00".to_string(),
        };
        let snapshot = normalize_weather(&current);
        assert_eq!(snapshot.temperature_c, 31.5);
        assert_eq!(snapshot.wind_direction_deg, 247);
        assert_eq!(snapshot.description, "Overcast");
        assert_eq!(snapshot.observed_at.to_rfc3339(), "2024-06-01T14:00:00+00:00");
    }
}
