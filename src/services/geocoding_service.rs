//! Geocoding Resolver
//!
//! Maps a free-text destination name to a single coordinate pair using the
//! OpenStreetMap Nominatim API, degrading through three tiers: live lookup,
//! a static table of well-known cities, then a fixed default coordinate.
//! Resolution never fails and never returns nothing.

use log::warn;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::models::map::GeoPoint;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Final fallback when neither the live lookup nor the static table matches.
pub const DEFAULT_COORDINATE: GeoPoint = GeoPoint {
    lat: 51.505,
    lng: -0.09,
};

// Well-known city coordinates, matched by case-insensitive substring
// containment of the key in the destination string.
const FALLBACK_CITIES: &[(&str, f64, f64)] = &[
    ("paris", 48.8566, 2.3522),
    ("london", 51.5074, -0.1278),
    ("tokyo", 35.6762, 139.6503),
    ("new york", 40.7128, -74.0060),
    ("rome", 41.9028, 12.4964),
    ("barcelona", 41.3851, 2.1734),
    ("dubai", 25.2048, 55.2708),
    ("sydney", -33.8688, 151.2093),
    ("istanbul", 41.0082, 28.9784),
    ("bangkok", 13.7563, 100.5018),
    ("san francisco", 37.7749, -122.4194),
    ("los angeles", 34.0522, -118.2437),
    ("miami", 25.7617, -80.1918),
];

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    // Nominatim returns coordinates as strings
    lat: String,
    lon: String,
}

pub struct GeocodingService {
    http_client: reqwest::Client,
}

impl GeocodingService {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .user_agent(concat!("wayplan-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http_client })
    }

    /// Resolve a destination name to a coordinate, degrading gracefully.
    /// Always returns a coordinate; a lookup timeout counts as a failed
    /// lookup and falls through to the static table.
    pub async fn resolve(&self, destination: &str) -> GeoPoint {
        match self.lookup(destination).await {
            Some(point) => point,
            None => fallback_coordinates(destination).unwrap_or(DEFAULT_COORDINATE),
        }
    }

    async fn lookup(&self, destination: &str) -> Option<GeoPoint> {
        let mut url = Url::parse(NOMINATIM_URL).ok()?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", destination)
            .append_pair("limit", "1");

        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Geocoding lookup failed for '{}': {}", destination, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                "Geocoding lookup for '{}' returned status {}",
                destination,
                response.status()
            );
            return None;
        }

        let places: Vec<NominatimPlace> = match response.json().await {
            Ok(places) => places,
            Err(e) => {
                warn!("Failed to parse geocoding response for '{}': {}", destination, e);
                return None;
            }
        };

        let place = places.first()?;
        let lat: f64 = place.lat.parse().ok()?;
        let lng: f64 = place.lon.parse().ok()?;
        Some(GeoPoint::new(lat, lng))
    }
}

/// Static-table tier: first city key contained in the destination wins.
pub fn fallback_coordinates(destination: &str) -> Option<GeoPoint> {
    let needle = destination.to_lowercase();
    FALLBACK_CITIES
        .iter()
        .find(|(city, _, _)| needle.contains(city))
        .map(|&(_, lat, lng)| GeoPoint::new(lat, lng))
}
