//! Route Builder
//!
//! Two route styles are supported:
//! - per-day routes connect a day's markers in the schedule's original
//!   activity order, since the schedule sequence is intentional;
//! - the multi-stop optimized route orders an arbitrary set of stops into a
//!   closed loop with a nearest-neighbor heuristic, used by the explore view
//!   where stops have no inherent order. O(n^2), no optimality guarantee.

use std::collections::BTreeMap;

use crate::models::map::{day_color, GeoPoint, Marker, Route};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Build one route per day with at least two located activities, connecting
/// that day's markers in sequence order.
pub fn daily_routes(markers: &[Marker]) -> Vec<Route> {
    let mut by_day: BTreeMap<u32, Vec<GeoPoint>> = BTreeMap::new();

    for marker in markers {
        if marker.is_recommendation {
            continue;
        }
        if let Some(day) = marker.day {
            by_day.entry(day).or_default().push(marker.position);
        }
    }

    by_day
        .into_iter()
        .filter(|(_, positions)| positions.len() > 1)
        .map(|(day, positions)| Route {
            day,
            positions,
            color: day_color(day.saturating_sub(1) as usize).to_string(),
        })
        .collect()
}

/// Order stops into a closed loop starting and ending at `start`, repeatedly
/// visiting the nearest unvisited stop. Ties go to the first-encountered stop
/// in the remaining set.
pub fn optimize_stop_order(start: GeoPoint, stops: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut route = Vec::with_capacity(stops.len() + 2);
    route.push(start);

    let mut remaining: Vec<GeoPoint> = stops.to_vec();
    let mut current = start;

    while !remaining.is_empty() {
        let mut nearest_index = 0;
        let mut nearest_distance = haversine_km(current, remaining[0]);

        for (index, stop) in remaining.iter().enumerate().skip(1) {
            let distance = haversine_km(current, *stop);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest_index = index;
            }
        }

        current = remaining.remove(nearest_index);
        route.push(current);
    }

    // Close the loop back to the starting point.
    route.push(start);
    route
}

/// Great-circle distance in kilometers.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Sum of consecutive haversine distances along a path.
pub fn total_distance_km(path: &[GeoPoint]) -> f64 {
    path.windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}
