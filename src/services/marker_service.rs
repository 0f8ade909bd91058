//! Marker Synthesizer
//!
//! Converts daily-schedule activities and recommendation lists into
//! positioned map markers around the destination coordinate.
//!
//! Placement is a synthetic heuristic, not a geocode of the activity
//! location: the source data never carries per-activity coordinates, so each
//! marker is placed on a jittered ring around the destination. Activities
//! spread over the full circle in schedule order; recommendation markers use
//! the same polar scheme offset by pi radians and a wider radius band so they
//! cluster on the opposite side of the destination.
//!
//! The random source is injectable so tests can seed a deterministic
//! generator; [`synthesize_default`] uses `thread_rng` and is not
//! reproducible run-to-run by design.

use rand::Rng;
use std::f64::consts::PI;

use crate::models::itinerary::{ActivityType, DaySchedule, Recommendations};
use crate::models::map::{GeoPoint, Marker};

// Radius bands in degrees: base + uniform jitter.
const SCHEDULE_RADIUS_BASE: f64 = 0.02;
const SCHEDULE_RADIUS_JITTER: f64 = 0.015;
const RECOMMENDATION_RADIUS_BASE: f64 = 0.025;
const RECOMMENDATION_RADIUS_JITTER: f64 = 0.01;

/// Produce the full ordered marker set for a destination: schedule markers
/// first (day by day, activity order preserved), then recommendation markers
/// (category order preserved).
pub fn synthesize<R: Rng>(
    destination: GeoPoint,
    daily_schedule: &[DaySchedule],
    recommendations: &Recommendations,
    rng: &mut R,
) -> Vec<Marker> {
    let mut markers = schedule_markers(destination, daily_schedule, rng);
    markers.extend(recommendation_markers(destination, recommendations, rng));
    markers
}

/// Convenience entry point with an unseeded generator.
pub fn synthesize_default(
    destination: GeoPoint,
    daily_schedule: &[DaySchedule],
    recommendations: &Recommendations,
) -> Vec<Marker> {
    synthesize(
        destination,
        daily_schedule,
        recommendations,
        &mut rand::thread_rng(),
    )
}

fn schedule_markers<R: Rng>(
    destination: GeoPoint,
    daily_schedule: &[DaySchedule],
    rng: &mut R,
) -> Vec<Marker> {
    let mut markers = Vec::new();

    for day in daily_schedule {
        let count = day.activities.len();
        for (index, activity) in day.activities.iter().enumerate() {
            // Only located activities get a marker; the angle still spreads
            // over the full activity list so gaps stay visible.
            if !activity.has_location() {
                continue;
            }

            let angle = (index as f64 / count as f64) * 2.0 * PI;
            let radius = SCHEDULE_RADIUS_BASE + rng.gen::<f64>() * SCHEDULE_RADIUS_JITTER;

            markers.push(Marker {
                id: format!("day-{}-activity-{}", day.day, index),
                position: polar_offset(destination, radius, angle),
                title: activity.name.clone(),
                marker_type: activity.activity_type.unwrap_or(ActivityType::Activity),
                day: Some(day.day),
                sequence: index as u32 + 1,
                is_recommendation: false,
                location: activity.location.clone(),
                description: activity.description.clone(),
                cost: activity.estimated_cost,
                time: activity.time.clone(),
                category: None,
            });
        }
    }

    markers
}

fn recommendation_markers<R: Rng>(
    destination: GeoPoint,
    recommendations: &Recommendations,
    rng: &mut R,
) -> Vec<Marker> {
    let mut markers = Vec::new();

    for category in recommendations.iter() {
        let count = category.items.len();
        let default_type = category_marker_type(&category.name);

        for (index, item) in category.items.iter().enumerate() {
            let angle = (index as f64 / count as f64) * 2.0 * PI + PI;
            let radius =
                RECOMMENDATION_RADIUS_BASE + rng.gen::<f64>() * RECOMMENDATION_RADIUS_JITTER;

            markers.push(Marker {
                id: format!("rec-{}-{}", category.name, index),
                position: polar_offset(destination, radius, angle),
                title: item.title.clone(),
                marker_type: item.rec_type.unwrap_or(default_type),
                day: None,
                sequence: index as u32 + 1,
                is_recommendation: true,
                location: item.area.clone(),
                description: if item.description.is_empty() {
                    None
                } else {
                    Some(item.description.clone())
                },
                cost: None,
                time: None,
                category: Some(category.name.clone()),
            });
        }
    }

    markers
}

fn polar_offset(center: GeoPoint, radius: f64, angle: f64) -> GeoPoint {
    GeoPoint::new(
        center.lat + radius * angle.cos(),
        center.lng + radius * angle.sin(),
    )
}

/// Map a recommendation category name to an activity type by fixed substring
/// rules, defaulting to `Attraction`.
pub fn category_marker_type(category: &str) -> ActivityType {
    let name = category.to_lowercase();
    if ["restaurant", "cuisine", "food", "dining"]
        .iter()
        .any(|kw| name.contains(kw))
    {
        ActivityType::Food
    } else if name.contains("shopping") {
        ActivityType::Shopping
    } else if name.contains("cultural") {
        ActivityType::Cultural
    } else if name.contains("sightseeing") {
        ActivityType::Sightseeing
    } else if name.contains("adventure") {
        ActivityType::Adventure
    } else {
        ActivityType::Attraction
    }
}
