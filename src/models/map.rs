use serde::{Deserialize, Serialize};

use crate::models::itinerary::ActivityType;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Derived point-of-interest placement for map display. Never persisted,
/// recomputed on every view-model build.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub position: GeoPoint,
    pub title: String,
    #[serde(rename = "type")]
    pub marker_type: ActivityType,
    /// Owning day, 1-based. `None` for recommendation-sourced markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// 1-based position within the owning day's activity list, or within the
    /// owning recommendation category.
    pub sequence: u32,
    pub is_recommendation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Ordered connection of one day's markers into a travel path.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Route {
    pub day: u32,
    pub positions: Vec<GeoPoint>,
    pub color: String,
}

const DAY_COLORS: &[&str] = &[
    "#3B82F6", // Blue
    "#10B981", // Green
    "#F59E0B", // Amber
    "#EF4444", // Red
    "#8B5CF6", // Purple
    "#EC4899", // Pink
    "#06B6D4", // Cyan
];

pub fn day_color(day_index: usize) -> &'static str {
    DAY_COLORS[day_index % DAY_COLORS.len()]
}
