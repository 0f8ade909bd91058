//! Itinerary Content Extractor
//!
//! Reshapes raw itinerary payloads into canonical [`ItineraryContent`].
//! Source data arrives in several historical shapes: content nested under an
//! `itinerary_content` key, content wrapped one level under `itinerary`, or
//! content sitting at the payload root. AI-generated payloads additionally
//! use inconsistent field names per activity and mix plain-string and
//! structured recommendation entries.
//!
//! This is a pure best-effort reshaping stage: missing or malformed sections
//! degrade to empty containers, never to an error.

use regex::Regex;
use serde_json::Value;

use crate::models::itinerary::{
    Activity, ActivityType, BudgetBreakdown, DaySchedule, ItineraryContent, Recommendation,
    RecommendationCategory, Recommendations,
};

/// Extract canonical itinerary content from a raw payload.
///
/// Idempotent: feeding the serialized output back through this function
/// yields the same structure.
pub fn extract_content(payload: &Value) -> ItineraryContent {
    let content = locate_content(payload);

    ItineraryContent {
        overview: content
            .get("overview")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        daily_schedule: extract_daily_schedule(content.get("daily_schedule")),
        recommendations: extract_recommendations(content.get("recommendations")),
        budget_breakdown: content
            .get("budget_breakdown")
            .cloned()
            .and_then(|raw| serde_json::from_value::<BudgetBreakdown>(raw).ok()),
        total_estimated_cost: content.get("total_estimated_cost").and_then(parse_cost),
    }
}

// Shape resolution, in fixed priority order. Falls through to the payload
// root so unwrapped content still extracts.
fn locate_content(payload: &Value) -> &Value {
    if let Some(content) = payload.get("itinerary_content").filter(|v| v.is_object()) {
        return content;
    }
    if let Some(itinerary) = payload.get("itinerary").filter(|v| v.is_object()) {
        if let Some(content) = itinerary.get("itinerary_content").filter(|v| v.is_object()) {
            return content;
        }
        return itinerary;
    }
    payload
}

fn extract_daily_schedule(raw: Option<&Value>) -> Vec<DaySchedule> {
    let days = match raw.and_then(Value::as_array) {
        Some(days) => days,
        None => return Vec::new(),
    };

    days.iter()
        .enumerate()
        .filter_map(|(index, day)| extract_day(day, index))
        .collect()
}

fn extract_day(raw: &Value, index: usize) -> Option<DaySchedule> {
    let fields = raw.as_object()?;

    let activities = fields
        .get("activities")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(extract_activity).collect())
        .unwrap_or_default();

    Some(DaySchedule {
        day: fields
            .get("day")
            .and_then(Value::as_u64)
            .map(|d| d as u32)
            .unwrap_or(index as u32 + 1),
        date: fields
            .get("date")
            .and_then(Value::as_str)
            .map(str::to_string),
        theme: fields
            .get("theme")
            .or_else(|| fields.get("title"))
            .and_then(Value::as_str)
            .map(str::to_string),
        activities,
    })
}

fn extract_activity(raw: &Value) -> Option<Activity> {
    let fields = raw.as_object()?;

    // Name carries two historical aliases; entries without one are dropped.
    let name = fields
        .get("activity")
        .or_else(|| fields.get("name"))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())?;

    Some(Activity {
        name: name.to_string(),
        time: fields
            .get("time")
            .and_then(Value::as_str)
            .map(str::to_string),
        description: fields
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        location: fields
            .get("location")
            .or_else(|| fields.get("area"))
            .and_then(Value::as_str)
            .map(str::to_string),
        activity_type: fields
            .get("type")
            .and_then(Value::as_str)
            .map(ActivityType::parse),
        estimated_cost: fields.get("estimated_cost").and_then(parse_cost),
        duration: fields
            .get("duration")
            .and_then(Value::as_str)
            .map(str::to_string),
        tips: extract_tips(fields.get("tips")),
    })
}

// Tips show up as a single string or as a list of strings.
fn extract_tips(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(tip) => Some(tip.clone()),
        Value::Array(tips) => {
            let joined: Vec<&str> = tips.iter().filter_map(Value::as_str).collect();
            if joined.is_empty() {
                None
            } else {
                Some(joined.join("; "))
            }
        }
        _ => None,
    }
}

fn extract_recommendations(raw: Option<&Value>) -> Recommendations {
    let categories = match raw.and_then(Value::as_object) {
        Some(map) => map,
        None => return Recommendations::default(),
    };

    let mut result = Vec::new();
    for (name, items) in categories {
        let items: Vec<Recommendation> = match items.as_array() {
            Some(entries) => entries.iter().filter_map(Recommendation::from_value).collect(),
            None => Vec::new(),
        };
        result.push(RecommendationCategory {
            name: name.clone(),
            items,
        });
    }
    Recommendations(result)
}

/// Read a cost that may be a plain number or a cost-bearing string such as
/// `"$45"`, `"1,200 USD"` or `"20-30"` (first amount wins).
pub fn parse_cost(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => {
            let pattern = Regex::new(r"(\d+(?:,\d{3})*(?:\.\d+)?)").ok()?;
            let amount = pattern.captures(text)?.get(1)?.as_str().replace(',', "");
            amount.parse().ok()
        }
        _ => None,
    }
}
