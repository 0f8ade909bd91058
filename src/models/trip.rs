use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// How a trip record entered the system.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TripOrigin {
    #[serde(rename = "regular")]
    Regular,
    #[serde(rename = "ai-generated")]
    AiGenerated,
    #[serde(rename = "free-session")]
    FreeSession,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("unparseable date in field {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("end date must not be before start date")]
    DateRange,
    #[error("traveler count must be at least 1")]
    TravelerCount,
}

/// Canonical trip record. Older records use snake_case field names while
/// newer clients send camelCase; [`normalize_trip`] collapses both onto this
/// one shape.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TripRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_style: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub origin: TripOrigin,
}

impl TripRecord {
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

// Alias lists, snake_case first. First defined value wins.
const START_DATE_ALIASES: &[&str] = &["start_date", "startDate"];
const END_DATE_ALIASES: &[&str] = &["end_date", "endDate"];
const BUDGET_ALIASES: &[&str] = &["budget_per_person", "budget"];
const CREATED_AT_ALIASES: &[&str] = &["created_at", "createdAt"];
const TRAVELERS_ALIASES: &[&str] = &["travelers", "adults"];

/// Return the first defined (non-null) value among the given field aliases.
pub fn first_defined<'a>(record: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|field| record.get(*field))
        .find(|v| !v.is_null())
}

/// Normalize a trip-like JSON record into a canonical [`TripRecord`].
///
/// Missing optional fields stay absent; a missing destination or date is a
/// caller-visible validation error, never silently defaulted.
pub fn normalize_trip(raw: &Value) -> Result<TripRecord, ValidationError> {
    let destination = raw
        .get("destination")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingField("destination"))?
        .to_string();

    let start_date = required_date(raw, START_DATE_ALIASES, "start_date")?;
    let end_date = required_date(raw, END_DATE_ALIASES, "end_date")?;
    if end_date < start_date {
        return Err(ValidationError::DateRange);
    }

    let travelers = match first_defined(raw, TRAVELERS_ALIASES).and_then(Value::as_i64) {
        Some(n) if n < 1 => return Err(ValidationError::TravelerCount),
        Some(n) => n as u32,
        None => 1,
    };

    let budget = first_defined(raw, BUDGET_ALIASES).and_then(as_amount);

    let created_at = first_defined(raw, CREATED_AT_ALIASES)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Ok(TripRecord {
        id: raw.get("id").and_then(Value::as_i64),
        destination,
        start_date,
        end_date,
        travelers,
        budget,
        currency: raw
            .get("currency")
            .and_then(Value::as_str)
            .unwrap_or("USD")
            .to_string(),
        travel_style: raw
            .get("travel_style")
            .and_then(Value::as_str)
            .map(str::to_string),
        interests: raw
            .get("interests")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        created_at,
        origin: infer_origin(raw),
    })
}

fn required_date(
    raw: &Value,
    aliases: &[&str],
    field: &'static str,
) -> Result<NaiveDate, ValidationError> {
    let value = first_defined(raw, aliases).ok_or(ValidationError::MissingField(field))?;
    let text = value.as_str().ok_or_else(|| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })?;
    parse_date(text).ok_or_else(|| ValidationError::InvalidDate {
        field,
        value: text.to_string(),
    })
}

// Dates arrive either as plain YYYY-MM-DD or as a full RFC 3339 timestamp.
fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

fn as_amount(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn infer_origin(raw: &Value) -> TripOrigin {
    if let Some(origin) = raw.get("origin") {
        if let Ok(parsed) = serde_json::from_value::<TripOrigin>(origin.clone()) {
            return parsed;
        }
    }
    if raw.get("session_id").is_some() {
        TripOrigin::FreeSession
    } else if raw.get("itinerary_content").is_some() {
        TripOrigin::AiGenerated
    } else {
        TripOrigin::Regular
    }
}
