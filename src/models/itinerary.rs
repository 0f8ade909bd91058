use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Fixed activity-type vocabulary. Unknown tags degrade to `Other` rather
/// than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    Sightseeing,
    Cultural,
    Adventure,
    Food,
    Shopping,
    Entertainment,
    Accommodation,
    Transport,
    Activity,
    Restaurant,
    Attraction,
    Other,
}

impl ActivityType {
    pub fn parse(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "sightseeing" => Self::Sightseeing,
            "cultural" => Self::Cultural,
            "adventure" => Self::Adventure,
            "food" => Self::Food,
            "shopping" => Self::Shopping,
            "entertainment" => Self::Entertainment,
            "accommodation" => Self::Accommodation,
            "transport" => Self::Transport,
            "activity" => Self::Activity,
            "restaurant" => Self::Restaurant,
            "attraction" => Self::Attraction,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sightseeing => "sightseeing",
            Self::Cultural => "cultural",
            Self::Adventure => "adventure",
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Accommodation => "accommodation",
            Self::Transport => "transport",
            Self::Activity => "activity",
            Self::Restaurant => "restaurant",
            Self::Attraction => "attraction",
            Self::Other => "other",
        }
    }
}

impl Serialize for ActivityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

impl Activity {
    pub fn has_location(&self) -> bool {
        self.location
            .as_deref()
            .map(|loc| !loc.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DaySchedule {
    pub day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// A recommendation entry normalized from either the legacy string shape
/// (`"Name: description"`) or the structured object shape.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rec_type: Option<ActivityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(rename = "bestTime", skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
}

impl Recommendation {
    /// Best-effort conversion of one raw recommendation entry. Returns `None`
    /// for shapes that carry no usable name.
    pub fn from_value(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(text) => {
                let title = text.split(':').next().unwrap_or(text).trim();
                if title.is_empty() {
                    return None;
                }
                Some(Self {
                    title: title.to_string(),
                    description: text.clone(),
                    rec_type: None,
                    area: None,
                    rating: None,
                    best_time: None,
                })
            }
            Value::Object(fields) => {
                let title = fields
                    .get("name")
                    .or_else(|| fields.get("title"))
                    .and_then(Value::as_str)?;
                Some(Self {
                    title: title.to_string(),
                    description: fields
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    rec_type: fields
                        .get("type")
                        .and_then(Value::as_str)
                        .map(ActivityType::parse),
                    area: fields
                        .get("area")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    rating: fields.get("rating").and_then(Value::as_f64),
                    best_time: fields
                        .get("bestTime")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationCategory {
    pub name: String,
    pub items: Vec<Recommendation>,
}

/// Ordered mapping from category name to recommendation items. Category order
/// is preserved so downstream marker synthesis stays deterministic for a
/// seeded random source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations(pub Vec<RecommendationCategory>);

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecommendationCategory> {
        self.0.iter()
    }

    pub fn get(&self, category: &str) -> Option<&[Recommendation]> {
        self.0
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.items.as_slice())
    }

    pub fn item_count(&self) -> usize {
        self.0.iter().map(|c| c.items.len()).sum()
    }
}

// Serialized as a JSON object so the wire shape matches the source data.
impl Serialize for Recommendations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(&category.name, &category.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Recommendations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecVisitor;

        impl<'de> Visitor<'de> for RecVisitor {
            type Value = Recommendations;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to recommendation entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories = Vec::new();
                while let Some((name, items)) = access.next_entry::<String, Value>()? {
                    let items = match items.as_array() {
                        Some(entries) => entries
                            .iter()
                            .filter_map(Recommendation::from_value)
                            .collect(),
                        None => Vec::new(),
                    };
                    categories.push(RecommendationCategory { name, items });
                }
                Ok(Recommendations(categories))
            }
        }

        deserializer.deserialize_map(RecVisitor)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TotalEstimates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub luxury_total: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct BudgetBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimates: Option<TotalEstimates>,
    #[serde(flatten)]
    pub categories: serde_json::Map<String, Value>,
}

/// Root-level budget object produced by the separate budget-regeneration
/// call, kept detached from the itinerary content.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct DetailedBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimated: Option<f64>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub categories: serde_json::Map<String, Value>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub breakdown: serde_json::Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_comparison: Option<String>,
}

/// Canonical itinerary content. Every container defaults to empty so
/// downstream code never null-checks.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ItineraryContent {
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub daily_schedule: Vec<DaySchedule>,
    #[serde(default, skip_serializing_if = "Recommendations::is_empty")]
    pub recommendations: Recommendations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_breakdown: Option<BudgetBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimated_cost: Option<f64>,
}

impl ItineraryContent {
    pub fn is_empty(&self) -> bool {
        self.overview.is_empty()
            && self.daily_schedule.is_empty()
            && self.recommendations.is_empty()
            && self.budget_breakdown.is_none()
            && self.total_estimated_cost.is_none()
    }
}
