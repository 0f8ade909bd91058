use serde_json::{json, Value};

use wayplan_api::models::itinerary::ActivityType;
use wayplan_api::services::extraction_service::{extract_content, parse_cost};

fn sample_content() -> Value {
    json!({
        "overview": "Three days in Paris",
        "daily_schedule": [
            {
                "day": 1,
                "date": "2025-06-01",
                "theme": "Classics",
                "activities": [
                    {
                        "activity": "Louvre Museum",
                        "time": "09:00",
                        "location": "Rue de Rivoli",
                        "type": "cultural",
                        "estimated_cost": 17,
                        "tips": "Book ahead"
                    },
                    {
                        "name": "Seine Cruise",
                        "area": "Pont Neuf",
                        "estimated_cost": "$15"
                    }
                ]
            }
        ],
        "recommendations": {
            "must_try_restaurants": [
                "Le Comptoir: classic bistro fare",
                { "name": "Septime", "description": "Modern tasting menu", "type": "restaurant", "area": "11th" }
            ]
        },
        "total_estimated_cost": 450,
        "budget_breakdown": {
            "total_estimates": { "budget_total": 400, "luxury_total": 900 }
        }
    })
}

#[test]
fn extracts_content_nested_under_content_key() {
    let payload = json!({ "itinerary_content": sample_content() });
    let content = extract_content(&payload);

    assert_eq!(content.overview, "Three days in Paris");
    assert_eq!(content.daily_schedule.len(), 1);
    assert_eq!(content.total_estimated_cost, Some(450.0));
}

#[test]
fn extracts_content_wrapped_under_itinerary_key() {
    let payload = json!({ "itinerary": { "itinerary_content": sample_content() } });
    let content = extract_content(&payload);
    assert_eq!(content.daily_schedule.len(), 1);

    let payload = json!({ "itinerary": sample_content() });
    let content = extract_content(&payload);
    assert_eq!(content.daily_schedule.len(), 1);
}

#[test]
fn extracts_content_at_payload_root() {
    let content = extract_content(&sample_content());
    assert_eq!(content.daily_schedule.len(), 1);
    assert_eq!(content.recommendations.item_count(), 2);
}

#[test]
fn activity_field_aliases_are_resolved() {
    let content = extract_content(&sample_content());
    let activities = &content.daily_schedule[0].activities;

    assert_eq!(activities[0].name, "Louvre Museum");
    assert_eq!(activities[0].activity_type, Some(ActivityType::Cultural));
    assert_eq!(activities[0].estimated_cost, Some(17.0));
    assert_eq!(activities[1].name, "Seine Cruise");
    assert_eq!(activities[1].location.as_deref(), Some("Pont Neuf"));
    assert_eq!(activities[1].estimated_cost, Some(15.0));
}

#[test]
fn string_recommendation_splits_title_before_first_colon() {
    let content = extract_content(&sample_content());
    let items = content.recommendations.get("must_try_restaurants").unwrap();

    assert_eq!(items[0].title, "Le Comptoir");
    assert_eq!(items[0].description, "Le Comptoir: classic bistro fare");
    assert_eq!(items[1].title, "Septime");
    assert_eq!(items[1].rec_type, Some(ActivityType::Restaurant));
    assert_eq!(items[1].area.as_deref(), Some("11th"));
}

#[test]
fn missing_sections_degrade_to_empty_containers() {
    for payload in [json!({}), json!(null), json!({ "itinerary": {} }), json!([1, 2])] {
        let content = extract_content(&payload);
        assert_eq!(content.overview, "");
        assert!(content.daily_schedule.is_empty());
        assert!(content.recommendations.is_empty());
        assert!(content.budget_breakdown.is_none());
    }
}

#[test]
fn malformed_entries_are_dropped_not_fatal() {
    let payload = json!({
        "daily_schedule": [
            { "day": 1, "activities": [ { "activity": "Walk" }, 42, "not an activity", {} ] },
            "not a day",
            { "activities": [] }
        ],
        "recommendations": {
            "hidden_gems": [ true, { "description": "no name" }, "Canal walk" ],
            "broken": "not an array"
        }
    });

    let content = extract_content(&payload);
    assert_eq!(content.daily_schedule.len(), 2);
    assert_eq!(content.daily_schedule[0].activities.len(), 1);
    // Day without an explicit index takes its 1-based position.
    assert_eq!(content.daily_schedule[1].day, 3);

    assert_eq!(content.recommendations.get("hidden_gems").unwrap().len(), 1);
    assert_eq!(content.recommendations.get("broken").unwrap().len(), 0);
}

#[test]
fn tips_arrays_are_joined() {
    let payload = json!({
        "daily_schedule": [
            { "activities": [ { "activity": "Hike", "tips": ["Bring water", "Start early"] } ] }
        ]
    });

    let content = extract_content(&payload);
    assert_eq!(
        content.daily_schedule[0].activities[0].tips.as_deref(),
        Some("Bring water; Start early")
    );
}

#[test]
fn extraction_is_idempotent() {
    let first = extract_content(&sample_content());
    let serialized = serde_json::to_value(&first).unwrap();
    let second = extract_content(&serialized);
    assert_eq!(first, second);
}

#[test]
fn cost_strings_parse_first_amount() {
    assert_eq!(parse_cost(&json!(25)), Some(25.0));
    assert_eq!(parse_cost(&json!(19.5)), Some(19.5));
    assert_eq!(parse_cost(&json!("$45")), Some(45.0));
    assert_eq!(parse_cost(&json!("1,200.50 USD")), Some(1200.5));
    assert_eq!(parse_cost(&json!("20-30 per person")), Some(20.0));
    assert_eq!(parse_cost(&json!("free")), None);
    assert_eq!(parse_cost(&json!(null)), None);
}
