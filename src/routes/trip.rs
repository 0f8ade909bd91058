use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::itinerary::{BudgetBreakdown, DetailedBudget, ItineraryContent};
use crate::models::map::{GeoPoint, Marker, Route};
use crate::models::trip::{normalize_trip, TripRecord};
use crate::services::budget_service::{self, BudgetTotal};
use crate::services::extraction_service::extract_content;
use crate::services::geocoding_service::GeocodingService;
use crate::services::marker_service;
use crate::services::route_service;
use crate::services::session_service::SessionRegistry;

pub const SESSION_HEADER: &str = "X-Session-Id";

#[derive(Deserialize)]
pub struct ViewModelRequest {
    /// Trip-like record; historical field-name variants are accepted.
    pub trip: Value,
    /// Raw itinerary payload in any of the supported shapes.
    #[serde(default)]
    pub itinerary: Value,
    /// Pre-resolved destination coordinate; skips the geocode call.
    pub coordinates: Option<GeoPoint>,
    /// Seed for reproducible marker placement. Unseeded requests jitter
    /// differently on every call.
    pub seed: Option<u64>,
}

#[derive(Serialize)]
pub struct ViewModelResponse {
    pub session_id: String,
    pub trip: TripRecord,
    pub center: GeoPoint,
    pub overview: String,
    pub markers: Vec<Marker>,
    pub routes: Vec<Route>,
    pub total_budget: BudgetTotal,
}

/// Normalize a trip record, surfacing validation errors before any network
/// interaction.
pub async fn normalize(body: web::Json<Value>) -> impl Responder {
    match normalize_trip(&body) {
        Ok(trip) => HttpResponse::Ok().json(trip),
        Err(e) => HttpResponse::UnprocessableEntity().json(json!({ "error": e.to_string() })),
    }
}

/// Build the full map view model for one trip in a single pass: canonical
/// trip record, destination coordinate, markers, per-day routes and the
/// aggregated budget total.
pub async fn view_model(
    req: HttpRequest,
    geocoder: web::Data<GeocodingService>,
    sessions: web::Data<SessionRegistry>,
    body: web::Json<ViewModelRequest>,
) -> impl Responder {
    let trip = match normalize_trip(&body.trip) {
        Ok(trip) => trip,
        Err(e) => {
            return HttpResponse::UnprocessableEntity().json(json!({ "error": e.to_string() }))
        }
    };

    let session_id = session_id_from(&req);
    let content = extract_content(&body.itinerary);

    let center = match body.coordinates {
        Some(point) => point,
        None => {
            sessions
                .resolve_destination(&session_id, &geocoder, &trip.destination)
                .await
        }
    };

    let markers = match body.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            marker_service::synthesize(
                center,
                &content.daily_schedule,
                &content.recommendations,
                &mut rng,
            )
        }
        None => {
            marker_service::synthesize_default(center, &content.daily_schedule, &content.recommendations)
        }
    };
    let routes = route_service::daily_routes(&markers);

    let total_budget = aggregate_budget(&content, &body.itinerary);

    info!(
        "Built view model for '{}': {} markers, {} routes",
        trip.destination,
        markers.len(),
        routes.len()
    );

    HttpResponse::Ok().json(ViewModelResponse {
        session_id,
        trip,
        center,
        overview: content.overview,
        markers,
        routes,
        total_budget,
    })
}

/// Rotate the caller's anonymous session, returning the replacement id.
pub async fn rotate_session(req: HttpRequest, sessions: web::Data<SessionRegistry>) -> impl Responder {
    let session_id = sessions.rotate(&session_id_from(&req));
    HttpResponse::Ok().json(json!({ "session_id": session_id }))
}

/// Clear the caller's session cache without changing its id.
pub async fn clear_session(req: HttpRequest, sessions: web::Data<SessionRegistry>) -> impl Responder {
    let session_id = session_id_from(&req);
    sessions.clear(&session_id);
    HttpResponse::Ok().json(json!({ "session_id": session_id }))
}

// Root-level budget objects live beside the content, not inside it.
fn aggregate_budget(content: &ItineraryContent, payload: &Value) -> BudgetTotal {
    let root_budget = payload
        .get("budget_breakdown")
        .cloned()
        .and_then(|raw| serde_json::from_value::<BudgetBreakdown>(raw).ok());
    let detailed_budget = payload
        .get("detailed_budget")
        .cloned()
        .and_then(|raw| serde_json::from_value::<DetailedBudget>(raw).ok());

    budget_service::display_total(content, root_budget.as_ref(), detailed_budget.as_ref())
}

fn session_id_from(req: &HttpRequest) -> String {
    req.headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!("session_{}", uuid::Uuid::new_v4().simple())
        })
}
