use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::map::GeoPoint;
use crate::services::geocoding_service::GeocodingService;
use crate::services::route_service;

#[derive(Deserialize)]
pub struct GeocodeParams {
    q: String,
}

/// Resolve a free-text destination to a coordinate. Always succeeds; the
/// resolver degrades through its fallback tiers internally.
pub async fn geocode(
    geocoder: web::Data<GeocodingService>,
    params: web::Query<GeocodeParams>,
) -> impl Responder {
    let point = geocoder.resolve(&params.q).await;
    HttpResponse::Ok().json(point)
}

#[derive(Deserialize)]
pub struct OptimizeRequest {
    pub start: GeoPoint,
    #[serde(default)]
    pub stops: Vec<GeoPoint>,
}

#[derive(Serialize)]
pub struct OptimizeResponse {
    pub positions: Vec<GeoPoint>,
    pub total_distance_km: f64,
}

/// Order an unordered set of stops into a closed loop from the start point
/// using the nearest-neighbor heuristic.
pub async fn optimize_route(body: web::Json<OptimizeRequest>) -> impl Responder {
    let positions = route_service::optimize_stop_order(body.start, &body.stops);
    let total_distance_km = route_service::total_distance_km(&positions);

    HttpResponse::Ok().json(OptimizeResponse {
        positions,
        total_distance_km,
    })
}
