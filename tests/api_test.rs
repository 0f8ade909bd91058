use actix_web::{test, web, App};
use serde_json::json;

use wayplan_api::routes;
use wayplan_api::services::geocoding_service::GeocodingService;
use wayplan_api::services::session_service::SessionRegistry;

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let geocoder =
        web::Data::new(GeocodingService::new().expect("failed to build geocoding client"));
    let sessions = web::Data::new(SessionRegistry::new());

    App::new()
        .app_data(geocoder)
        .app_data(sessions)
        .route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/trips")
                        .route("/normalize", web::post().to(routes::trip::normalize))
                        .route("/view-model", web::post().to(routes::trip::view_model)),
                )
                .service(
                    web::scope("/routes")
                        .route("/optimize", web::post().to(routes::map::optimize_route)),
                )
                .service(
                    web::scope("/session")
                        .route("/rotate", web::post().to(routes::trip::rotate_session)),
                ),
        )
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_normalize_endpoint_accepts_alias_fields() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/normalize")
        .set_json(&json!({
            "destination": "Paris",
            "startDate": "2025-06-01",
            "endDate": "2025-06-05",
            "budget_per_person": 1200
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["destination"], "Paris");
    assert_eq!(body["start_date"], "2025-06-01");
    assert_eq!(body["budget"], 1200.0);
}

#[actix_web::test]
async fn test_normalize_endpoint_rejects_invalid_trip() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/normalize")
        .set_json(&json!({
            "destination": "Paris",
            "start_date": "2025-06-05",
            "end_date": "2025-06-01"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("end date"));
}

#[actix_web::test]
async fn test_view_model_with_preresolved_coordinates() {
    let app = test::init_service(test_app()).await;

    // Pre-resolved coordinates and a fixed seed keep the test off the
    // network and fully deterministic.
    let req = test::TestRequest::post()
        .uri("/api/trips/view-model")
        .set_json(&json!({
            "trip": {
                "destination": "Paris",
                "start_date": "2025-06-01",
                "end_date": "2025-06-02"
            },
            "itinerary": {
                "itinerary_content": {
                    "overview": "Two days in Paris",
                    "daily_schedule": [
                        {
                            "day": 1,
                            "activities": [
                                { "activity": "Louvre", "location": "Rivoli" },
                                { "activity": "Eiffel Tower", "location": "Champ de Mars" }
                            ]
                        },
                        { "day": 2, "activities": [ { "activity": "Rest day" } ] }
                    ],
                    "recommendations": {
                        "must_try_restaurants": [ "Le Comptoir: bistro" ]
                    },
                    "total_estimated_cost": 450
                }
            },
            "coordinates": { "lat": 48.8566, "lng": 2.3522 },
            "seed": 7
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["center"]["lat"], 48.8566);
    assert_eq!(body["overview"], "Two days in Paris");
    assert_eq!(body["markers"].as_array().unwrap().len(), 3);
    assert_eq!(body["routes"].as_array().unwrap().len(), 1);
    assert_eq!(body["routes"][0]["positions"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_budget"], 450.0);
    assert!(body["session_id"].as_str().unwrap().starts_with("session_"));

    let rec = &body["markers"][2];
    assert_eq!(rec["is_recommendation"], true);
    assert_eq!(rec["type"], "food");
}

#[actix_web::test]
async fn test_view_model_rejects_invalid_trip() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips/view-model")
        .set_json(&json!({
            "trip": { "destination": "Paris" },
            "coordinates": { "lat": 48.8566, "lng": 2.3522 }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
}

#[actix_web::test]
async fn test_optimize_route_endpoint() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/routes/optimize")
        .set_json(&json!({
            "start": { "lat": 48.8566, "lng": 2.3522 },
            "stops": [
                { "lat": 48.87, "lng": 2.30 },
                { "lat": 48.84, "lng": 2.37 }
            ]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let positions = body["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 4);
    assert_eq!(positions[0], positions[3]);
    assert!(body["total_distance_km"].as_f64().unwrap() > 0.0);
}

#[actix_web::test]
async fn test_session_rotate_returns_fresh_id() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/session/rotate")
        .insert_header(("X-Session-Id", "session_original"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let new_id = body["session_id"].as_str().unwrap();
    assert_ne!(new_id, "session_original");
    assert!(new_id.starts_with("session_"));
}
