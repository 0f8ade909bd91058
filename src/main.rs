use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::info;

use wayplan_api::routes;
use wayplan_api::services::geocoding_service::GeocodingService;
use wayplan_api::services::session_service::SessionRegistry;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let geocoder = web::Data::new(
        GeocodingService::new().expect("failed to build geocoding HTTP client"),
    );
    let sessions = web::Data::new(SessionRegistry::new());

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(geocoder.clone())
            .app_data(sessions.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .route("/geocode", web::get().to(routes::map::geocode))
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
                            .route("/rotate", web::post().to(routes::trip::rotate_session))
                            .route("/clear", web::post().to(routes::trip::clear_session)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
