use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use studyhub_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

/// How often idle sessions are looked for.
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    config.log_missing_credentials();

    let bind_address = config.bind_address();
    let idle_minutes = config.session_idle_minutes;
    let allowed_origin = config.cors_allowed_origin.clone();
    let state = AppState::new(config);

    let purge_service = state.session_service.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = purge_service.purge_idle_sessions(idle_minutes).await {
                log::error!("Idle session purge failed: {}", e);
            }
        }
    });

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .expose_headers(["x-request-id"]),
            None => Cors::permissive(),
        };

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .wrap(cors)
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
