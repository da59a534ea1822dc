use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use videotube_backend::config::{Config, StoreBackend};
use videotube_backend::store::{EntityStore, MemoryStore, PgStore};
use videotube_backend::{handlers, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;

    let store: Arc<dyn EntityStore> = match &config.store {
        StoreBackend::Postgres { url, max_connections } => {
            let store = PgStore::connect(url, *max_connections).await?;
            store.migrate().await?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            info!("Using the in-memory store; data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let app_state = web::Data::new(AppState::new(store, config.jwt_secret.clone()));
    let allowed_origins = config.cors_allowed_origins.clone();

    info!("Starting HTTP server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .supports_credentials();

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
