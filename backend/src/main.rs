mod config;
mod services;
mod store;

use crate::config::Settings;
use crate::services::bookings::{self, BookingIntake};
use crate::store::SqliteStore;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings =
        Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Storage client is created once here and handed to the intake handler.
    let store = SqliteStore::open(&settings.db_path).map_err(io::Error::other)?;
    match store.count(&settings.collection) {
        Ok(existing) => info!(
            "Using {} ({} documents in '{}')",
            store.path().display(),
            existing,
            settings.collection
        ),
        Err(e) => warn!("Could not count existing bookings: {}", e),
    }

    let intake = web::Data::new(
        BookingIntake::new(Arc::new(store), settings.collection.clone())
            .with_body_limit(settings.json_limit),
    );

    info!("Server running at http://{}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(intake.clone())
            .service(bookings::configure_routes())
            .default_service(bookings::default_route())
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
