use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use mongodb::bson::doc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod error;
mod models;
mod routes;
mod state;
mod store;
mod upload;

use config::Config;
use state::AppState;
use store::{MongoItemStore, MongoOrderStore};
use upload::CloudinaryClient;

/// Fallback database name when the connection string does not name one.
const DEFAULT_DATABASE: &str = "menu";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // .env first, so the environment is complete before anything reads it
    let _env = dotenvy::dotenv();

    // Structured logging with environment-based filtering; override the
    // default with RUST_LOG, e.g. RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,menu_service=debug")),
        )
        .init();

    // Aborts here when MONGO_URI is missing.
    let config = Config::load()?;

    tracing::info!("Connecting to MongoDB...");
    let client = mongodb::Client::with_uri_str(&config.mongo_uri).await?;
    let db = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

    // Fail fast on an unreachable store instead of at the first request.
    db.run_command(doc! { "ping": 1 }).await?;
    tracing::info!("✅ MongoDB connected");

    let state = web::Data::new(AppState {
        items: Arc::new(MongoItemStore::new(&db)),
        orders: Arc::new(MongoOrderStore::new(&db)),
        uploads: Arc::new(CloudinaryClient::new(config.cloudinary.clone())),
    });

    let port = config.port;
    tracing::info!("🚀 Server is running on port {}", port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .app_data(routes::json_config())
            .app_data(routes::multipart_config())
            .configure(routes::configure)
            .default_service(web::route().to(routes::not_found))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}
