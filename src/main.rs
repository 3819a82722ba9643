mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🚀 Starting Book Store...");
    log::info!("📊 Database: {}", config.database_name);

    let db = match database::MongoDB::new(&config.database_url, &config.database_name).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("✅ MongoDB connected successfully");

    let tokens = services::TokenService::new(config.jwt_secret.clone(), config.jwt_life_time_days);
    let store = services::BookStore::new(Arc::new(db.clone()), tokens);
    let schema = web::Data::new(api::graphql::build_schema(store.clone()));
    let store = web::Data::new(store);

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!(
        "📚 GraphQL playground at: http://{}:{}/",
        config.host,
        config.port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        App::new()
            .app_data(schema.clone())
            .app_data(store.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    log::info!("👋 Server stopped, closing MongoDB connections");
    db.client().clone().shutdown().await;

    Ok(())
}
