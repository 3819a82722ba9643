pub mod graphql;
pub mod health;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route(graphql::GRAPHQL_PATH, web::post().to(graphql::graphql_handler))
        .route("/", web::get().to(graphql::playground));
}
