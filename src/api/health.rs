use crate::services::BookStore;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

/// GET /health - 503 when MongoDB does not answer a ping
pub async fn health_check(store: web::Data<BookStore>) -> impl Responder {
    let reachable = match store.ping().await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("⚠️ Health check: database unreachable: {}", e);
            false
        }
    };

    let body = HealthResponse {
        status: if reachable { "healthy" } else { "degraded" }.to_string(),
        service: "book-store".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if reachable { "connected" } else { "unreachable" }.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    if reachable {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
