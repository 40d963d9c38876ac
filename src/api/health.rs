use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::MongoDB;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

impl HealthResponse {
    fn new(database_up: bool) -> Self {
        Self {
            status: (if database_up { "healthy" } else { "unhealthy" }).to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: (if database_up { "up" } else { "down" }).to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(db: web::Data<MongoDB>) -> impl Responder {
    match db.health_check().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::new(true)),
        Err(e) => {
            log::warn!("⚠️  Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::new(false))
        }
    }
}
