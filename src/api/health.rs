use actix_web::{get, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::api::job::JobService;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    fn new(message: &str, database: &str, error: Option<String>) -> Self {
        Self {
            message: message.to_string(),
            database: database.to_string(),
            error,
        }
    }
}

/// Health check endpoint
///
/// Always answers 200; the body reports whether the store is reachable.
#[get("/health")]
async fn health_check(service: web::Data<JobService>) -> impl Responder {
    match service.store_reachable().await {
        Ok(()) => {
            debug!("Health check: database connected");
            HttpResponse::Ok().json(HealthResponse::new("Server is running!", "Connected", None))
        }
        Err(e) => {
            error!("Health check failed: {:?}", e);
            HttpResponse::Ok().json(HealthResponse::new(
                "Server is running!",
                "Disconnected",
                Some(e.to_string()),
            ))
        }
    }
}

/// Readiness check endpoint
///
/// Returns 503 while the store is unreachable so load balancers stop
/// routing here; recovers on its own once the database returns.
#[get("/ready")]
async fn readiness_check(service: web::Data<JobService>) -> impl Responder {
    match service.store_reachable().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::new("ready", "Connected", None)),
        Err(e) => {
            error!("Readiness check failed: database unavailable: {:?}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::new(
                "not_ready",
                "Disconnected",
                Some(e.to_string()),
            ))
        }
    }
}

/// Liveness check endpoint, does not touch dependencies
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::new("alive", "not_checked", None))
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
