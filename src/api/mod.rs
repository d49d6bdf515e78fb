//! HTTP surface under `/api`.

use actix_cors::Cors;
use actix_web::{http::header, web};

pub mod health;
pub mod job;
pub mod validation;

use health::health_config;
use job::handlers::job_config;

/// Mount health and job routes under `/api`
pub fn api_config(config: &mut web::ServiceConfig) {
    config.service(
        web::scope("/api")
            .configure(health_config)
            .configure(job_config),
    );
}

/// Open CORS policy, the board UI may be served from any origin
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}
