use actix_web::{
    delete, get, post, put,
    web::{scope, Data, Path, ServiceConfig},
    HttpResponse,
};
use actix_web_validator::Json;

use super::dto::{JobResponse, MessageResponse};
use super::models::{CreateJob, UpdateJob};
use super::service::{JobService, ServiceError};

#[get("")]
async fn list_jobs(service: Data<JobService>) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs().await?;
    let body: Vec<JobResponse<'_>> = jobs.iter().map(JobResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[post("")]
async fn create_job(
    service: Data<JobService>,
    job: Json<CreateJob>,
) -> Result<HttpResponse, ServiceError> {
    let created = service.create_job(&job).await?;
    Ok(HttpResponse::Created().json(JobResponse::from(&created)))
}

#[put("/{id}")]
async fn update_job(
    service: Data<JobService>,
    id: Path<String>,
    changes: Json<UpdateJob>,
) -> Result<HttpResponse, ServiceError> {
    let updated = service.update_job(&id, &changes).await?;
    Ok(HttpResponse::Ok().json(JobResponse::from(&updated)))
}

#[delete("/{id}")]
async fn delete_job(
    service: Data<JobService>,
    id: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    service.delete_job(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Job deleted successfully".to_string(),
    }))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("/jobs")
            .service(list_jobs)
            .service(create_job)
            .service(update_job)
            .service(delete_job),
    );
}
