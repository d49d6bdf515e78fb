use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::validation::ErrorResponse;
use crate::db::store::{JobStore, StoreError};
use super::models::{CreateJob, Job, UpdateJob};

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Job not found
    #[error("Job not found: {0}")]
    NotFound(String),

    /// Validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Persistence unreachable or failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::StoreUnavailable(other),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServiceError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ServiceError::NotFound(id) => {
                warn!("Job not found: {}", id);
                ErrorResponse::new(format!("Job with id {} not found", id))
            }
            ServiceError::ValidationError(msg) => {
                warn!("Validation error: {}", msg);
                ErrorResponse::new(msg.as_str())
            }
            ServiceError::StoreUnavailable(e) => {
                error!("Store error: {}", e);
                ErrorResponse::new("Database error occurred")
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

fn reject_blank(field: &str, value: Option<&String>) -> Result<(), ServiceError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ServiceError::ValidationError(format!(
            "{} must not be blank",
            field
        ))),
        _ => Ok(()),
    }
}

/// Job service containing business logic
#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// All jobs, newest first
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ServiceError> {
        let jobs = self.store.list().await?;
        info!("Service: Listed {} jobs", jobs.len());
        Ok(jobs)
    }

    /// Create a single job
    ///
    /// # Business Logic
    /// - Rejects whitespace-only company or role
    /// - Status defaults to `Applied` when omitted
    /// - Creates job in the store
    /// - Logs the operation
    pub async fn create_job(&self, job: &CreateJob) -> Result<Job, ServiceError> {
        reject_blank("company", Some(&job.company))?;
        reject_blank("role", Some(&job.role))?;
        info!("Service: Creating job company={} role={}", job.company, job.role);

        let created = self.store.create(job).await?;

        info!("Service: Job created successfully with id={}", created.id);
        Ok(created)
    }

    /// Apply a partial update to one job
    pub async fn update_job(&self, id: &str, changes: &UpdateJob) -> Result<Job, ServiceError> {
        reject_blank("company", changes.company.as_ref())?;
        reject_blank("role", changes.role.as_ref())?;
        if changes.is_empty() {
            info!("Service: Empty update for job id={}, touching updated_at only", id);
        }

        let updated = self.store.update(id, changes).await?;

        info!("Service: Job id={} updated, status={}", updated.id, updated.status);
        Ok(updated)
    }

    pub async fn delete_job(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        info!("Service: Job id={} deleted", id);
        Ok(())
    }

    /// Whether the backing store currently answers
    pub async fn store_reachable(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}
