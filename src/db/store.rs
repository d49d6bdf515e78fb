use async_trait::async_trait;
use thiserror::Error;

use crate::api::job::{CreateJob, Job, UpdateJob};

/// Errors raised by a job store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No job with this id
    #[error("job not found: {0}")]
    NotFound(String),

    /// Underlying persistence unreachable or failed
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Persistent owner of job records.
///
/// Every write touches exactly one record; there are no batch operations.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// All jobs, newest first
    async fn list(&self) -> Result<Vec<Job>, StoreError>;

    async fn create(&self, job: &CreateJob) -> Result<Job, StoreError>;

    /// Apply the provided fields and refresh `updated_at`
    async fn update(&self, id: &str, changes: &UpdateJob) -> Result<Job, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Connectivity probe for health checks
    async fn ping(&self) -> Result<(), StoreError>;
}
