//! Client-side access to the jobs REST API.

use async_trait::async_trait;

use crate::api::job::{CreateJob, Job, UpdateJob};

pub mod error;
pub mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use error::ClientError;
pub use http::HttpJobsClient;

/// The four job calls the board issues
#[async_trait]
pub trait JobsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Job>, ClientError>;

    async fn create(&self, job: &CreateJob) -> Result<Job, ClientError>;

    async fn update(&self, id: &str, changes: &UpdateJob) -> Result<Job, ClientError>;

    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}
