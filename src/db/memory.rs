use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use crate::db::ids::next_job_id;

use crate::api::job::{CreateJob, Job, UpdateJob};
use crate::db::store::{JobStore, StoreError};

/// Process-local job store for tests and `serve --in-memory`.
///
/// Jobs are kept newest first, matching the ordering of `list`.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<Vec<Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn list(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.jobs.read().await.clone())
    }

    async fn create(&self, job: &CreateJob) -> Result<Job, StoreError> {
        let now = Utc::now();
        let created = Job {
            id: next_job_id(),
            company: job.company.clone(),
            role: job.role.clone(),
            status: job.status.unwrap_or_default(),
            date_applied: job.date_applied,
            created_at: now,
            updated_at: now,
        };
        debug!("Creating in-memory job id={}", created.id);

        self.jobs.write().await.insert(0, created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: &UpdateJob) -> Result<Job, StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(company) = &changes.company {
            job.company = company.clone();
        }
        if let Some(role) = &changes.role {
            job.role = role.clone();
        }
        if let Some(status) = changes.status {
            job.status = status;
        }
        if let Some(date_applied) = changes.date_applied {
            job.date_applied = date_applied;
        }
        job.updated_at = Utc::now();

        Ok(job.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let index = jobs
            .iter()
            .position(|job| job.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        jobs.remove(index);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
