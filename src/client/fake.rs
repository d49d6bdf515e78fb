//! In-process `JobsApi` with call counting and failure injection.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::api::job::{CreateJob, Job, UpdateJob};
use crate::status::JobStatus;

use super::{ClientError, JobsApi};

pub(crate) fn job(id: &str, status: JobStatus) -> Job {
    let stamp = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    Job {
        id: id.to_string(),
        company: format!("Company {}", id),
        role: "Engineer".to_string(),
        status,
        date_applied: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        created_at: stamp,
        updated_at: stamp,
    }
}

#[derive(Default)]
pub(crate) struct FakeJobsApi {
    jobs: Mutex<Vec<Job>>,
    next_id: AtomicUsize,
    lists: AtomicUsize,
    updates: AtomicUsize,
    failing: AtomicBool,
}

impl FakeJobsApi {
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            ..Self::default()
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn server_status(&self, id: &str) -> Option<JobStatus> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == id)
            .map(|j| j.status)
    }

    fn check_writes(&self) -> Result<(), ClientError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Rejected {
                status: 500,
                message: "Database error occurred".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl JobsApi for FakeJobsApi {
    async fn list(&self) -> Result<Vec<Job>, ClientError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self.jobs.lock().unwrap().clone())
    }

    async fn create(&self, new: &CreateJob) -> Result<Job, ClientError> {
        self.check_writes()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = job(&format!("new-{}", n), new.status.unwrap_or_default());
        created.company = new.company.clone();
        created.role = new.role.clone();
        created.date_applied = new.date_applied;
        self.jobs.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: &UpdateJob) -> Result<Job, ClientError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check_writes()?;
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
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
        Ok(job.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.check_writes()?;
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        if jobs.len() == before {
            return Err(ClientError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
