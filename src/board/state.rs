use std::collections::HashMap;
use tracing::{debug, error, info, warn};

use crate::api::job::{CreateJob, Job, UpdateJob};
use crate::client::{ClientError, JobsApi};
use crate::status::JobStatus;

/// Cards shown per column page
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// One column's visible page
#[derive(Debug)]
pub struct Column<'a> {
    pub status: JobStatus,
    pub jobs: Vec<&'a Job>,
    pub page: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Result of settling a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The dragged job is no longer on the board
    UnknownJob,
    /// The drop settled against the server
    Settled { persisted: bool, reordered: bool },
    /// The status update failed and the board was reloaded from the server
    Resynced,
}

/// Client-side mirror of every job plus per-column pagination.
///
/// Owned by the view and mutated only through the methods below. Statuses
/// may run ahead of the server while a drag is in progress; `persisted`
/// remembers what the server last confirmed for each job so a drop can
/// tell whether it needs a round-trip.
#[derive(Debug, Clone)]
pub struct BoardState {
    jobs: Vec<Job>,
    persisted: HashMap<String, JobStatus>,
    pages: HashMap<JobStatus, usize>,
    page_size: usize,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl BoardState {
    pub fn new(page_size: usize) -> Self {
        Self {
            jobs: Vec::new(),
            persisted: HashMap::new(),
            pages: HashMap::new(),
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Jobs in board order
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.jobs.iter().position(|job| job.id == id)
    }

    /// Status the server last confirmed for this job
    pub fn persisted_status(&self, id: &str) -> Option<JobStatus> {
        self.persisted.get(id).copied()
    }

    /// Replace the whole board with server truth, dropping local reorders
    /// and optimistic statuses
    pub fn replace_jobs(&mut self, jobs: Vec<Job>) {
        self.persisted = jobs
            .iter()
            .map(|job| (job.id.clone(), job.status))
            .collect();
        self.jobs = jobs;
    }

    /// Fetch every job from the server and replace local state.
    ///
    /// On error the current state is kept untouched.
    pub async fn load<A: JobsApi + ?Sized>(&mut self, api: &A) -> Result<(), ClientError> {
        match api.list().await {
            Ok(jobs) => {
                debug!("Board loaded {} jobs", jobs.len());
                self.replace_jobs(jobs);
                Ok(())
            }
            Err(e) => {
                error!("Error fetching jobs: {}", e);
                Err(e)
            }
        }
    }

    /// Move a job to another column locally, without telling the server
    pub fn apply_optimistic_status_change(&mut self, job_id: &str, new_status: JobStatus) -> bool {
        match self.jobs.iter_mut().find(|job| job.id == job_id) {
            Some(job) if job.status != new_status => {
                debug!("Optimistic move of {} from {} to {}", job_id, job.status, new_status);
                job.status = new_status;
                true
            }
            _ => false,
        }
    }

    /// Put a job back in the column the server last confirmed
    pub fn revert_optimistic(&mut self, job_id: &str) -> bool {
        match self.persisted_status(job_id) {
            Some(status) => self.apply_optimistic_status_change(job_id, status),
            None => false,
        }
    }

    /// Settle a drop.
    ///
    /// Persists `target_status` when it differs from the last confirmed
    /// status; a failed update reloads the whole board. Otherwise moves the
    /// job to `target_position` in board order, which is never persisted.
    pub async fn commit_drag<A: JobsApi + ?Sized>(
        &mut self,
        api: &A,
        job_id: &str,
        target_status: JobStatus,
        target_position: Option<usize>,
    ) -> Result<CommitOutcome, ClientError> {
        let Some(persisted_status) = self
            .index_of(job_id)
            .map(|index| self.persisted_status(job_id).unwrap_or(self.jobs[index].status))
        else {
            warn!("Drop of unknown job {} ignored", job_id);
            return Ok(CommitOutcome::UnknownJob);
        };

        self.apply_optimistic_status_change(job_id, target_status);

        let mut persisted = false;
        if target_status != persisted_status {
            match api.update(job_id, &UpdateJob::status(target_status)).await {
                Ok(updated) => {
                    info!("Job {} moved to {}", job_id, updated.status);
                    self.accept(updated);
                    persisted = true;
                }
                Err(e) => {
                    error!("Error updating job {}: {}, reloading board", job_id, e);
                    self.load(api).await?;
                    return Ok(CommitOutcome::Resynced);
                }
            }
        }

        let reordered = match (target_position, self.index_of(job_id)) {
            (Some(to), Some(from)) => self.move_job(from, to),
            _ => false,
        };

        Ok(CommitOutcome::Settled {
            persisted,
            reordered,
        })
    }

    /// Stable move: remove at `from`, insert at `to` (clamped)
    fn move_job(&mut self, from: usize, to: usize) -> bool {
        let to = to.min(self.jobs.len().saturating_sub(1));
        if from == to || from >= self.jobs.len() {
            return false;
        }
        let job = self.jobs.remove(from);
        self.jobs.insert(to, job);
        true
    }

    /// Take a server response as the new truth for that job
    fn accept(&mut self, job: Job) {
        self.persisted.insert(job.id.clone(), job.status);
        match self.jobs.iter_mut().find(|j| j.id == job.id) {
            Some(slot) => *slot = job,
            None => self.jobs.push(job),
        }
    }

    /// Create a job on the server and append it to the board
    pub async fn create_job<A: JobsApi + ?Sized>(
        &mut self,
        api: &A,
        job: &CreateJob,
    ) -> Result<Job, ClientError> {
        let created = api.create(job).await.map_err(|e| {
            error!("Error creating job: {}", e);
            e
        })?;
        self.accept(created.clone());
        Ok(created)
    }

    /// Edit a job on the server and replace it in place
    pub async fn edit_job<A: JobsApi + ?Sized>(
        &mut self,
        api: &A,
        id: &str,
        changes: &UpdateJob,
    ) -> Result<Job, ClientError> {
        let updated = api.update(id, changes).await.map_err(|e| {
            error!("Error updating job {}: {}", id, e);
            e
        })?;
        self.accept(updated.clone());
        Ok(updated)
    }

    /// Delete a job on the server and drop it from the board
    pub async fn delete_job<A: JobsApi + ?Sized>(&mut self, api: &A, id: &str) -> Result<(), ClientError> {
        api.delete(id).await.map_err(|e| {
            error!("Error deleting job {}: {}", id, e);
            e
        })?;
        self.jobs.retain(|job| job.id != id);
        self.persisted.remove(id);
        Ok(())
    }

    fn count(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|job| job.status == status).count()
    }

    fn total_pages(&self, status: JobStatus) -> usize {
        self.count(status).div_ceil(self.page_size)
    }

    /// Current page of a column, always within `1..=max(total_pages, 1)`
    pub fn current_page(&self, status: JobStatus) -> usize {
        let stored = self.pages.get(&status).copied().unwrap_or(1);
        stored.clamp(1, self.total_pages(status).max(1))
    }

    /// Select a column page, returning the page actually selected
    pub fn set_page(&mut self, status: JobStatus, page: usize) -> usize {
        let page = page.clamp(1, self.total_pages(status).max(1));
        self.pages.insert(status, page);
        page
    }

    /// Page slice of one column with its totals
    pub fn derive_column(&self, status: JobStatus) -> Column<'_> {
        let page = self.current_page(status);
        let matching: Vec<&Job> = self.jobs.iter().filter(|job| job.status == status).collect();
        let total_count = matching.len();

        Column {
            status,
            jobs: matching
                .into_iter()
                .skip((page - 1) * self.page_size)
                .take(self.page_size)
                .collect(),
            page,
            total_count,
            total_pages: total_count.div_ceil(self.page_size),
        }
    }

    /// Per-status totals in column order
    pub fn status_counts(&self) -> Vec<(JobStatus, usize)> {
        JobStatus::ALL
            .iter()
            .map(|status| (*status, self.count(*status)))
            .collect()
    }
}
