use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};
use tracing::debug;
use crate::db::ids::next_job_id;

use crate::api::job::{CreateJob, Job, UpdateJob};
use crate::db::models::JobRow;
use crate::db::store::{JobStore, StoreError};

const JOB_COLUMNS: &str = "id, company, role, status, date_applied, created_at, updated_at";

/// PostgreSQL-backed job store
#[derive(Clone)]
pub struct JobRepository {
    pool: Pool<Postgres>,
}

impl JobRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for JobRepository {
    async fn list(&self) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs ORDER BY created_at DESC, id DESC",
            JOB_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} jobs", rows.len());
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn create(&self, job: &CreateJob) -> Result<Job, StoreError> {
        let id = next_job_id();
        let status = job.status.unwrap_or_default();
        debug!("Creating job: id={}, company={}, status={}", id, job.company, status);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (id, company, role, status, date_applied)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&id)
        .bind(&job.company)
        .bind(&job.role)
        .bind(status.storage())
        .bind(job.date_applied)
        .fetch_one(&self.pool)
        .await?;

        debug!("Job created with id={}", row.id);
        Ok(row.into())
    }

    async fn update(&self, id: &str, changes: &UpdateJob) -> Result<Job, StoreError> {
        debug!("Updating job: id={}, changes={:?}", id, changes);

        let mut query = QueryBuilder::<Postgres>::new("UPDATE jobs SET updated_at = now()");
        if let Some(company) = &changes.company {
            query.push(", company = ").push_bind(company.clone());
        }
        if let Some(role) = &changes.role {
            query.push(", role = ").push_bind(role.clone());
        }
        if let Some(status) = changes.status {
            query.push(", status = ").push_bind(status.storage());
        }
        if let Some(date_applied) = changes.date_applied {
            query.push(", date_applied = ").push_bind(date_applied);
        }
        query
            .push(" WHERE id = ")
            .push_bind(id.to_string())
            .push(" RETURNING ")
            .push(JOB_COLUMNS);

        let row = query
            .build_query_as::<JobRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(Job::from)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!("Deleted job id={}", id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
