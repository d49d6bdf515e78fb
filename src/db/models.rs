use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::api::job::Job;
use crate::status::JobStatus;

/// Database representation of a job, status in storage form
#[derive(Debug, FromRow)]
pub struct JobRow {
    pub id: String,
    pub company: String,
    pub role: String,
    pub status: String,
    pub date_applied: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            company: row.company,
            role: row.role,
            status: JobStatus::decode_storage(&row.status),
            date_applied: row.date_applied,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
