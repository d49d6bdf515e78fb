use serde::{Deserialize, Serialize};

use super::models::Job;

/// Wire form of a job, `_id` mirrors `id` for clients keyed on it
#[derive(Serialize)]
pub struct JobResponse<'a> {
    #[serde(flatten)]
    pub job: &'a Job,
    #[serde(rename = "_id")]
    pub legacy_id: &'a str,
}

impl<'a> From<&'a Job> for JobResponse<'a> {
    fn from(job: &'a Job) -> Self {
        Self {
            job,
            legacy_id: &job.id,
        }
    }
}

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
