use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::debug;

use crate::api::job::{CreateJob, Job, UpdateJob};
use crate::api::validation::ErrorResponse;

use super::{ClientError, JobsApi};

/// `JobsApi` over HTTP, `base_url` points at the `/api` root
#[derive(Debug, Clone)]
pub struct HttpJobsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpJobsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    fn job_url(&self, id: &str) -> String {
        format!("{}/jobs/{}", self.base_url, id)
    }

    /// Pass successful responses through, map failures onto `ClientError`
    async fn check(response: Response, id: Option<&str>) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(ClientError::NotFound(id.to_string()));
            }
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl JobsApi for HttpJobsClient {
    async fn list(&self) -> Result<Vec<Job>, ClientError> {
        debug!("GET {}", self.jobs_url());
        let response = self.http.get(self.jobs_url()).send().await?;
        Ok(Self::check(response, None).await?.json().await?)
    }

    async fn create(&self, job: &CreateJob) -> Result<Job, ClientError> {
        debug!("POST {}", self.jobs_url());
        let response = self.http.post(self.jobs_url()).json(job).send().await?;
        Ok(Self::check(response, None).await?.json().await?)
    }

    async fn update(&self, id: &str, changes: &UpdateJob) -> Result<Job, ClientError> {
        debug!("PUT {}", self.job_url(id));
        let response = self.http.put(self.job_url(id)).json(changes).send().await?;
        Ok(Self::check(response, Some(id)).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        debug!("DELETE {}", self.job_url(id));
        let response = self.http.delete(self.job_url(id)).send().await?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_trimmed_base() {
        let client = HttpJobsClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.jobs_url(), "http://localhost:5000/api/jobs");
        assert_eq!(client.job_url("01HQ"), "http://localhost:5000/api/jobs/01HQ");
    }
}
