use thiserror::Error;

/// Errors from talking to the jobs API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server does not know this job
    #[error("job not found: {0}")]
    NotFound(String),

    /// Any other non-success response
    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}
