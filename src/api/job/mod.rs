pub mod dto;
pub mod handlers;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use models::{CreateJob, Job, UpdateJob};
pub use service::{JobService, ServiceError};
