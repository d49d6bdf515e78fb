use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::status::JobStatus;

/// A tracked job application as exchanged over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub company: String,
    pub role: String,
    pub status: JobStatus,
    #[serde(deserialize_with = "date_applied::deserialize")]
    pub date_applied: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a job
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJob {
    #[validate(length(min = 1, message = "Company must not be empty"))]
    pub company: String,
    #[validate(length(min = 1, message = "Role must not be empty"))]
    pub role: String,
    /// Defaults to `Applied` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(deserialize_with = "date_applied::deserialize")]
    pub date_applied: NaiveDate,
}

/// Partial update, every field independently optional
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJob {
    #[validate(length(min = 1, message = "Company must not be empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[validate(length(min = 1, message = "Role must not be empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(
        default,
        deserialize_with = "date_applied::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_applied: Option<NaiveDate>,
}

impl UpdateJob {
    /// Update touching only the status, as issued by a board drag
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.role.is_none()
            && self.status.is_none()
            && self.date_applied.is_none()
    }
}

/// `dateApplied` accepts a plain calendar date or a full RFC 3339 timestamp
pub(crate) mod date_applied {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(value: &str) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
            .map_err(|_| format!("invalid date `{}`, expected YYYY-MM-DD", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}
