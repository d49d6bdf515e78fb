//! Application status and its two representations.
//!
//! Display strings ("Offer Received") travel over the wire and storage
//! strings ("OFFER_RECEIVED") live in the `jobs.status` column. Every
//! conversion between the two goes through [`STATUS_TABLE`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a job application, one board column each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum JobStatus {
    #[default]
    Applied,
    Interviewing,
    OfferReceived,
    Rejected,
}

/// (status, display, storage)
static STATUS_TABLE: [(JobStatus, &str, &str); 4] = [
    (JobStatus::Applied, "Applied", "APPLIED"),
    (JobStatus::Interviewing, "Interviewing", "INTERVIEWING"),
    (JobStatus::OfferReceived, "Offer Received", "OFFER_RECEIVED"),
    (JobStatus::Rejected, "Rejected", "REJECTED"),
];

impl JobStatus {
    /// All statuses in board column order
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interviewing,
        JobStatus::OfferReceived,
        JobStatus::Rejected,
    ];

    fn entry(self) -> &'static (JobStatus, &'static str, &'static str) {
        STATUS_TABLE
            .iter()
            .find(|(status, _, _)| *status == self)
            .unwrap_or(&STATUS_TABLE[0])
    }

    pub fn display(self) -> &'static str {
        self.entry().1
    }

    pub fn storage(self) -> &'static str {
        self.entry().2
    }

    /// Strict lookup by display string
    pub fn from_display(value: &str) -> Option<Self> {
        STATUS_TABLE
            .iter()
            .find(|(_, display, _)| *display == value)
            .map(|(status, _, _)| *status)
    }

    /// Strict lookup by storage string
    pub fn from_storage(value: &str) -> Option<Self> {
        STATUS_TABLE
            .iter()
            .find(|(_, _, storage)| *storage == value)
            .map(|(status, _, _)| *status)
    }

    /// Lenient decode of a display string, unknown values become `Applied`
    pub fn decode_display(value: &str) -> Self {
        Self::from_display(value).unwrap_or_default()
    }

    /// Lenient decode of a storage string, unknown values become `Applied`
    pub fn decode_storage(value: &str) -> Self {
        Self::from_storage(value).unwrap_or_default()
    }
}

/// Map a storage value to its display string
pub fn to_display(storage: &str) -> &'static str {
    JobStatus::decode_storage(storage).display()
}

/// Map a display string to its storage value
pub fn to_storage(display: &str) -> &'static str {
    JobStatus::decode_display(display).storage()
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        JobStatus::decode_display(&value)
    }
}

impl From<JobStatus> for &'static str {
    fn from(status: JobStatus) -> Self {
        status.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_values_round_trip_through_display() {
        for storage in ["APPLIED", "INTERVIEWING", "OFFER_RECEIVED", "REJECTED"] {
            assert_eq!(to_storage(to_display(storage)), storage);
        }
    }

    #[test]
    fn display_values_round_trip_through_storage() {
        for status in JobStatus::ALL {
            assert_eq!(to_display(to_storage(status.display())), status.display());
        }
    }

    #[test]
    fn unknown_values_fall_back_to_applied() {
        assert_eq!(to_display("ARCHIVED"), "Applied");
        assert_eq!(to_display(""), "Applied");
        assert_eq!(to_storage("offer received"), "APPLIED");
        assert_eq!(JobStatus::from_display("Ghosted"), None);
    }

    #[test]
    fn serializes_as_display_string() {
        let json = serde_json::to_string(&JobStatus::OfferReceived).unwrap();
        assert_eq!(json, "\"Offer Received\"");

        let parsed: JobStatus = serde_json::from_str("\"Interviewing\"").unwrap();
        assert_eq!(parsed, JobStatus::Interviewing);

        let lenient: JobStatus = serde_json::from_str("\"Unheard of\"").unwrap();
        assert_eq!(lenient, JobStatus::Applied);
    }
}
