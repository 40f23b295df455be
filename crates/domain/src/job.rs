//! Asynchronous processing jobs tracked by rAPId.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Job lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    /// `SUCCESS`.
    Success,
    /// `IN PROGRESS`.
    InProgress,
    /// `FAILED`.
    Failed,
    /// Any status this console does not know about.
    Other(String),
}

impl JobStatus {
    /// Returns the transport value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "SUCCESS",
            Self::InProgress => "IN PROGRESS",
            Self::Failed => "FAILED",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Returns whether the job will not change status again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl Display for JobStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUCCESS" => Self::Success,
            "IN PROGRESS" => Self::InProgress,
            "FAILED" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<JobStatus> for String {
    fn from(value: JobStatus) -> Self {
        match value {
            JobStatus::Other(value) => value,
            other => other.as_str().to_owned(),
        }
    }
}

/// Job record. Fields beyond the common ones are kept as-is in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier.
    pub job_id: String,
    /// Job kind, e.g. `UPLOAD`.
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    /// Current status.
    pub status: JobStatus,
    /// Current processing step.
    #[serde(default)]
    pub step: Option<String>,
    /// Dataset domain, for dataset jobs.
    #[serde(default)]
    pub domain: Option<String>,
    /// Dataset name, for dataset jobs.
    #[serde(default)]
    pub dataset: Option<String>,
    /// Dataset version, for dataset jobs.
    #[serde(default)]
    pub version: Option<u32>,
    /// Failure messages.
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    /// Remaining job attributes.
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}
