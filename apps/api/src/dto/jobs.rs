use std::collections::BTreeMap;

use rapid_console_domain::Job;
use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

/// Processing job as shown on the jobs page.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/job-response.ts"
)]
pub struct JobResponse {
    pub job_id: String,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub status: String,
    pub finished: bool,
    pub step: Option<String>,
    pub domain: Option<String>,
    pub dataset: Option<String>,
    pub version: Option<u32>,
    pub errors: Vec<String>,
    #[ts(type = "Record<string, unknown>")]
    pub details: BTreeMap<String, Value>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            job_id: value.job_id,
            job_type: value.job_type,
            finished: value.status.is_terminal(),
            status: value.status.into(),
            step: value.step,
            domain: value.domain,
            dataset: value.dataset,
            version: value.version,
            errors: value.errors.unwrap_or_default(),
            details: value.details,
        }
    }
}
