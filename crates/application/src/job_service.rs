//! Status of asynchronous rAPId jobs such as uploads.

use std::sync::Arc;

use rapid_console_core::{AppError, AppResult};
use rapid_console_domain::Job;

use crate::rapid_ports::JobGateway;

/// Application service for job status lookups.
#[derive(Clone)]
pub struct JobService {
    gateway: Arc<dyn JobGateway>,
}

impl JobService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(gateway: Arc<dyn JobGateway>) -> Self {
        Self { gateway }
    }

    /// Lists jobs, unfinished ones first.
    pub async fn list_jobs(&self) -> AppResult<Vec<Job>> {
        let mut jobs = self.gateway.list_jobs().await?;
        jobs.sort_by_key(|job| job.status.is_terminal());
        Ok(jobs)
    }

    /// Returns one job.
    pub async fn get_job(&self, job_id: &str) -> AppResult<Job> {
        let job_id = job_id.trim();
        if job_id.is_empty() {
            return Err(AppError::Validation("job id must not be empty".to_owned()));
        }

        self.gateway.get_job(job_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use rapid_console_core::{AppError, AppResult};
    use rapid_console_domain::{Job, JobStatus};

    use crate::rapid_ports::JobGateway;

    use super::JobService;

    fn job(job_id: &str, status: JobStatus) -> Job {
        Job {
            job_id: job_id.to_owned(),
            job_type: Some("UPLOAD".to_owned()),
            status,
            step: None,
            domain: Some("sales".to_owned()),
            dataset: Some("orders".to_owned()),
            version: Some(1),
            errors: None,
            details: Default::default(),
        }
    }

    struct FakeJobGateway {
        jobs: Vec<Job>,
    }

    #[async_trait]
    impl JobGateway for FakeJobGateway {
        async fn list_jobs(&self) -> AppResult<Vec<Job>> {
            Ok(self.jobs.clone())
        }

        async fn get_job(&self, job_id: &str) -> AppResult<Job> {
            self.jobs
                .iter()
                .find(|job| job.job_id == job_id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("job '{job_id}' not found")))
        }
    }

    fn build_service() -> JobService {
        JobService::new(Arc::new(FakeJobGateway {
            jobs: vec![
                job("done", JobStatus::Success),
                job("running", JobStatus::InProgress),
                job("broken", JobStatus::Failed),
            ],
        }))
    }

    #[tokio::test]
    async fn list_jobs_puts_unfinished_first() {
        let jobs = build_service().list_jobs().await;
        assert!(jobs.is_ok());

        let ids: Vec<String> = jobs
            .unwrap_or_default()
            .into_iter()
            .map(|job| job.job_id)
            .collect();
        assert_eq!(ids, vec!["running", "done", "broken"]);
    }

    #[tokio::test]
    async fn get_job_trims_identifier() {
        let found = build_service().get_job(" done ").await;
        assert!(found.is_ok());
        assert_eq!(
            found.unwrap_or_else(|_| unreachable!()).status,
            JobStatus::Success
        );
    }

    #[tokio::test]
    async fn get_job_rejects_blank_identifier() {
        let found = build_service().get_job(" ").await;
        assert!(matches!(found, Err(AppError::Validation(_))));

        let missing = build_service().get_job("unknown").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
