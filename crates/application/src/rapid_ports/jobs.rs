use async_trait::async_trait;
use rapid_console_core::AppResult;
use rapid_console_domain::Job;

/// Port for asynchronous job status in rAPId.
#[async_trait]
pub trait JobGateway: Send + Sync {
    /// Lists tracked jobs.
    async fn list_jobs(&self) -> AppResult<Vec<Job>>;

    /// Returns one job.
    async fn get_job(&self, job_id: &str) -> AppResult<Job>;
}
