use rapid_console_application::{DatasetService, JobService, SubjectService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub subject_service: SubjectService,
    pub dataset_service: DatasetService,
    pub job_service: JobService,
    pub frontend_url: String,
}
