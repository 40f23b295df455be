use axum::Json;
use axum::extract::{Path, State};

use crate::dto::JobResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_jobs_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<JobResponse>>> {
    let jobs = state
        .job_service
        .list_jobs()
        .await?
        .into_iter()
        .map(JobResponse::from)
        .collect();

    Ok(Json(jobs))
}

pub async fn job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobResponse>> {
    let job = state.job_service.get_job(&job_id).await?;
    Ok(Json(JobResponse::from(job)))
}
