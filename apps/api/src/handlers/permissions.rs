use axum::Json;
use axum::extract::State;
use rapid_console_domain::PermissionCatalog;

use crate::dto::{PermissionOptionsRequest, PermissionOptionsResponse, parse_selections};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn permission_catalog_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<PermissionCatalog>> {
    let catalog = state.subject_service.permission_catalog().await?;
    Ok(Json(catalog))
}

/// Narrows the catalog next to the selections already pending in the form.
pub async fn permission_options_handler(
    State(state): State<AppState>,
    Json(payload): Json<PermissionOptionsRequest>,
) -> ApiResult<Json<PermissionOptionsResponse>> {
    let pending = parse_selections(payload.pending)?;
    let options = state
        .subject_service
        .permission_options(&pending, payload.flow)
        .await?;

    Ok(Json(PermissionOptionsResponse::from(options)))
}
