use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use rapid_console_domain::{DataAction, DatasetAddress};

use crate::dto::{
    CatalogSearchHitResponse, CatalogSearchQuery, DatasetInfoQuery, DatasetInfoResponse,
    DatasetListQuery, DatasetSummaryResponse, MessageResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_datasets_handler(
    State(state): State<AppState>,
    Query(query): Query<DatasetListQuery>,
) -> ApiResult<Json<Vec<DatasetSummaryResponse>>> {
    // The dataset pickers default to what the caller can read.
    let action = match query.action.as_deref().map(str::trim) {
        Some(action) if !action.is_empty() => DataAction::from_str(action)?,
        _ => DataAction::Read,
    };

    let datasets = state
        .dataset_service
        .list_datasets(action)
        .await?
        .into_iter()
        .map(DatasetSummaryResponse::from)
        .collect();

    Ok(Json(datasets))
}

pub async fn dataset_info_handler(
    State(state): State<AppState>,
    Path((layer, domain, dataset)): Path<(String, String, String)>,
    Query(query): Query<DatasetInfoQuery>,
) -> ApiResult<Json<DatasetInfoResponse>> {
    let address = DatasetAddress::new(layer, domain, dataset)?;
    let info = state
        .dataset_service
        .dataset_info(&address, query.version)
        .await?;

    Ok(Json(DatasetInfoResponse::from(info)))
}

pub async fn delete_dataset_handler(
    State(state): State<AppState>,
    Path((layer, domain, dataset)): Path<(String, String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let address = DatasetAddress::new(layer, domain, dataset)?;
    let message = state.dataset_service.delete_dataset(&address).await?;

    Ok(Json(MessageResponse { message }))
}

pub async fn search_catalog_handler(
    State(state): State<AppState>,
    Query(query): Query<CatalogSearchQuery>,
) -> ApiResult<Json<Vec<CatalogSearchHitResponse>>> {
    let hits = state
        .dataset_service
        .search_catalog(&query.term)
        .await?
        .into_iter()
        .map(CatalogSearchHitResponse::from)
        .collect();

    Ok(Json(hits))
}
