//! Dataset listing, metadata, deletion and catalog search.

use std::sync::Arc;

use rapid_console_core::{AppResult, NonEmptyString};
use rapid_console_domain::{
    CatalogSearchHit, DataAction, DatasetAddress, DatasetInfo, DatasetSummary,
};
use tracing::info;

use crate::rapid_ports::DatasetGateway;

/// Application service for datasets held in rAPId.
#[derive(Clone)]
pub struct DatasetService {
    gateway: Arc<dyn DatasetGateway>,
}

impl DatasetService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(gateway: Arc<dyn DatasetGateway>) -> Self {
        Self { gateway }
    }

    /// Lists datasets available for an action.
    pub async fn list_datasets(&self, action: DataAction) -> AppResult<Vec<DatasetSummary>> {
        self.gateway.list_datasets(action).await
    }

    /// Returns dataset metadata; `None` selects the latest version.
    pub async fn dataset_info(
        &self,
        address: &DatasetAddress,
        version: Option<u32>,
    ) -> AppResult<DatasetInfo> {
        self.gateway.dataset_info(address, version).await
    }

    /// Deletes a dataset and all of its versions.
    pub async fn delete_dataset(&self, address: &DatasetAddress) -> AppResult<String> {
        let message = self.gateway.delete_dataset(address).await?;
        info!(dataset = %address, "dataset deleted");
        Ok(message)
    }

    /// Searches the data catalog.
    pub async fn search_catalog(&self, term: &str) -> AppResult<Vec<CatalogSearchHit>> {
        let term = NonEmptyString::new(term.trim())?;
        self.gateway.search_catalog(term.as_str()).await
    }
}
