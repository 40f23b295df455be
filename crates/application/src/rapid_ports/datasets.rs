use async_trait::async_trait;
use rapid_console_core::AppResult;
use rapid_console_domain::{
    CatalogSearchHit, DataAction, DatasetAddress, DatasetInfo, DatasetSummary,
};

/// Port for dataset lookups and deletion in rAPId.
#[async_trait]
pub trait DatasetGateway: Send + Sync {
    /// Lists datasets the caller may use for an action.
    async fn list_datasets(&self, action: DataAction) -> AppResult<Vec<DatasetSummary>>;

    /// Returns metadata for a dataset version, or the latest when `version` is `None`.
    async fn dataset_info(
        &self,
        address: &DatasetAddress,
        version: Option<u32>,
    ) -> AppResult<DatasetInfo>;

    /// Deletes a dataset, returning rAPId's confirmation message.
    async fn delete_dataset(&self, address: &DatasetAddress) -> AppResult<String>;

    /// Searches dataset names, descriptions and columns.
    async fn search_catalog(&self, term: &str) -> AppResult<Vec<CatalogSearchHit>>;
}
