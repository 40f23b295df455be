use std::collections::BTreeMap;

use rapid_console_domain::{
    CatalogSearchHit, DatasetColumn, DatasetInfo, DatasetMetadata, DatasetSummary,
    SearchMatchKind,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query selecting which datasets to list.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dataset-list-query.ts"
)]
pub struct DatasetListQuery {
    #[serde(default)]
    #[ts(type = "\"READ\" | \"WRITE\" | null")]
    pub action: Option<String>,
}

/// Optional version for dataset info.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dataset-info-query.ts"
)]
pub struct DatasetInfoQuery {
    #[serde(default)]
    pub version: Option<u32>,
}

/// Catalog search term.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/catalog-search-query.ts"
)]
pub struct CatalogSearchQuery {
    pub term: String,
}

/// Dataset row for list views.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dataset-summary-response.ts"
)]
pub struct DatasetSummaryResponse {
    pub layer: String,
    pub domain: String,
    pub dataset: String,
    pub version: u32,
}

/// Dataset metadata.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dataset-metadata-response.ts"
)]
pub struct DatasetMetadataResponse {
    pub domain: String,
    pub dataset: String,
    pub sensitivity: String,
    pub description: Option<String>,
    pub version: Option<u32>,
    pub key_value_tags: BTreeMap<String, String>,
    pub key_only_tags: Vec<String>,
    pub owners: Vec<String>,
    pub update_behaviour: String,
    pub number_of_columns: u64,
    pub number_of_rows: u64,
    pub last_updated: String,
}

/// Dataset column.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dataset-column-response.ts"
)]
pub struct DatasetColumnResponse {
    pub name: String,
    pub partition_index: Option<u32>,
    pub data_type: String,
    pub allow_null: bool,
    pub format: Option<String>,
    pub statistics: Option<BTreeMap<String, String>>,
}

/// Metadata and schema of one dataset version.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dataset-info-response.ts"
)]
pub struct DatasetInfoResponse {
    pub metadata: DatasetMetadataResponse,
    pub columns: Vec<DatasetColumnResponse>,
}

/// Catalog search hit.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/catalog-search-hit-response.ts"
)]
pub struct CatalogSearchHitResponse {
    pub dataset: String,
    pub domain: String,
    pub data: String,
    pub version: String,
    #[ts(type = "\"column_name\" | \"data_name\" | \"description\"")]
    pub data_type: String,
}

impl From<DatasetSummary> for DatasetSummaryResponse {
    fn from(value: DatasetSummary) -> Self {
        Self {
            layer: value.layer,
            domain: value.domain,
            dataset: value.dataset,
            version: value.version,
        }
    }
}

impl From<DatasetMetadata> for DatasetMetadataResponse {
    fn from(value: DatasetMetadata) -> Self {
        Self {
            domain: value.domain,
            dataset: value.dataset,
            sensitivity: value.sensitivity,
            description: value.description,
            version: value.version,
            key_value_tags: value.key_value_tags,
            key_only_tags: value.key_only_tags,
            owners: value
                .owners
                .unwrap_or_default()
                .into_iter()
                .map(|owner| format!("{} <{}>", owner.name, owner.email))
                .collect(),
            update_behaviour: value.update_behaviour,
            number_of_columns: value.number_of_columns,
            number_of_rows: value.number_of_rows,
            last_updated: value.last_updated,
        }
    }
}

impl From<DatasetColumn> for DatasetColumnResponse {
    fn from(value: DatasetColumn) -> Self {
        Self {
            name: value.name,
            partition_index: value.partition_index,
            data_type: value.data_type,
            allow_null: value.allow_null,
            format: value.format,
            statistics: value.statistics,
        }
    }
}

impl From<DatasetInfo> for DatasetInfoResponse {
    fn from(value: DatasetInfo) -> Self {
        Self {
            metadata: DatasetMetadataResponse::from(value.metadata),
            columns: value
                .columns
                .into_iter()
                .map(DatasetColumnResponse::from)
                .collect(),
        }
    }
}

impl From<CatalogSearchHit> for CatalogSearchHitResponse {
    fn from(value: CatalogSearchHit) -> Self {
        let data_type = match value.data_type {
            SearchMatchKind::ColumnName => "column_name",
            SearchMatchKind::DataName => "data_name",
            SearchMatchKind::Description => "description",
        };

        Self {
            dataset: value.dataset,
            domain: value.domain,
            data: value.data,
            version: value.version,
            data_type: data_type.to_owned(),
        }
    }
}
