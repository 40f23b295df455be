//! Datasets stored in rAPId and the metadata the console shows for them.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use rapid_console_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Dataset row returned when listing datasets for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Layer holding the dataset.
    pub layer: String,
    /// Domain of the dataset.
    pub domain: String,
    /// Dataset name.
    pub dataset: String,
    /// Latest version.
    pub version: u32,
}

/// Validated `layer/domain/dataset` path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetAddress {
    layer: String,
    domain: String,
    dataset: String,
}

impl DatasetAddress {
    /// Creates an address, rejecting empty segments and path separators.
    pub fn new(
        layer: impl Into<String>,
        domain: impl Into<String>,
        dataset: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            layer: path_segment("layer", layer.into())?,
            domain: path_segment("domain", domain.into())?,
            dataset: path_segment("dataset", dataset.into())?,
        })
    }

    /// Returns the layer segment.
    #[must_use]
    pub fn layer(&self) -> &str {
        self.layer.as_str()
    }

    /// Returns the domain segment.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.domain.as_str()
    }

    /// Returns the dataset segment.
    #[must_use]
    pub fn dataset(&self) -> &str {
        self.dataset.as_str()
    }
}

impl Display for DatasetAddress {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}/{}/{}", self.layer, self.domain, self.dataset)
    }
}

fn path_segment(label: &str, value: String) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{label} must not be empty")));
    }
    if trimmed.contains('/') || trimmed == "." || trimmed == ".." {
        return Err(AppError::Validation(format!(
            "{label} '{trimmed}' is not a valid path segment"
        )));
    }

    Ok(trimmed.to_owned())
}

/// Dataset owner contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetOwner {
    /// Owner name.
    pub name: String,
    /// Owner email.
    pub email: String,
}

/// Descriptive metadata of one dataset version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Domain of the dataset.
    pub domain: String,
    /// Dataset name.
    pub dataset: String,
    /// Sensitivity label.
    pub sensitivity: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Schema version.
    #[serde(default)]
    pub version: Option<u32>,
    /// Key/value tags.
    #[serde(default)]
    pub key_value_tags: BTreeMap<String, String>,
    /// Key-only tags.
    #[serde(default)]
    pub key_only_tags: Vec<String>,
    /// Owners.
    #[serde(default)]
    pub owners: Option<Vec<DatasetOwner>>,
    /// Update behaviour, e.g. `APPEND`.
    pub update_behaviour: String,
    /// Column count.
    pub number_of_columns: u64,
    /// Row count.
    pub number_of_rows: u64,
    /// Last update timestamp as rendered by rAPId.
    pub last_updated: String,
}

/// One column of a dataset schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetColumn {
    /// Column name.
    pub name: String,
    /// Partition position, when partitioned.
    #[serde(default)]
    pub partition_index: Option<u32>,
    /// Storage data type.
    pub data_type: String,
    /// Whether null values are allowed.
    pub allow_null: bool,
    /// Date format for date columns.
    #[serde(default)]
    pub format: Option<String>,
    /// Column statistics such as min and max.
    #[serde(default)]
    pub statistics: Option<BTreeMap<String, String>>,
}

/// Metadata and schema of one dataset version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Dataset metadata.
    pub metadata: DatasetMetadata,
    /// Dataset columns.
    pub columns: Vec<DatasetColumn>,
}
