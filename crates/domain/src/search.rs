use serde::{Deserialize, Serialize};

/// Which part of a dataset matched a catalog search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMatchKind {
    /// A column name matched.
    ColumnName,
    /// The dataset name matched.
    DataName,
    /// The dataset description matched.
    Description,
}

/// One catalog search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSearchHit {
    /// Dataset name.
    pub dataset: String,
    /// Dataset domain.
    pub domain: String,
    /// Matched text.
    pub data: String,
    /// Dataset version.
    pub version: String,
    /// Matched part.
    pub data_type: SearchMatchKind,
}
