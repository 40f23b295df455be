//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod catalog;
mod dataset;
mod job;
mod permission;
mod search;
mod subject;

pub use catalog::{
    ALL_LAYER, ActionNode, CatalogLeaf, DomainMap, LayerMap, PermissionCatalog, PruneOutcome,
    SensitivityMap, SensitivityNode,
};
pub use dataset::{
    DatasetAddress, DatasetColumn, DatasetInfo, DatasetMetadata, DatasetOwner, DatasetSummary,
};
pub use job::{Job, JobStatus};
pub use permission::{
    ActionType, AdminAction, DataAction, DataPermission, PermissionRecord, PermissionSelection,
    PermissionToken, Sensitivity,
};
pub use search::{CatalogSearchHit, SearchMatchKind};
pub use subject::{
    AssignedPermission, CreatedClient, CreatedUser, EmailAddress, SUBJECT_NAME_MAX_LENGTH,
    SUBJECT_NAME_MIN_LENGTH, SubjectKind, SubjectName, SubjectSummary, filter_subjects,
};
