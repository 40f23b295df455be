use async_trait::async_trait;
use rapid_console_core::{AppResult, SubjectId};
use rapid_console_domain::{AssignedPermission, PermissionCatalog};

/// Port for reading assignable and assigned permissions from rAPId.
#[async_trait]
pub trait PermissionCatalogGateway: Send + Sync {
    /// Fetches the full catalog of assignable permissions.
    async fn fetch_permission_catalog(&self) -> AppResult<PermissionCatalog>;

    /// Lists the permissions a subject currently holds.
    async fn list_subject_permissions(
        &self,
        subject_id: &SubjectId,
    ) -> AppResult<Vec<AssignedPermission>>;
}
