use serde::Serialize;
use ts_rs::TS;

mod datasets;
mod jobs;
mod permissions;
mod subjects;

pub use datasets::{
    CatalogSearchHitResponse, CatalogSearchQuery, DatasetInfoQuery, DatasetInfoResponse,
    DatasetListQuery, DatasetSummaryResponse,
};
pub use jobs::JobResponse;
pub use permissions::{
    PermissionOptionsRequest, PermissionOptionsResponse, SubjectPermissionsResponse,
    parse_selections,
};
pub use subjects::{
    CreateClientRequest, CreateUserRequest, CreatedClientResponse, CreatedUserResponse,
    DeleteUserQuery, SubjectListQuery, SubjectResponse, UpdateSubjectPermissionsRequest,
    UpdatedSubjectPermissionsResponse,
};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Confirmation returned by delete endpoints.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/message-response.ts"
)]
pub struct MessageResponse {
    pub message: String,
}
