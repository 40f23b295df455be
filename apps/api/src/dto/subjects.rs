use rapid_console_application::UpdatedSubjectPermissions;
use rapid_console_domain::{CreatedClient, CreatedUser, SubjectSummary};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::permissions::PermissionSelectionDto;

/// Query for listing subjects of one kind.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/subject-list-query.ts"
)]
pub struct SubjectListQuery {
    #[serde(rename = "type")]
    #[ts(type = "\"USER\" | \"CLIENT\"")]
    pub kind: String,
}

/// Listed user or client.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/subject-response.ts"
)]
pub struct SubjectResponse {
    pub subject_id: String,
    pub subject_name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Incoming payload for user creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub permissions: Vec<PermissionSelectionDto>,
}

/// Incoming payload for client creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-client-request.ts"
)]
pub struct CreateClientRequest {
    pub client_name: String,
    #[serde(default)]
    pub permissions: Vec<PermissionSelectionDto>,
}

/// Created user as confirmed by rAPId.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/created-user-response.ts"
)]
pub struct CreatedUserResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub permissions: Vec<String>,
}

/// Created client. The secret is only ever shown once.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/created-client-response.ts"
)]
pub struct CreatedClientResponse {
    pub client_id: String,
    pub client_name: String,
    pub client_secret: String,
    pub permissions: Vec<String>,
}

/// Replacement permission set for a subject.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-subject-permissions-request.ts"
)]
pub struct UpdateSubjectPermissionsRequest {
    pub permissions: Vec<PermissionSelectionDto>,
}

/// Tokens a subject holds after an update.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/updated-subject-permissions-response.ts"
)]
pub struct UpdatedSubjectPermissionsResponse {
    pub subject_id: String,
    pub permissions: Vec<String>,
}

/// Username confirmation required to delete a user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-user-query.ts"
)]
pub struct DeleteUserQuery {
    pub username: String,
}

impl From<SubjectSummary> for SubjectResponse {
    fn from(value: SubjectSummary) -> Self {
        Self {
            subject_id: value.subject_id.as_str().to_owned(),
            subject_name: value.subject_name,
            kind: value.kind.as_str().to_owned(),
        }
    }
}

impl From<CreatedUser> for CreatedUserResponse {
    fn from(value: CreatedUser) -> Self {
        Self {
            user_id: value.user_id.as_str().to_owned(),
            username: value.username,
            email: value.email,
            permissions: value.permissions.into_iter().map(String::from).collect(),
        }
    }
}

impl From<CreatedClient> for CreatedClientResponse {
    fn from(value: CreatedClient) -> Self {
        Self {
            client_id: value.client_id.as_str().to_owned(),
            client_name: value.client_name,
            client_secret: value.client_secret,
            permissions: value.permissions.into_iter().map(String::from).collect(),
        }
    }
}

impl From<UpdatedSubjectPermissions> for UpdatedSubjectPermissionsResponse {
    fn from(value: UpdatedSubjectPermissions) -> Self {
        Self {
            subject_id: value.subject_id.as_str().to_owned(),
            permissions: value.permissions.into_iter().map(String::from).collect(),
        }
    }
}
