use std::str::FromStr;

use rapid_console_application::{PermissionOptions, SelectionFlow, SubjectPermissions};
use rapid_console_core::AppError;
use rapid_console_domain::{
    ActionType, AssignedPermission, CatalogLeaf, PermissionCatalog, PermissionRecord,
    PermissionSelection, Sensitivity,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One permission as chosen in the permissions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-selection.ts"
)]
pub struct PermissionSelectionDto {
    #[serde(rename = "type")]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Pending selections to narrow the catalog with.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-options-request.ts"
)]
pub struct PermissionOptionsRequest {
    #[ts(type = "\"create\" | \"modify\"")]
    pub flow: SelectionFlow,
    #[serde(default)]
    pub pending: Vec<PermissionSelectionDto>,
}

/// One complete choice left in the catalog.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-choice-response.ts"
)]
pub struct PermissionChoiceResponse {
    pub selection: PermissionSelectionDto,
    pub token: String,
}

/// Narrowed catalog plus its flattened choices.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-options-response.ts"
)]
pub struct PermissionOptionsResponse {
    #[ts(type = "Record<string, unknown>")]
    pub options: PermissionCatalog,
    pub choices: Vec<PermissionChoiceResponse>,
    pub can_add_more: bool,
}

/// Permission a subject holds in rAPId.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assigned-permission-response.ts"
)]
pub struct AssignedPermissionResponse {
    pub token: String,
    pub selection: PermissionSelectionDto,
}

/// Held permissions and modify-flow options for one subject.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/subject-permissions-response.ts"
)]
pub struct SubjectPermissionsResponse {
    pub subject_id: String,
    pub assigned: Vec<AssignedPermissionResponse>,
    pub options: PermissionOptionsResponse,
}

impl TryFrom<PermissionSelectionDto> for PermissionSelection {
    type Error = AppError;

    fn try_from(value: PermissionSelectionDto) -> Result<Self, Self::Error> {
        let record = PermissionRecord {
            action: ActionType::from_str(value.action.trim())?,
            layer: value.layer,
            sensitivity: value
                .sensitivity
                .as_deref()
                .map(str::trim)
                .filter(|sensitivity| !sensitivity.is_empty())
                .map(Sensitivity::from_str)
                .transpose()?,
            domain: value.domain,
        };

        Self::try_from(record)
    }
}

impl From<PermissionSelection> for PermissionSelectionDto {
    fn from(value: PermissionSelection) -> Self {
        let record = PermissionRecord::from(value);
        Self {
            action: record.action.as_str().to_owned(),
            layer: record.layer,
            sensitivity: record
                .sensitivity
                .map(|sensitivity| sensitivity.as_str().to_owned()),
            domain: record.domain,
        }
    }
}

impl From<CatalogLeaf> for PermissionChoiceResponse {
    fn from(value: CatalogLeaf) -> Self {
        Self {
            selection: PermissionSelectionDto::from(value.selection),
            token: value.token.into(),
        }
    }
}

impl From<PermissionOptions> for PermissionOptionsResponse {
    fn from(value: PermissionOptions) -> Self {
        Self {
            options: value.options,
            choices: value
                .choices
                .into_iter()
                .map(PermissionChoiceResponse::from)
                .collect(),
            can_add_more: value.can_add_more,
        }
    }
}

impl From<AssignedPermission> for AssignedPermissionResponse {
    fn from(value: AssignedPermission) -> Self {
        Self {
            token: value.token.into(),
            selection: PermissionSelectionDto::from(value.selection),
        }
    }
}

impl From<SubjectPermissions> for SubjectPermissionsResponse {
    fn from(value: SubjectPermissions) -> Self {
        Self {
            subject_id: value.subject_id.as_str().to_owned(),
            assigned: value
                .assigned
                .into_iter()
                .map(AssignedPermissionResponse::from)
                .collect(),
            options: PermissionOptionsResponse::from(value.options),
        }
    }
}

/// Converts request selections, stopping at the first malformed one.
pub fn parse_selections(
    selections: Vec<PermissionSelectionDto>,
) -> Result<Vec<PermissionSelection>, AppError> {
    selections
        .into_iter()
        .enumerate()
        .map(|(position, selection)| {
            PermissionSelection::try_from(selection).map_err(|error| match error {
                AppError::Validation(message) => {
                    AppError::Validation(format!("permission at position {position}: {message}"))
                }
                other => other,
            })
        })
        .collect()
}
