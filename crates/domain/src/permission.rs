use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rapid_console_core::AppError;
use serde::{Deserialize, Serialize};

/// Top-level action a permission grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// Allows managing schemas and datasets of any sensitivity.
    DataAdmin,
    /// Allows managing users and client applications.
    UserAdmin,
    /// Allows reading datasets.
    Read,
    /// Allows writing datasets.
    Write,
}

impl ActionType {
    /// Returns the stable transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataAdmin => "DATA_ADMIN",
            Self::UserAdmin => "USER_ADMIN",
            Self::Read => "READ",
            Self::Write => "WRITE",
        }
    }

    /// Returns whether the action is an admin action without nested scope.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin_action().is_some()
    }

    /// Returns the admin action this value names, if any.
    #[must_use]
    pub fn admin_action(&self) -> Option<AdminAction> {
        match self {
            Self::DataAdmin => Some(AdminAction::DataAdmin),
            Self::UserAdmin => Some(AdminAction::UserAdmin),
            Self::Read | Self::Write => None,
        }
    }

    /// Returns the data action this value names, if any.
    #[must_use]
    pub fn data_action(&self) -> Option<DataAction> {
        match self {
            Self::Read => Some(DataAction::Read),
            Self::Write => Some(DataAction::Write),
            Self::DataAdmin | Self::UserAdmin => None,
        }
    }
}

impl Display for ActionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DATA_ADMIN" => Ok(Self::DataAdmin),
            "USER_ADMIN" => Ok(Self::UserAdmin),
            "READ" => Ok(Self::Read),
            "WRITE" => Ok(Self::Write),
            _ => Err(AppError::Validation(format!(
                "unknown permission type '{value}'"
            ))),
        }
    }
}

/// Admin actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminAction {
    /// `DATA_ADMIN`.
    DataAdmin,
    /// `USER_ADMIN`.
    UserAdmin,
}

impl From<AdminAction> for ActionType {
    fn from(value: AdminAction) -> Self {
        match value {
            AdminAction::DataAdmin => Self::DataAdmin,
            AdminAction::UserAdmin => Self::UserAdmin,
        }
    }
}

/// Data actions scoped by layer, sensitivity and domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataAction {
    /// `READ`.
    Read,
    /// `WRITE`.
    Write,
}

impl DataAction {
    /// Returns the stable transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        ActionType::from(*self).as_str()
    }
}

impl From<DataAction> for ActionType {
    fn from(value: DataAction) -> Self {
        match value {
            DataAction::Read => Self::Read,
            DataAction::Write => Self::Write,
        }
    }
}

impl FromStr for DataAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let action = ActionType::from_str(value)?;
        action.data_action().ok_or_else(|| {
            AppError::Validation(format!("'{action}' is not a data action"))
        })
    }
}

/// Data classification level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sensitivity {
    /// Readable by any subject holding the layer grant.
    Public,
    /// Private data; also covers public.
    Private,
    /// Domain-scoped data; grants name a domain.
    Protected,
    /// Every sensitivity in the layer.
    All,
}

impl Sensitivity {
    /// Returns the stable transport value for this sensitivity.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Protected => "PROTECTED",
            Self::All => "ALL",
        }
    }
}

impl Display for Sensitivity {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Sensitivity {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PUBLIC" => Ok(Self::Public),
            "PRIVATE" => Ok(Self::Private),
            "PROTECTED" => Ok(Self::Protected),
            "ALL" => Ok(Self::All),
            _ => Err(AppError::Validation(format!(
                "unknown sensitivity '{value}'"
            ))),
        }
    }
}

/// Leaf permission identifier exchanged with rAPId, for example `READ_ALL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionToken(String);

impl PermissionToken {
    /// Creates a token from its transport value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the transport value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for PermissionToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl From<PermissionToken> for String {
    fn from(value: PermissionToken) -> Self {
        value.0
    }
}

/// Scoped data permission choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataPermission {
    action: DataAction,
    layer: String,
    sensitivity: Option<Sensitivity>,
    domain: Option<String>,
}

impl DataPermission {
    /// Creates a data permission, enforcing that a domain only accompanies `PROTECTED`.
    pub fn new(
        action: DataAction,
        layer: impl Into<String>,
        sensitivity: Option<Sensitivity>,
        domain: Option<String>,
    ) -> Result<Self, AppError> {
        let layer = layer.into();
        if layer.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "{} permission requires a layer",
                action.as_str()
            )));
        }

        let domain = domain.filter(|value| !value.trim().is_empty());
        if domain.is_some() && sensitivity != Some(Sensitivity::Protected) {
            return Err(AppError::Validation(format!(
                "domain is only allowed with PROTECTED sensitivity on layer '{layer}'"
            )));
        }

        Ok(Self::scoped(action, layer, sensitivity, domain))
    }

    pub(crate) fn scoped(
        action: DataAction,
        layer: String,
        sensitivity: Option<Sensitivity>,
        domain: Option<String>,
    ) -> Self {
        Self {
            action,
            layer,
            sensitivity,
            domain,
        }
    }

    /// Returns the data action.
    #[must_use]
    pub fn action(&self) -> DataAction {
        self.action
    }

    /// Returns the layer name.
    #[must_use]
    pub fn layer(&self) -> &str {
        self.layer.as_str()
    }

    /// Returns the chosen sensitivity, if any.
    #[must_use]
    pub fn sensitivity(&self) -> Option<Sensitivity> {
        self.sensitivity
    }

    /// Returns the protected domain, if any.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

/// One permission selected for a subject.
///
/// The wire shape is the flat record `{type, layer?, sensitivity?, domain?}`
/// used by the permissions table of the console UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PermissionRecord", into = "PermissionRecord")]
pub enum PermissionSelection {
    /// `DATA_ADMIN` or `USER_ADMIN`.
    Admin(AdminAction),
    /// `READ` or `WRITE` scoped to a layer.
    Data(DataPermission),
}

impl PermissionSelection {
    /// Returns the top-level action of this selection.
    #[must_use]
    pub fn action(&self) -> ActionType {
        match self {
            Self::Admin(action) => ActionType::from(*action),
            Self::Data(permission) => ActionType::from(permission.action),
        }
    }
}

impl Display for PermissionSelection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin(action) => write!(formatter, "{}", ActionType::from(*action)),
            Self::Data(permission) => {
                write!(
                    formatter,
                    "{}/{}",
                    permission.action.as_str(),
                    permission.layer
                )?;
                if let Some(sensitivity) = permission.sensitivity {
                    write!(formatter, "/{sensitivity}")?;
                }
                if let Some(domain) = &permission.domain {
                    write!(formatter, "/{domain}")?;
                }
                Ok(())
            }
        }
    }
}

/// Flat transport record for [`PermissionSelection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// Permission action.
    #[serde(rename = "type")]
    pub action: ActionType,
    /// Layer for data actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    /// Sensitivity for data actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Sensitivity>,
    /// Domain for protected data actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl TryFrom<PermissionRecord> for PermissionSelection {
    type Error = AppError;

    fn try_from(value: PermissionRecord) -> Result<Self, Self::Error> {
        if let Some(admin) = value.action.admin_action() {
            if value.layer.is_some() || value.sensitivity.is_some() || value.domain.is_some() {
                return Err(AppError::Validation(format!(
                    "{} permission must not carry layer, sensitivity or domain",
                    value.action
                )));
            }
            return Ok(Self::Admin(admin));
        }

        let action = value.action.data_action().ok_or_else(|| {
            AppError::Internal(format!("'{}' is neither admin nor data", value.action))
        })?;
        let layer = value.layer.ok_or_else(|| {
            AppError::Validation(format!("{} permission requires a layer", value.action))
        })?;

        DataPermission::new(action, layer, value.sensitivity, value.domain).map(Self::Data)
    }
}

impl From<PermissionSelection> for PermissionRecord {
    fn from(value: PermissionSelection) -> Self {
        match value {
            PermissionSelection::Admin(action) => Self {
                action: ActionType::from(action),
                layer: None,
                sensitivity: None,
                domain: None,
            },
            PermissionSelection::Data(permission) => Self {
                action: ActionType::from(permission.action),
                layer: Some(permission.layer),
                sensitivity: permission.sensitivity,
                domain: permission.domain,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{ActionType, PermissionSelection, Sensitivity};

    #[test]
    fn action_type_roundtrip_storage_value() {
        let action = ActionType::UserAdmin;
        let restored = ActionType::from_str(action.as_str());
        assert!(restored.is_ok());
        assert_eq!(restored.unwrap_or(ActionType::Read), action);
    }

    #[test]
    fn unknown_sensitivity_is_rejected() {
        assert!(Sensitivity::from_str("SECRET").is_err());
    }

    #[test]
    fn protected_selection_decodes_from_flat_record() {
        let selection = serde_json::from_str::<PermissionSelection>(
            r#"{"type":"READ","layer":"default","sensitivity":"PROTECTED","domain":"sales"}"#,
        );
        assert!(selection.is_ok());

        let selection = selection.unwrap_or_else(|_| unreachable!());
        assert_eq!(selection.action(), ActionType::Read);
        assert_eq!(selection.to_string(), "READ/default/PROTECTED/sales");
    }

    #[test]
    fn admin_selection_with_layer_is_rejected() {
        let selection = serde_json::from_str::<PermissionSelection>(
            r#"{"type":"DATA_ADMIN","layer":"default"}"#,
        );
        assert!(selection.is_err());
    }

    #[test]
    fn data_selection_without_layer_is_rejected() {
        let selection =
            serde_json::from_str::<PermissionSelection>(r#"{"type":"WRITE","sensitivity":"ALL"}"#);
        assert!(selection.is_err());
    }

    #[test]
    fn domain_without_protected_sensitivity_is_rejected() {
        let selection = serde_json::from_str::<PermissionSelection>(
            r#"{"type":"READ","layer":"raw","sensitivity":"PUBLIC","domain":"sales"}"#,
        );
        assert!(selection.is_err());
    }

    #[test]
    fn admin_selection_serializes_without_scope_fields() {
        let selection = serde_json::from_str::<PermissionSelection>(r#"{"type":"USER_ADMIN"}"#)
            .unwrap_or_else(|_| unreachable!());
        let encoded = serde_json::to_value(&selection).unwrap_or_default();
        assert_eq!(encoded, serde_json::json!({ "type": "USER_ADMIN" }));
    }
}
