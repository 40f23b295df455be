//! Users and client applications that hold permissions in rAPId.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rapid_console_core::{AppError, AppResult, SubjectId};
use serde::{Deserialize, Serialize};

use crate::permission::{PermissionRecord, PermissionSelection, PermissionToken};

/// Minimum length of a user or client name.
pub const SUBJECT_NAME_MIN_LENGTH: usize = 3;

/// Maximum length of a user or client name.
pub const SUBJECT_NAME_MAX_LENGTH: usize = 128;

/// Kind of subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectKind {
    /// Human user.
    User,
    /// Client application.
    Client,
}

impl SubjectKind {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Client => "CLIENT",
        }
    }
}

impl Display for SubjectKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SubjectKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "CLIENT" => Ok(Self::Client),
            _ => Err(AppError::Validation(format!(
                "unknown subject type '{value}'"
            ))),
        }
    }
}

/// Subject row listed by rAPId.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSummary {
    /// Subject identifier.
    pub subject_id: SubjectId,
    /// Username or client name.
    pub subject_name: String,
    /// Subject kind.
    #[serde(rename = "type")]
    pub kind: SubjectKind,
}

/// Keeps subjects of one kind, ordered by name.
#[must_use]
pub fn filter_subjects(subjects: Vec<SubjectSummary>, kind: SubjectKind) -> Vec<SubjectSummary> {
    let mut filtered: Vec<SubjectSummary> = subjects
        .into_iter()
        .filter(|subject| subject.kind == kind)
        .collect();
    filtered.sort_by(|left, right| {
        left.subject_name
            .to_lowercase()
            .cmp(&right.subject_name.to_lowercase())
            .then_with(|| left.subject_name.cmp(&right.subject_name))
    });
    filtered
}

/// Validated user or client name.
///
/// Starts with an ASCII letter, followed by letters, digits or `@._-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectName(String);

impl SubjectName {
    /// Creates a validated subject name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let length = value.chars().count();
        if !(SUBJECT_NAME_MIN_LENGTH..=SUBJECT_NAME_MAX_LENGTH).contains(&length) {
            return Err(AppError::Validation(format!(
                "name must be between {SUBJECT_NAME_MIN_LENGTH} and {SUBJECT_NAME_MAX_LENGTH} characters"
            )));
        }

        let mut characters = value.chars();
        if !characters
            .next()
            .is_some_and(|character| character.is_ascii_alphabetic())
        {
            return Err(AppError::Validation(
                "name must start with a letter".to_owned(),
            ));
        }
        if let Some(invalid) = characters.find(|character| {
            !(character.is_ascii_alphanumeric() || matches!(character, '@' | '.' | '_' | '-'))
        }) {
            return Err(AppError::Validation(format!(
                "name must not contain '{invalid}'"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the validated name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || domain.contains('@') || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Permission currently held by a subject, as listed by rAPId.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AssignedPermissionRecord")]
pub struct AssignedPermission {
    /// Token rAPId stores for the grant.
    pub token: PermissionToken,
    /// Structured address of the grant.
    pub selection: PermissionSelection,
}

#[derive(Debug, Deserialize)]
struct AssignedPermissionRecord {
    name: PermissionToken,
    #[serde(flatten)]
    record: PermissionRecord,
}

impl TryFrom<AssignedPermissionRecord> for AssignedPermission {
    type Error = AppError;

    fn try_from(value: AssignedPermissionRecord) -> Result<Self, Self::Error> {
        let token = value.name;
        let selection = PermissionSelection::try_from(value.record).map_err(|error| {
            AppError::Validation(format!("assigned permission '{token}' is malformed: {error}"))
        })?;

        Ok(Self { token, selection })
    }
}

/// User created in rAPId.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    /// Identifier issued by rAPId.
    pub user_id: SubjectId,
    /// Username.
    pub username: String,
    /// Email the invitation was sent to.
    pub email: String,
    /// Granted tokens.
    pub permissions: Vec<PermissionToken>,
}

/// Client application created in rAPId.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedClient {
    /// Identifier issued by rAPId.
    pub client_id: SubjectId,
    /// Client name.
    pub client_name: String,
    /// Secret shown once after creation.
    pub client_secret: String,
    /// Granted tokens.
    pub permissions: Vec<PermissionToken>,
}

#[cfg(test)]
mod tests {
    use rapid_console_core::SubjectId;

    use super::*;

    fn summary(id: &str, name: &str, kind: SubjectKind) -> SubjectSummary {
        SubjectSummary {
            subject_id: SubjectId::new(id).unwrap_or_else(|_| unreachable!()),
            subject_name: name.to_owned(),
            kind,
        }
    }

    #[test]
    fn filter_subjects_keeps_kind_sorted_by_name() {
        let subjects = vec![
            summary("1", "zeta", SubjectKind::User),
            summary("2", "build-bot", SubjectKind::Client),
            summary("3", "Alpha", SubjectKind::User),
            summary("4", "beta", SubjectKind::User),
        ];

        let users = filter_subjects(subjects, SubjectKind::User);
        let names: Vec<&str> = users
            .iter()
            .map(|subject| subject.subject_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn subject_kind_parses_case_insensitively() {
        assert_eq!(
            SubjectKind::from_str("client").unwrap_or(SubjectKind::User),
            SubjectKind::Client
        );
        assert!(SubjectKind::from_str("robot").is_err());
    }

    #[test]
    fn subject_name_requires_leading_letter() {
        assert!(SubjectName::new("1abc").is_err());
        assert!(SubjectName::new("ab").is_err());
        assert!(SubjectName::new("jane doe").is_err());
        assert!(SubjectName::new("jane.doe@corp").is_ok());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("user@nodot").is_err());
        assert!(EmailAddress::new("a@b@c.com").is_err());
        assert_eq!(
            EmailAddress::new(" USER@Example.COM ")
                .unwrap_or_else(|_| unreachable!())
                .as_str(),
            "user@example.com"
        );
    }

    #[test]
    fn assigned_permission_decodes_rapid_row() {
        let assigned = serde_json::from_value::<AssignedPermission>(serde_json::json!({
            "name": "READ_DEFAULT_PROTECTED_SALES",
            "type": "READ",
            "layer": "default",
            "sensitivity": "PROTECTED",
            "domain": "sales"
        }));
        assert!(assigned.is_ok());
        let assigned = assigned.unwrap_or_else(|_| unreachable!());
        assert_eq!(assigned.token.as_str(), "READ_DEFAULT_PROTECTED_SALES");
        assert_eq!(assigned.selection.to_string(), "READ/default/PROTECTED/sales");
    }

    #[test]
    fn assigned_admin_permission_accepts_null_scope() {
        let assigned = serde_json::from_value::<AssignedPermission>(serde_json::json!({
            "name": "USER_ADMIN",
            "type": "USER_ADMIN",
            "layer": null,
            "sensitivity": null,
            "domain": null
        }));
        assert!(assigned.is_ok());
    }
}
