use async_trait::async_trait;
use rapid_console_core::{AppResult, SubjectId};
use rapid_console_domain::{
    CreatedClient, CreatedUser, EmailAddress, PermissionToken, SubjectName, SubjectSummary,
};
use serde::{Deserialize, Serialize};

/// User creation payload sent to rAPId.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Username.
    pub username: SubjectName,
    /// Email address.
    pub email: EmailAddress,
    /// Tokens to grant.
    pub permissions: Vec<PermissionToken>,
}

/// Client creation payload sent to rAPId.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClientRequest {
    /// Client application name.
    pub client_name: SubjectName,
    /// Tokens to grant.
    pub permissions: Vec<PermissionToken>,
}

/// Permissions stored for a subject after an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedSubjectPermissions {
    /// Updated subject.
    pub subject_id: SubjectId,
    /// Tokens now held.
    pub permissions: Vec<PermissionToken>,
}

/// Port for user and client administration in rAPId.
#[async_trait]
pub trait SubjectGateway: Send + Sync {
    /// Lists every user and client.
    async fn list_subjects(&self) -> AppResult<Vec<SubjectSummary>>;

    /// Creates a user.
    async fn create_user(&self, request: CreateUserRequest) -> AppResult<CreatedUser>;

    /// Creates a client application.
    async fn create_client(&self, request: CreateClientRequest) -> AppResult<CreatedClient>;

    /// Replaces the permissions of a subject.
    async fn update_subject_permissions(
        &self,
        subject_id: &SubjectId,
        permissions: Vec<PermissionToken>,
    ) -> AppResult<UpdatedSubjectPermissions>;

    /// Deletes a user, returning rAPId's confirmation message.
    async fn delete_user(&self, user_id: &SubjectId, username: &str) -> AppResult<String>;

    /// Deletes a client application, returning rAPId's confirmation message.
    async fn delete_client(&self, client_id: &SubjectId) -> AppResult<String>;
}
