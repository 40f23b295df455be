use rapid_console_domain::{
    CreatedClient, CreatedUser, EmailAddress, SubjectKind, SubjectName, SubjectSummary,
    filter_subjects,
};

use super::*;

use crate::permission_options::available_options_for_create;
use crate::rapid_ports::{CreateClientRequest, CreateUserRequest};

impl SubjectService {
    /// Lists subjects of one kind, ordered by name.
    pub async fn list_subjects(&self, kind: SubjectKind) -> AppResult<Vec<SubjectSummary>> {
        let subjects = self.subject_gateway.list_subjects().await?;
        Ok(filter_subjects(subjects, kind))
    }

    /// Creates a user after validating its name, email and selections.
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<CreatedUser> {
        let username = SubjectName::new(input.username)?;
        let email = EmailAddress::new(input.email)?;

        let catalog = self.catalog_gateway.fetch_permission_catalog().await?;
        available_options_for_create(&catalog, &input.permissions)?;
        let permissions = resolve_tokens(&catalog, &input.permissions)?;
        log_granted(username.as_str(), &permissions);

        let created = self
            .subject_gateway
            .create_user(CreateUserRequest {
                username,
                email,
                permissions,
            })
            .await?;

        info!(user_id = %created.user_id, username = %created.username, "user created");
        Ok(created)
    }

    /// Creates a client application after validating its name and selections.
    pub async fn create_client(&self, input: CreateClientInput) -> AppResult<CreatedClient> {
        let client_name = SubjectName::new(input.client_name)?;

        let catalog = self.catalog_gateway.fetch_permission_catalog().await?;
        available_options_for_create(&catalog, &input.permissions)?;
        let permissions = resolve_tokens(&catalog, &input.permissions)?;
        log_granted(client_name.as_str(), &permissions);

        let created = self
            .subject_gateway
            .create_client(CreateClientRequest {
                client_name,
                permissions,
            })
            .await?;

        info!(client_id = %created.client_id, client_name = %created.client_name, "client created");
        Ok(created)
    }

    /// Deletes a user; rAPId requires the username next to the identifier.
    pub async fn delete_user(&self, user_id: &SubjectId, username: &str) -> AppResult<String> {
        require_non_blank(username, "username")?;

        let message = self
            .subject_gateway
            .delete_user(user_id, username.trim())
            .await?;
        info!(%user_id, "user deleted");
        Ok(message)
    }

    /// Deletes a client application.
    pub async fn delete_client(&self, client_id: &SubjectId) -> AppResult<String> {
        let message = self.subject_gateway.delete_client(client_id).await?;
        info!(%client_id, "client deleted");
        Ok(message)
    }
}
