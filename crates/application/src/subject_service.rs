//! Subject administration: listing, creation, permission edits and deletion.
//!
//! Selections arrive structured and are resolved to rAPId tokens against a
//! catalog fetched for the request.

use std::sync::Arc;

use rapid_console_core::{AppError, AppResult, SubjectId};
use rapid_console_domain::{
    AssignedPermission, CatalogLeaf, PermissionCatalog, PermissionSelection, PermissionToken,
};
use tracing::info;

use crate::permission_options::{SelectionFlow, compute_available_options};
use crate::rapid_ports::{PermissionCatalogGateway, SubjectGateway};

mod grants;
mod lifecycle;

#[cfg(test)]
mod tests;

/// Choices still open next to a list of pending selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionOptions {
    /// Pruned catalog tree.
    pub options: PermissionCatalog,
    /// Complete choices left in `options`, in catalog order.
    pub choices: Vec<CatalogLeaf>,
    /// Whether another selection can still be added.
    pub can_add_more: bool,
}

impl PermissionOptions {
    fn from_catalog(options: PermissionCatalog) -> Self {
        Self {
            choices: options.leaves(),
            can_add_more: !options.is_empty(),
            options,
        }
    }
}

/// Permissions a subject holds together with the choices still open to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPermissions {
    /// Subject the grants belong to.
    pub subject_id: SubjectId,
    /// Grants currently stored in rAPId.
    pub assigned: Vec<AssignedPermission>,
    /// Modify-flow options next to `assigned`.
    pub options: PermissionOptions,
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Requested username.
    pub username: String,
    /// Address the invitation goes to.
    pub email: String,
    /// Structured permissions to grant.
    pub permissions: Vec<PermissionSelection>,
}

/// Input for creating a client application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClientInput {
    /// Requested client name.
    pub client_name: String,
    /// Structured permissions to grant.
    pub permissions: Vec<PermissionSelection>,
}

/// Application service for rAPId users and clients.
#[derive(Clone)]
pub struct SubjectService {
    catalog_gateway: Arc<dyn PermissionCatalogGateway>,
    subject_gateway: Arc<dyn SubjectGateway>,
}

impl SubjectService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        catalog_gateway: Arc<dyn PermissionCatalogGateway>,
        subject_gateway: Arc<dyn SubjectGateway>,
    ) -> Self {
        Self {
            catalog_gateway,
            subject_gateway,
        }
    }

    /// Returns the full catalog of assignable permissions.
    pub async fn permission_catalog(&self) -> AppResult<PermissionCatalog> {
        self.catalog_gateway.fetch_permission_catalog().await
    }

    /// Narrows the current catalog to what remains choosable next to `pending`.
    pub async fn permission_options(
        &self,
        pending: &[PermissionSelection],
        flow: SelectionFlow,
    ) -> AppResult<PermissionOptions> {
        let catalog = self.catalog_gateway.fetch_permission_catalog().await?;
        let options = compute_available_options(&catalog, pending, flow)?;
        Ok(PermissionOptions::from_catalog(options))
    }
}

/// Resolves selections to tokens, keeping the first occurrence of each token.
fn resolve_tokens(
    catalog: &PermissionCatalog,
    selections: &[PermissionSelection],
) -> AppResult<Vec<PermissionToken>> {
    let mut tokens: Vec<PermissionToken> = Vec::with_capacity(selections.len());

    for selection in selections {
        let token = catalog.resolve_token(selection)?;
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }

    Ok(tokens)
}

fn require_non_blank(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn log_granted(subject: &str, tokens: &[PermissionToken]) {
    info!(subject, permission_count = tokens.len(), "permissions submitted to rAPId");
}
