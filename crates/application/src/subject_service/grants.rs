use super::*;

use crate::permission_options::available_options_for_modify;
use crate::rapid_ports::UpdatedSubjectPermissions;

impl SubjectService {
    /// Returns a subject's grants and the modify-flow choices left next to them.
    pub async fn subject_permissions(&self, subject_id: &SubjectId) -> AppResult<SubjectPermissions> {
        let catalog = self.catalog_gateway.fetch_permission_catalog().await?;
        let assigned = self
            .catalog_gateway
            .list_subject_permissions(subject_id)
            .await?;

        let held: Vec<PermissionSelection> = assigned
            .iter()
            .map(|permission| permission.selection.clone())
            .collect();
        let options = available_options_for_modify(&catalog, &held);

        Ok(SubjectPermissions {
            subject_id: subject_id.clone(),
            assigned,
            options: PermissionOptions::from_catalog(options),
        })
    }

    /// Replaces a subject's permissions with the given selections.
    ///
    /// Overlapping selections are accepted, matching the modify flow.
    pub async fn update_subject_permissions(
        &self,
        subject_id: &SubjectId,
        permissions: &[PermissionSelection],
    ) -> AppResult<UpdatedSubjectPermissions> {
        let catalog = self.catalog_gateway.fetch_permission_catalog().await?;
        let tokens = resolve_tokens(&catalog, permissions)?;
        log_granted(subject_id.as_str(), &tokens);

        let updated = self
            .subject_gateway
            .update_subject_permissions(subject_id, tokens)
            .await?;
        info!(%subject_id, "subject permissions updated");
        Ok(updated)
    }
}
