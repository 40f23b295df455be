//! Narrowing of the permission catalog to the choices still open for a subject.
//!
//! Every pending selection removes its branch from a working copy of the
//! catalog, in list order. A selection whose branch is already gone means the
//! list is redundant: creating a subject rejects that, while modifying one
//! tolerates it because rAPId may already hold overlapping grants.

use rapid_console_core::{AppError, AppResult};
use rapid_console_domain::{PermissionCatalog, PermissionSelection, PruneOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;


/// Form flow the pending selections belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionFlow {
    /// Building permissions for a new subject.
    Create,
    /// Editing permissions of an existing subject.
    Modify,
}

/// Computes the catalog branches still choosable next to `pending`.
///
/// The input catalog is left untouched.
pub fn compute_available_options(
    catalog: &PermissionCatalog,
    pending: &[PermissionSelection],
    flow: SelectionFlow,
) -> AppResult<PermissionCatalog> {
    match flow {
        SelectionFlow::Create => available_options_for_create(catalog, pending),
        SelectionFlow::Modify => Ok(available_options_for_modify(catalog, pending)),
    }
}

/// Create-flow narrowing; a selection colliding with an earlier one is a conflict.
pub fn available_options_for_create(
    catalog: &PermissionCatalog,
    pending: &[PermissionSelection],
) -> AppResult<PermissionCatalog> {
    let mut working = catalog.clone();

    for (position, selection) in pending.iter().enumerate() {
        if working.prune(selection) == PruneOutcome::AlreadyAbsent {
            return Err(AppError::Conflict(format!(
                "permission '{selection}' at position {position} is already covered by another selection"
            )));
        }
    }

    Ok(working)
}

/// Modify-flow narrowing; colliding selections narrow nothing further.
#[must_use]
pub fn available_options_for_modify(
    catalog: &PermissionCatalog,
    pending: &[PermissionSelection],
) -> PermissionCatalog {
    let mut working = catalog.clone();

    for selection in pending {
        if working.prune(selection) == PruneOutcome::AlreadyAbsent {
            debug!(%selection, "selection already covered, skipping");
        }
    }

    working
}
