//! Typed permission catalog as served by rAPId's `permissions_ui` endpoint.
//!
//! The catalog nests `action → layer → sensitivity → domain`. Admin actions
//! map straight to a token, protected sensitivities map to a domain table and
//! every other sensitivity maps to a token.

use std::collections::BTreeMap;

use rapid_console_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::permission::{
    ActionType, DataPermission, PermissionSelection, PermissionToken, Sensitivity,
};

/// Layer name whose removal retires the whole action.
pub const ALL_LAYER: &str = "ALL";

/// Protected domains of one sensitivity.
pub type DomainMap = BTreeMap<String, PermissionToken>;

/// Sensitivities of one layer.
pub type SensitivityMap = BTreeMap<Sensitivity, SensitivityNode>;

/// Layers of one data action.
pub type LayerMap = BTreeMap<String, SensitivityMap>;

/// Value stored under a sensitivity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensitivityNode {
    /// Token for a non-protected sensitivity.
    Leaf(PermissionToken),
    /// Per-domain tokens for `PROTECTED`.
    Domains(DomainMap),
}

/// Value stored under an action key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionNode {
    /// Token for an admin action.
    Leaf(PermissionToken),
    /// Layer table for a data action.
    Layers(LayerMap),
}

/// Result of removing one selection from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneOutcome {
    /// The addressed branch was removed, with any emptied parents.
    Pruned,
    /// The addressed branch was not present.
    AlreadyAbsent,
    /// The selection is missing its sensitivity, or the domain of a protected one.
    Incomplete,
}

/// One assignable permission left in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLeaf {
    /// Structured address of the permission.
    pub selection: PermissionSelection,
    /// Token submitted to rAPId.
    pub token: PermissionToken,
}

/// Full set of assignable permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ActionType, ActionNode>",
    into = "BTreeMap<ActionType, ActionNode>"
)]
pub struct PermissionCatalog {
    actions: BTreeMap<ActionType, ActionNode>,
}

impl PermissionCatalog {
    /// Builds a catalog, validating node shapes and dropping empty branches.
    pub fn from_actions(actions: BTreeMap<ActionType, ActionNode>) -> AppResult<Self> {
        let mut validated = BTreeMap::new();

        for (action, node) in actions {
            match (action.is_admin(), node) {
                (true, ActionNode::Leaf(token)) => {
                    validated.insert(action, ActionNode::Leaf(token));
                }
                (false, ActionNode::Layers(layers)) => {
                    let layers = validate_layers(action, layers)?;
                    if !layers.is_empty() {
                        validated.insert(action, ActionNode::Layers(layers));
                    }
                }
                (true, ActionNode::Layers(_)) => {
                    return Err(AppError::Validation(format!(
                        "admin permission '{action}' must map to a single token"
                    )));
                }
                (false, ActionNode::Leaf(_)) => {
                    return Err(AppError::Validation(format!(
                        "data permission '{action}' must map to a layer table"
                    )));
                }
            }
        }

        Ok(Self { actions: validated })
    }

    /// Returns whether no permission can be chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the node stored for an action.
    #[must_use]
    pub fn action(&self, action: ActionType) -> Option<&ActionNode> {
        self.actions.get(&action)
    }

    /// Returns the actions still present, in catalog order.
    pub fn actions(&self) -> impl Iterator<Item = ActionType> + '_ {
        self.actions.keys().copied()
    }

    /// Removes the branch addressed by a selection and every parent it empties.
    pub fn prune(&mut self, selection: &PermissionSelection) -> PruneOutcome {
        match selection {
            PermissionSelection::Admin(action) => {
                match self.actions.remove(&ActionType::from(*action)) {
                    Some(_) => PruneOutcome::Pruned,
                    None => PruneOutcome::AlreadyAbsent,
                }
            }
            PermissionSelection::Data(permission) => {
                match (permission.sensitivity(), permission.domain()) {
                    (Some(sensitivity), Some(domain)) => {
                        self.prune_domain(permission, sensitivity, domain)
                    }
                    (Some(Sensitivity::Protected), None) | (None, _) => PruneOutcome::Incomplete,
                    (Some(sensitivity), None) => self.prune_sensitivity(permission, sensitivity),
                }
            }
        }
    }

    fn prune_domain(
        &mut self,
        permission: &DataPermission,
        sensitivity: Sensitivity,
        domain: &str,
    ) -> PruneOutcome {
        let action = ActionType::from(permission.action());
        let layer = permission.layer();

        let Some(ActionNode::Layers(layers)) = self.actions.get_mut(&action) else {
            return PruneOutcome::AlreadyAbsent;
        };
        let Some(sensitivities) = layers.get_mut(layer) else {
            return PruneOutcome::AlreadyAbsent;
        };
        let Some(SensitivityNode::Domains(domains)) = sensitivities.get_mut(&sensitivity) else {
            return PruneOutcome::AlreadyAbsent;
        };
        if domains.remove(domain).is_none() {
            return PruneOutcome::AlreadyAbsent;
        }

        if domains.is_empty() {
            sensitivities.remove(&sensitivity);
        }
        if sensitivities.is_empty() {
            layers.remove(layer);
        }
        if layers.is_empty() {
            self.actions.remove(&action);
        }

        PruneOutcome::Pruned
    }

    fn prune_sensitivity(
        &mut self,
        permission: &DataPermission,
        sensitivity: Sensitivity,
    ) -> PruneOutcome {
        let action = ActionType::from(permission.action());
        let layer = permission.layer();

        let Some(ActionNode::Layers(layers)) = self.actions.get_mut(&action) else {
            return PruneOutcome::AlreadyAbsent;
        };
        let Some(sensitivities) = layers.get_mut(layer) else {
            return PruneOutcome::AlreadyAbsent;
        };
        if sensitivities.remove(&sensitivity).is_none() {
            return PruneOutcome::AlreadyAbsent;
        }

        // ALL supersedes every other sensitivity in the layer.
        if sensitivity == Sensitivity::All || sensitivities.is_empty() {
            layers.remove(layer);
            if layers.is_empty() || layer == ALL_LAYER {
                self.actions.remove(&action);
            }
        }

        PruneOutcome::Pruned
    }

    /// Resolves a complete selection to the token rAPId expects.
    pub fn resolve_token(&self, selection: &PermissionSelection) -> AppResult<PermissionToken> {
        let action = selection.action();
        let missing = || AppError::NotFound(format!("permission '{selection}' is not assignable"));

        let permission = match selection {
            PermissionSelection::Admin(_) => {
                return match self.actions.get(&action) {
                    Some(ActionNode::Leaf(token)) => Ok(token.clone()),
                    _ => Err(missing()),
                };
            }
            PermissionSelection::Data(permission) => permission,
        };

        let sensitivity = permission.sensitivity().ok_or_else(|| {
            AppError::Validation(format!("permission '{selection}' requires a sensitivity"))
        })?;
        if sensitivity == Sensitivity::Protected && permission.domain().is_none() {
            return Err(AppError::Validation(format!(
                "permission '{selection}' requires a domain"
            )));
        }

        let Some(ActionNode::Layers(layers)) = self.actions.get(&action) else {
            return Err(missing());
        };
        let node = layers
            .get(permission.layer())
            .and_then(|sensitivities| sensitivities.get(&sensitivity))
            .ok_or_else(missing)?;

        match (node, permission.domain()) {
            (SensitivityNode::Leaf(token), None) => Ok(token.clone()),
            (SensitivityNode::Domains(domains), Some(domain)) => {
                domains.get(domain).cloned().ok_or_else(missing)
            }
            _ => Err(missing()),
        }
    }

    /// Lists every complete choice left in the catalog.
    #[must_use]
    pub fn leaves(&self) -> Vec<CatalogLeaf> {
        let mut leaves = Vec::new();

        for (action, node) in &self.actions {
            match node {
                ActionNode::Leaf(token) => {
                    if let Some(admin) = action.admin_action() {
                        leaves.push(CatalogLeaf {
                            selection: PermissionSelection::Admin(admin),
                            token: token.clone(),
                        });
                    }
                }
                ActionNode::Layers(layers) => {
                    let Some(data_action) = action.data_action() else {
                        continue;
                    };
                    for (layer, sensitivities) in layers {
                        for (sensitivity, node) in sensitivities {
                            match node {
                                SensitivityNode::Leaf(token) => leaves.push(CatalogLeaf {
                                    selection: PermissionSelection::Data(DataPermission::scoped(
                                        data_action,
                                        layer.clone(),
                                        Some(*sensitivity),
                                        None,
                                    )),
                                    token: token.clone(),
                                }),
                                SensitivityNode::Domains(domains) => {
                                    for (domain, token) in domains {
                                        leaves.push(CatalogLeaf {
                                            selection: PermissionSelection::Data(
                                                DataPermission::scoped(
                                                    data_action,
                                                    layer.clone(),
                                                    Some(*sensitivity),
                                                    Some(domain.clone()),
                                                ),
                                            ),
                                            token: token.clone(),
                                        });
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        leaves
    }
}

fn validate_layers(action: ActionType, layers: LayerMap) -> AppResult<LayerMap> {
    let mut validated = LayerMap::new();

    for (layer, sensitivities) in layers {
        let mut kept = SensitivityMap::new();
        for (sensitivity, node) in sensitivities {
            match (sensitivity, node) {
                (Sensitivity::Protected, SensitivityNode::Domains(domains)) => {
                    if !domains.is_empty() {
                        kept.insert(sensitivity, SensitivityNode::Domains(domains));
                    }
                }
                (Sensitivity::Protected, SensitivityNode::Leaf(_)) => {
                    return Err(AppError::Validation(format!(
                        "{action}/{layer}/PROTECTED must map to a domain table"
                    )));
                }
                (_, SensitivityNode::Leaf(token)) => {
                    kept.insert(sensitivity, SensitivityNode::Leaf(token));
                }
                (_, SensitivityNode::Domains(_)) => {
                    return Err(AppError::Validation(format!(
                        "{action}/{layer}/{sensitivity} must map to a single token"
                    )));
                }
            }
        }

        if !kept.is_empty() {
            validated.insert(layer, kept);
        }
    }

    Ok(validated)
}

impl TryFrom<BTreeMap<ActionType, ActionNode>> for PermissionCatalog {
    type Error = AppError;

    fn try_from(value: BTreeMap<ActionType, ActionNode>) -> Result<Self, Self::Error> {
        Self::from_actions(value)
    }
}

impl From<PermissionCatalog> for BTreeMap<ActionType, ActionNode> {
    fn from(value: PermissionCatalog) -> Self {
        value.actions
    }
}
