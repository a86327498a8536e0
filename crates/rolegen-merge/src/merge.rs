//! Typed deep merge of an override ClusterRole onto a base ClusterRole.
//!
//! Merge rules, field by field:
//!
//! | field            | result                                    |
//! |------------------|-------------------------------------------|
//! | `apiVersion`     | override if non-empty, else base          |
//! | `kind`           | override if non-empty, else base          |
//! | `metadata.name`  | override if non-empty, else base          |
//! | `rules`          | base rules, then override rules appended  |
//!
//! Rules are never de-duplicated or matched by `(apiGroups, verbs)`: RBAC
//! grants are additive, so an appended rule can only widen what the base
//! allows, and the API server takes the union.

use tracing::debug;

use rolegen_contracts::{error::RolegenResult, role::ClusterRole};
use rolegen_core::traits::RoleMerger;

/// Merge `overlay` onto `base` (see module docs for the per-field rules).
pub fn merge_roles(base: ClusterRole, overlay: ClusterRole) -> ClusterRole {
    let ClusterRole {
        api_version,
        kind,
        metadata,
        rules,
    } = overlay;

    let mut merged = base;
    merged.api_version = prefer(api_version, merged.api_version);
    merged.kind = prefer(kind, merged.kind);
    merged.metadata.name = prefer(metadata.name, merged.metadata.name);

    debug!(
        base_rules = merged.rules.len(),
        appended_rules = rules.len(),
        "merging rules"
    );
    merged.rules.extend(rules);
    merged
}

fn prefer(over: String, base: String) -> String {
    if over.is_empty() {
        base
    } else {
        over
    }
}

/// The `RoleMerger` used by the binary: [`merge_roles`] with append semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendMerger;

impl RoleMerger for AppendMerger {
    fn merge(&self, base: ClusterRole, overlay: ClusterRole) -> RolegenResult<ClusterRole> {
        Ok(merge_roles(base, overlay))
    }
}
