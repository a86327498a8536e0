//! Restriction file loading.
//!
//! A restriction file is an override ClusterRole: every resource named in its
//! `rules` is excluded from discovery, and the file's rules are then merged
//! back onto the generated role. Any of YAML, JSON or TOML is accepted, chosen
//! by extension.
//!
//! ```yaml
//! rules:
//!   - apiGroups: [""]
//!     resources: [secrets]
//!     verbs: [list, watch]
//!   - apiGroups: [metrics.k8s.io]
//!     resources: [nodes, pods]
//!     verbs: [get]
//! ```

use std::path::Path;

use tracing::{info, warn};

use rolegen_contracts::{
    document::DocumentFormat, error::RolegenResult, exclusion::ExclusionSet, role::ClusterRole,
};

/// Load the restriction document at `path`.
///
/// Returns `ConfigFileError` if the file is missing, has an unsupported
/// extension, or does not parse as a ClusterRole.
pub fn load_restrictions(path: &Path) -> RolegenResult<ClusterRole> {
    let role: ClusterRole = DocumentFormat::load(path)?;

    if role.rules.is_empty() {
        warn!(path = %path.display(), "restriction file has no rules; nothing will be excluded");
    }

    info!(
        path = %path.display(),
        rules = role.rules.len(),
        restricted = ExclusionSet::from_role(&role).len(),
        "restrictions loaded"
    );
    Ok(role)
}

/// Parse restriction `contents` already in memory.
pub fn parse_restrictions(contents: &str, format: DocumentFormat) -> RolegenResult<ClusterRole> {
    format.parse(contents, "<restrictions>")
}
