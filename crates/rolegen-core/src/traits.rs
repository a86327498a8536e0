//! Trait definitions for the rolegen pipeline.
//!
//! These four traits are the seams of the generator:
//!
//! - `DiscoveryProvider` — where resource listings come from (live cluster,
//!   snapshot file)
//! - `RoleSynthesizer`   — discovery listings to a base ClusterRole
//! - `RoleMerger`        — base role plus override role to a merged role
//! - `RoleSink`          — where rendered role documents are written
//!
//! The `Generator` calls them in a fixed order and never touches a cluster
//! or the filesystem itself.

use std::fmt;

use rolegen_contracts::{
    discovery::ApiResourceList, error::RolegenResult, exclusion::ExclusionSet, role::ClusterRole,
};

/// A source of API server discovery data.
///
/// Called exactly once per run. Implementations own their connection; a
/// failure is reported as `DiscoveryError` (or `ConnectionError` if the
/// connection is only established lazily).
pub trait DiscoveryProvider {
    /// Every group/version the server exposes with its resources and verbs.
    fn server_resources(&self) -> RolegenResult<Vec<ApiResourceList>>;
}

/// Converts discovery listings into a base ClusterRole.
pub trait RoleSynthesizer {
    /// Build a role named `role_name` from `groups`, leaving out every
    /// resource in `exclusions`.
    fn synthesize(
        &self,
        groups: &[ApiResourceList],
        exclusions: &ExclusionSet,
        role_name: &str,
    ) -> RolegenResult<ClusterRole>;
}

/// Folds an override role onto a base role.
pub trait RoleMerger {
    /// Return the merged role. The generator overwrites the merged name
    /// afterwards, so implementations need not care about it.
    fn merge(&self, base: ClusterRole, overlay: ClusterRole) -> RolegenResult<ClusterRole>;
}

/// Which of the two output documents is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleDocument {
    /// The generated role before any merge.
    Base,
    /// The role after merging the restriction document.
    Merged,
}

impl RoleDocument {
    /// File name used when no explicit path is configured.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Base => "role_base.yaml",
            Self::Merged => "role_merged.yaml",
        }
    }
}

impl fmt::Display for RoleDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Merged => f.write_str("merged"),
        }
    }
}

/// Destination for rendered role documents.
///
/// A write must be all-or-nothing: a failed write leaves no partial document
/// behind.
pub trait RoleSink {
    fn write(&self, document: RoleDocument, contents: &str) -> RolegenResult<()>;
}
