//! Offline discovery from a saved snapshot.
//!
//! A snapshot is a list of `APIResourceList` objects (`groupVersion`,
//! `resources[].name`, `resources[].verbs`) in YAML or JSON; TOML cannot hold
//! a top-level list. Generating from a snapshot makes a run reproducible
//! without cluster access.

use std::path::Path;

use tracing::info;

use rolegen_contracts::{
    discovery::ApiResourceList,
    document::DocumentFormat,
    error::RolegenResult,
};
use rolegen_core::traits::DiscoveryProvider;

/// `DiscoveryProvider` serving a fixed listing.
#[derive(Debug, Clone)]
pub struct SnapshotDiscovery {
    groups: Vec<ApiResourceList>,
}

impl SnapshotDiscovery {
    pub fn new(groups: Vec<ApiResourceList>) -> Self {
        Self { groups }
    }

    /// Load a snapshot file, choosing the format from its extension.
    pub fn from_file(path: &Path) -> RolegenResult<Self> {
        let groups: Vec<ApiResourceList> = DocumentFormat::load(path)?;
        info!(path = %path.display(), group_versions = groups.len(), "discovery snapshot loaded");
        Ok(Self::new(groups))
    }
}

impl DiscoveryProvider for SnapshotDiscovery {
    fn server_resources(&self) -> RolegenResult<Vec<ApiResourceList>> {
        Ok(self.groups.clone())
    }
}
