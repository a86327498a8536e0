//! Raw discovery data as reported by the API server.
//!
//! These mirror the `APIResourceList` / `APIResource` shapes of the
//! Kubernetes discovery API, trimmed to the fields rolegen reads. Snapshot
//! files use the same camelCase layout, so a saved discovery response can be
//! replayed without a cluster.

use serde::{Deserialize, Serialize};

/// The group/version string of the legacy core API.
pub const CORE_GROUP_VERSION: &str = "v1";

/// Internal name for the core API group until rules are emitted.
pub const CORE_GROUP: &str = "core";

/// All resources served under one group/version (e.g. `apps/v1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceList {
    /// `<group>/<version>`, or just `v1` for the core API.
    pub group_version: String,

    #[serde(default)]
    pub resources: Vec<ApiResource>,
}

/// A single resource descriptor inside an `ApiResourceList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResource {
    /// Plural resource name, possibly with a subresource (`pods/exec`).
    pub name: String,

    #[serde(default)]
    pub verbs: Vec<String>,
}

impl ApiResourceList {
    /// Build a list from `(name, verbs)` pairs.
    pub fn new<R, N, V, S>(group_version: impl Into<String>, resources: R) -> Self
    where
        R: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            group_version: group_version.into(),
            resources: resources
                .into_iter()
                .map(|(name, verbs)| ApiResource {
                    name: name.into(),
                    verbs: verbs.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }

    /// The RBAC API group for this list.
    ///
    /// RBAC rules name groups without versions, so everything from the first
    /// `/` on is dropped. The core API (`v1`) has no group name and is
    /// tracked as `"core"` until emission.
    pub fn api_group(&self) -> &str {
        if self.group_version == CORE_GROUP_VERSION {
            return CORE_GROUP;
        }
        self.group_version
            .split('/')
            .next()
            .unwrap_or(&self.group_version)
    }
}

/// The group name as written into an RBAC rule: `"core"` becomes `""`.
pub fn rbac_group(api_group: &str) -> &str {
    if api_group == CORE_GROUP {
        ""
    } else {
        api_group
    }
}
