//! The ClusterRole document and its policy rules.
//!
//! Field names follow the `rbac.authorization.k8s.io/v1` schema so the YAML
//! written here can be applied to a cluster as-is. Every field defaults when
//! absent, which lets a hand-written override file carry only `rules`.

use serde::{Deserialize, Serialize};

use crate::error::{RolegenError, RolegenResult};

pub const RBAC_API_VERSION: &str = "rbac.authorization.k8s.io/v1";
pub const CLUSTER_ROLE_KIND: &str = "ClusterRole";

/// Name given to the generated role when none is configured.
pub const DEFAULT_ROLE_NAME: &str = "restricted-cluster-role";

/// One RBAC rule: the verbs allowed on a set of resources in one API group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    /// Always a single group for generated rules; `""` is the core group.
    #[serde(default)]
    pub api_groups: Vec<String>,

    #[serde(default)]
    pub resources: Vec<String>,

    #[serde(default)]
    pub verbs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMetadata {
    #[serde(default)]
    pub name: String,
}

/// A cluster-scoped RBAC role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRole {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: RoleMetadata,

    /// Ordered rule list. Order is preserved through serialization.
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

impl ClusterRole {
    /// A `rbac.authorization.k8s.io/v1` ClusterRole with the given name and rules.
    pub fn new(name: impl Into<String>, rules: Vec<PolicyRule>) -> Self {
        Self {
            api_version: RBAC_API_VERSION.to_string(),
            kind: CLUSTER_ROLE_KIND.to_string(),
            metadata: RoleMetadata { name: name.into() },
            rules,
        }
    }

    /// Render the role as a YAML document.
    pub fn to_yaml(&self) -> RolegenResult<String> {
        serde_yaml::to_string(self).map_err(|e| RolegenError::SerializationError {
            reason: format!("failed to encode ClusterRole '{}' as YAML: {}", self.metadata.name, e),
        })
    }

    /// Parse a role from a YAML document.
    pub fn from_yaml(s: &str) -> RolegenResult<Self> {
        serde_yaml::from_str(s).map_err(|e| RolegenError::SerializationError {
            reason: format!("failed to decode ClusterRole YAML: {}", e),
        })
    }

    /// Every resource name mentioned by any rule, in rule order.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .flat_map(|rule| rule.resources.iter().map(String::as_str))
    }
}
