//! The set of resource names kept out of the generated role.

use std::collections::HashSet;

use crate::role::ClusterRole;

/// Resource names matched exactly against discovered resource names.
///
/// Built from every `rules[].resources` entry of a restriction document: a
/// restricted resource is dropped from discovery and only comes back through
/// the rules the restriction document itself grants.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    inner: HashSet<String>,
}

impl ExclusionSet {
    pub fn from_role(role: &ClusterRole) -> Self {
        role.resource_names().collect()
    }

    pub fn contains(&self, resource_name: &str) -> bool {
        self.inner.contains(resource_name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(Into::into).collect(),
        }
    }
}
