//! Canonical resource entries and the key used to aggregate them.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{RolegenError, RolegenResult};

/// Separates the group from the verb list inside a `GroupVerbKey`.
pub const KEY_DELIMITER: char = '!';

/// Separates verbs inside a `GroupVerbKey`.
pub const VERB_SEPARATOR: char = ',';

/// One discovered resource after normalization.
///
/// `api_group` is `"core"` for the legacy API. `verbs` is sorted ascending and
/// free of duplicates, so two resources with the same verb set compare equal
/// regardless of the order the server listed them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub api_group: String,
    pub resource_name: String,
    pub verbs: Vec<String>,
}

impl ResourceEntry {
    pub fn new<S: Into<String>>(
        api_group: impl Into<String>,
        resource_name: impl Into<String>,
        verbs: impl IntoIterator<Item = S>,
    ) -> Self {
        let verbs: BTreeSet<String> = verbs.into_iter().map(Into::into).collect();
        Self {
            api_group: api_group.into(),
            resource_name: resource_name.into(),
            verbs: verbs.into_iter().collect(),
        }
    }

    /// The aggregation key this entry belongs to.
    pub fn key(&self) -> GroupVerbKey {
        GroupVerbKey::new(&self.api_group, &self.verbs)
    }
}

/// Aggregation key: `<group>!<verb>,<verb>,...`.
///
/// Verbs must already be sorted and de-duplicated; `ResourceEntry` guarantees
/// that for every key it produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupVerbKey(String);

impl GroupVerbKey {
    pub fn new(api_group: &str, sorted_verbs: &[String]) -> Self {
        let verbs = sorted_verbs.join(&VERB_SEPARATOR.to_string());
        Self(format!("{api_group}{KEY_DELIMITER}{verbs}"))
    }

    /// Decode the key back into `(api_group, verbs)`.
    ///
    /// Fails with `InvariantError` if the key does not hold exactly one
    /// delimiter, which only happens when a group or verb name contains it.
    pub fn parts(&self) -> RolegenResult<(&str, Vec<String>)> {
        let split: Vec<&str> = self.0.split(KEY_DELIMITER).collect();
        if split.len() != 2 {
            return Err(RolegenError::InvariantError {
                reason: format!("unexpected aggregation key '{}' from API discovery", self.0),
            });
        }
        let verbs = split[1]
            .split(VERB_SEPARATOR)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        Ok((split[0], verbs))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupVerbKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
