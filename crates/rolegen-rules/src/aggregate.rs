//! Rule aggregation by (group, verb-set) signature.
//!
//! Every `ResourceEntry` is filed under its `GroupVerbKey`. Each key becomes
//! exactly one `PolicyRule` holding the union of its resources, so no two
//! emitted rules share `(apiGroups, verbs)`.
//!
//! Lookup and ordering are kept apart: a `HashMap` finds the accumulator for
//! a key, a `Vec` remembers the order keys were first seen. Rules come out in
//! that order, and resources inside a rule come out sorted, so identical
//! discovery input always renders the same document.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use rolegen_contracts::{
    discovery::rbac_group,
    entry::{GroupVerbKey, ResourceEntry},
    error::RolegenResult,
    role::PolicyRule,
};

/// Collapse `entries` into one rule per (group, verb-set) signature.
///
/// # Errors
///
/// `InvariantError` if a key does not decode into a group and a verb list.
pub fn aggregate(entries: &[ResourceEntry]) -> RolegenResult<Vec<PolicyRule>> {
    let mut resources_by_key: HashMap<GroupVerbKey, BTreeSet<String>> = HashMap::new();
    let mut first_seen: Vec<GroupVerbKey> = Vec::new();

    for entry in entries {
        let key = entry.key();
        let resources = resources_by_key.entry(key.clone()).or_insert_with(|| {
            first_seen.push(key);
            BTreeSet::new()
        });
        resources.insert(entry.resource_name.clone());
    }

    let mut rules = Vec::with_capacity(first_seen.len());
    for key in first_seen {
        let (api_group, verbs) = key.parts()?;
        let resources = resources_by_key.remove(&key).unwrap_or_default();

        debug!(key = %key, resources = resources.len(), "rule");

        rules.push(PolicyRule {
            api_groups: vec![rbac_group(api_group).to_string()],
            resources: resources.into_iter().collect(),
            verbs,
        });
    }

    Ok(rules)
}
