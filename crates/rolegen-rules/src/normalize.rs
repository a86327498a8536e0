//! Discovery normalization.
//!
//! Flattens per-group-version listings into `ResourceEntry` values: the
//! version is dropped from the group, the core API becomes `"core"`, excluded
//! resources are skipped, and verbs are sorted and de-duplicated.

use tracing::debug;

use rolegen_contracts::{
    discovery::ApiResourceList, entry::ResourceEntry, exclusion::ExclusionSet,
};

/// Normalize `groups` into one entry per kept resource, in discovery order.
///
/// Resources advertising no verbs cannot be expressed as a rule and are
/// skipped.
pub fn normalize(groups: &[ApiResourceList], exclusions: &ExclusionSet) -> Vec<ResourceEntry> {
    let mut entries = Vec::new();

    for list in groups {
        let api_group = list.api_group();
        debug!(group_version = %list.group_version, api_group = %api_group, "group");

        for resource in &list.resources {
            debug!(
                resource = %resource.name,
                verbs = ?resource.verbs,
                "resource"
            );

            if exclusions.contains(&resource.name) {
                debug!(resource = %resource.name, "resource restricted; skipping");
                continue;
            }
            if resource.verbs.is_empty() {
                debug!(resource = %resource.name, "resource has no verbs; skipping");
                continue;
            }

            entries.push(ResourceEntry::new(
                api_group,
                resource.name.as_str(),
                resource.verbs.iter().map(String::as_str),
            ));
        }
    }

    entries
}
