//! The rolegen generator: the sequential discovery-to-document pipeline.
//!
//!   Discovery → Synthesize → Render base → [Reparse → Merge → Rename → Render merged]
//!
//! Each stage runs exactly once. Any error aborts the run before the next
//! write, so the merged document only exists if every merge stage succeeded.

use tracing::{debug, info};

use rolegen_contracts::{
    error::RolegenResult,
    exclusion::ExclusionSet,
    role::{ClusterRole, DEFAULT_ROLE_NAME},
};

use crate::traits::{DiscoveryProvider, RoleDocument, RoleMerger, RoleSink, RoleSynthesizer};

/// Run-wide settings that are not tied to a particular seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Name of the generated role. Also forced onto the merged role.
    pub role_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            role_name: DEFAULT_ROLE_NAME.to_string(),
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct Generation {
    pub base: ClusterRole,
    pub merged: Option<ClusterRole>,

    /// The final document: merged YAML when an override was given, base
    /// YAML otherwise. This is what gets echoed to stdout.
    pub rendered: String,
}

/// Drives a single generation run.
///
/// Owns one implementation of each seam; construct one per run.
pub struct Generator {
    discovery: Box<dyn DiscoveryProvider>,
    synthesizer: Box<dyn RoleSynthesizer>,
    merger: Box<dyn RoleMerger>,
    sink: Box<dyn RoleSink>,
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(
        discovery: Box<dyn DiscoveryProvider>,
        synthesizer: Box<dyn RoleSynthesizer>,
        merger: Box<dyn RoleMerger>,
        sink: Box<dyn RoleSink>,
        config: GeneratorConfig,
    ) -> Self {
        Self { discovery, synthesizer, merger, sink, config }
    }

    /// Generate the base role and, if `overlay` is given, the merged role.
    ///
    /// # Pipeline
    ///
    /// 1. Derive the exclusion set from `overlay`'s rule resources
    /// 2. Fetch discovery data
    /// 3. Synthesize the base role without excluded resources
    /// 4. Render and write the base document
    /// 5. With an overlay: parse the rendered base back, merge the overlay
    ///    onto it, force the configured name, render and write the merged
    ///    document
    ///
    /// # Errors
    ///
    /// Propagates the first error from any seam. Nothing is retried.
    pub fn run(&self, overlay: Option<ClusterRole>) -> RolegenResult<Generation> {
        let exclusions = overlay
            .as_ref()
            .map(ExclusionSet::from_role)
            .unwrap_or_default();

        debug!(
            role_name = %self.config.role_name,
            excluded = exclusions.len(),
            "generation starting"
        );

        let groups = self.discovery.server_resources()?;
        info!(group_versions = groups.len(), "discovery complete");

        let base = self
            .synthesizer
            .synthesize(&groups, &exclusions, &self.config.role_name)?;
        info!(rules = base.rules.len(), "base role synthesized");

        let base_yaml = base.to_yaml()?;
        self.sink.write(RoleDocument::Base, &base_yaml)?;

        let Some(overlay) = overlay else {
            return Ok(Generation { base, merged: None, rendered: base_yaml });
        };

        // Merge against what was actually written, not the in-memory value.
        let written_base = ClusterRole::from_yaml(&base_yaml)?;
        let mut merged = self.merger.merge(written_base, overlay)?;
        merged.metadata.name = self.config.role_name.clone();

        let merged_yaml = merged.to_yaml()?;
        self.sink.write(RoleDocument::Merged, &merged_yaml)?;
        info!(rules = merged.rules.len(), "merged role written");

        Ok(Generation {
            base,
            merged: Some(merged),
            rendered: merged_yaml,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rolegen_contracts::{
        discovery::ApiResourceList,
        error::{RolegenError, RolegenResult},
        exclusion::ExclusionSet,
        role::{ClusterRole, PolicyRule},
    };

    use crate::traits::{DiscoveryProvider, RoleDocument, RoleMerger, RoleSink, RoleSynthesizer};

    use super::{Generator, GeneratorConfig};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    fn rule(group: &str, resources: &[&str], verbs: &[&str]) -> PolicyRule {
        PolicyRule {
            api_groups: vec![group.to_string()],
            resources: resources.iter().map(|s| s.to_string()).collect(),
            verbs: verbs.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Discovery that returns a fixed listing, or fails.
    struct MockDiscovery {
        groups: Option<Vec<ApiResourceList>>,
    }

    impl DiscoveryProvider for MockDiscovery {
        fn server_resources(&self) -> RolegenResult<Vec<ApiResourceList>> {
            self.groups.clone().ok_or_else(|| RolegenError::DiscoveryError {
                reason: "server unavailable".to_string(),
            })
        }
    }

    /// One rule per resource, skipping exclusions. Records what it saw.
    struct MockSynthesizer {
        seen_exclusions: Arc<Mutex<Vec<String>>>,
    }

    impl RoleSynthesizer for MockSynthesizer {
        fn synthesize(
            &self,
            groups: &[ApiResourceList],
            exclusions: &ExclusionSet,
            role_name: &str,
        ) -> RolegenResult<ClusterRole> {
            let mut rules = Vec::new();
            for group in groups {
                for resource in &group.resources {
                    if exclusions.contains(&resource.name) {
                        self.seen_exclusions.lock().unwrap().push(resource.name.clone());
                        continue;
                    }
                    let verbs: Vec<&str> = resource.verbs.iter().map(String::as_str).collect();
                    rules.push(rule(group.api_group(), &[resource.name.as_str()], &verbs));
                }
            }
            Ok(ClusterRole::new(role_name, rules))
        }
    }

    struct AppendMerger;

    impl RoleMerger for AppendMerger {
        fn merge(&self, mut base: ClusterRole, overlay: ClusterRole) -> RolegenResult<ClusterRole> {
            base.metadata.name = overlay.metadata.name;
            base.rules.extend(overlay.rules);
            Ok(base)
        }
    }

    struct FailingMerger;

    impl RoleMerger for FailingMerger {
        fn merge(&self, _base: ClusterRole, _overlay: ClusterRole) -> RolegenResult<ClusterRole> {
            Err(RolegenError::SerializationError { reason: "merge exploded".to_string() })
        }
    }

    /// A sink that records every document written.
    #[derive(Clone, Default)]
    struct RecordingSink {
        writes: Arc<Mutex<Vec<(RoleDocument, String)>>>,
    }

    impl RoleSink for RecordingSink {
        fn write(&self, document: RoleDocument, contents: &str) -> RolegenResult<()> {
            self.writes.lock().unwrap().push((document, contents.to_string()));
            Ok(())
        }
    }

    fn discovery() -> MockDiscovery {
        MockDiscovery {
            groups: Some(vec![
                ApiResourceList::new("v1", [("pods", vec!["get", "list"]), ("secrets", vec!["get", "list"])]),
                ApiResourceList::new("apps/v1", [("deployments", vec!["get", "list", "watch"])]),
            ]),
        }
    }

    fn generator(
        discovery: MockDiscovery,
        merger: Box<dyn RoleMerger>,
        sink: RecordingSink,
        seen: Arc<Mutex<Vec<String>>>,
    ) -> Generator {
        Generator::new(
            Box::new(discovery),
            Box::new(MockSynthesizer { seen_exclusions: seen }),
            merger,
            Box::new(sink),
            GeneratorConfig { role_name: "foo".to_string() },
        )
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    #[test]
    fn without_overlay_only_base_is_written() {
        let sink = RecordingSink::default();
        let pipeline = generator(discovery(), Box::new(AppendMerger), sink.clone(), Arc::default());

        let generation = pipeline.run(None).unwrap();

        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, RoleDocument::Base);
        assert_eq!(writes[0].1, generation.rendered);
        assert!(generation.merged.is_none());
        assert_eq!(generation.base.metadata.name, "foo");
        assert_eq!(generation.base.rules.len(), 3);
    }

    #[test]
    fn overlay_resources_are_excluded_then_merged_back() {
        let sink = RecordingSink::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pipeline = generator(discovery(), Box::new(AppendMerger), sink.clone(), seen.clone());

        let overlay = ClusterRole::new("custom", vec![rule("", &["secrets"], &["get"])]);
        let generation = pipeline.run(Some(overlay)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["secrets".to_string()]);
        assert!(generation.base.resource_names().all(|r| r != "secrets"));

        let merged = generation.merged.expect("merged role");
        assert_eq!(merged.rules.len(), 3);
        assert_eq!(merged.rules[2].resources, vec!["secrets"]);
        assert_eq!(merged.rules[2].verbs, vec!["get"]);
    }

    #[test]
    fn merged_name_is_forced_to_configured_name() {
        let sink = RecordingSink::default();
        let pipeline = generator(discovery(), Box::new(AppendMerger), sink.clone(), Arc::default());

        let overlay = ClusterRole::new("custom", Vec::new());
        let generation = pipeline.run(Some(overlay)).unwrap();

        let merged = generation.merged.unwrap();
        assert_eq!(merged.metadata.name, "foo");
        assert!(generation.rendered.contains("name: foo"));

        let writes = sink.writes.lock().unwrap();
        let documents: Vec<RoleDocument> = writes.iter().map(|(d, _)| *d).collect();
        assert_eq!(documents, vec![RoleDocument::Base, RoleDocument::Merged]);
    }

    #[test]
    fn discovery_failure_writes_nothing() {
        let sink = RecordingSink::default();
        let pipeline = generator(
            MockDiscovery { groups: None },
            Box::new(AppendMerger),
            sink.clone(),
            Arc::default(),
        );

        let err = pipeline.run(None).unwrap_err();
        assert!(matches!(err, RolegenError::DiscoveryError { .. }));
        assert!(sink.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn merge_failure_leaves_only_base() {
        let sink = RecordingSink::default();
        let pipeline = generator(discovery(), Box::new(FailingMerger), sink.clone(), Arc::default());

        let err = pipeline.run(Some(ClusterRole::default())).unwrap_err();
        assert!(err.to_string().contains("merge exploded"));

        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, RoleDocument::Base);
    }

    #[test]
    fn default_config_uses_default_role_name() {
        assert_eq!(GeneratorConfig::default().role_name, "restricted-cluster-role");
    }
}
