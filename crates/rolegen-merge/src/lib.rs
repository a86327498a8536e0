//! # rolegen-merge
//!
//! Restriction handling for rolegen.
//!
//! This crate provides:
//! - [`load_restrictions`], which reads an override ClusterRole from a YAML,
//!   JSON or TOML file
//! - [`AppendMerger`], the [`RoleMerger`](rolegen_core::traits::RoleMerger)
//!   that folds that override onto the generated role
//!
//! ## Merge semantics
//!
//! Scalars from the override win when set; rules are appended after the
//! generated rules. The generator forces the merged role's name afterwards.

pub mod merge;
pub mod restrictions;

pub use merge::{merge_roles, AppendMerger};
pub use restrictions::{load_restrictions, parse_restrictions};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rolegen_contracts::{
        document::DocumentFormat,
        error::RolegenError,
        exclusion::ExclusionSet,
        role::{ClusterRole, PolicyRule, RBAC_API_VERSION},
    };
    use rolegen_core::traits::RoleMerger;

    use crate::{load_restrictions, merge_roles, parse_restrictions, AppendMerger};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn rule(group: &str, resources: &[&str], verbs: &[&str]) -> PolicyRule {
        PolicyRule {
            api_groups: vec![group.to_string()],
            resources: resources.iter().map(|s| s.to_string()).collect(),
            verbs: verbs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn base() -> ClusterRole {
        ClusterRole::new(
            "restricted-cluster-role",
            vec![
                rule("", &["pods"], &["get", "list"]),
                rule("apps", &["deployments"], &["get", "list", "watch"]),
            ],
        )
    }

    const RESTRICTIONS_YAML: &str = r#"
rules:
  - apiGroups: [""]
    resources: [secrets]
    verbs: [list, watch]
  - apiGroups: [""]
    resources: [pods/exec]
    verbs: [get]
  - apiGroups: [metrics.k8s.io]
    resources: [nodes, pods]
    verbs: [get]
"#;

    // ── 1. merge semantics ────────────────────────────────────────────────────

    /// Override rules are appended after base rules, in file order.
    #[test]
    fn test_rules_are_appended() {
        let overlay = ClusterRole {
            rules: vec![rule("", &["secrets"], &["get"])],
            ..ClusterRole::default()
        };
        let merged = merge_roles(base(), overlay);

        assert_eq!(merged.rules.len(), 3);
        assert_eq!(merged.rules[..2], base().rules[..]);
        assert_eq!(merged.rules[2], rule("", &["secrets"], &["get"]));
    }

    /// An overlapping (apiGroups, verbs) rule is kept as a separate rule.
    #[test]
    fn test_overlapping_rules_are_not_deduplicated() {
        let overlay = ClusterRole {
            rules: vec![rule("", &["configmaps"], &["get", "list"])],
            ..ClusterRole::default()
        };
        let merged = merge_roles(base(), overlay);

        assert_eq!(merged.rules.len(), 3);
        assert_eq!(merged.rules[0].resources, vec!["pods"]);
        assert_eq!(merged.rules[2].resources, vec!["configmaps"]);
    }

    /// Set scalars in the override win; empty ones keep the base value.
    #[test]
    fn test_scalar_override_wins_when_set() {
        let overlay = ClusterRole {
            metadata: rolegen_contracts::role::RoleMetadata {
                name: "custom".to_string(),
            },
            ..ClusterRole::default()
        };
        let merged = merge_roles(base(), overlay);

        assert_eq!(merged.metadata.name, "custom");
        assert_eq!(merged.api_version, RBAC_API_VERSION);
        assert_eq!(merged.kind, "ClusterRole");
    }

    #[test]
    fn test_empty_overlay_is_identity() {
        let merged = AppendMerger.merge(base(), ClusterRole::default()).unwrap();
        assert_eq!(merged, base());
    }

    // ── 2. restriction parsing ────────────────────────────────────────────────

    #[test]
    fn test_yaml_restrictions_build_exclusions() {
        let role = parse_restrictions(RESTRICTIONS_YAML, DocumentFormat::Yaml).unwrap();
        let exclusions = ExclusionSet::from_role(&role);

        assert_eq!(role.rules.len(), 3);
        assert_eq!(exclusions.len(), 4);
        for name in ["secrets", "pods/exec", "nodes", "pods"] {
            assert!(exclusions.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_json_restrictions() {
        let json = r#"{"rules":[{"apiGroups":[""],"resources":["secrets"],"verbs":["get"]}]}"#;
        let role = parse_restrictions(json, DocumentFormat::Json).unwrap();
        assert_eq!(role.rules, vec![rule("", &["secrets"], &["get"])]);
    }

    #[test]
    fn test_malformed_restrictions_are_config_error() {
        match parse_restrictions("rules: [ {resources: ", DocumentFormat::Yaml) {
            Err(RolegenError::ConfigFileError { reason, .. }) => {
                assert!(reason.contains("failed to parse YAML document"), "got: {reason}");
            }
            other => panic!("expected ConfigFileError, got {:?}", other),
        }
    }

    /// `resources` must be a list of strings; a scalar is rejected.
    #[test]
    fn test_wrong_shape_is_config_error() {
        let result = parse_restrictions("rules:\n  - resources: 42\n", DocumentFormat::Yaml);
        assert!(matches!(result, Err(RolegenError::ConfigFileError { .. })));
    }

    // ── 3. restriction files ──────────────────────────────────────────────────

    #[test]
    fn test_load_restrictions_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restrictions.yaml");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(RESTRICTIONS_YAML.as_bytes())
            .unwrap();

        let role = load_restrictions(&path).unwrap();
        assert_eq!(role.rules[0].resources, vec!["secrets"]);
    }

    #[test]
    fn test_load_toml_restrictions_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restrictions.toml");
        std::fs::write(
            &path,
            "[[rules]]\napiGroups = [\"\"]\nresources = [\"secrets\"]\nverbs = [\"get\"]\n",
        )
        .unwrap();

        let role = load_restrictions(&path).unwrap();
        assert_eq!(role.rules, vec![rule("", &["secrets"], &["get"])]);
    }

    #[test]
    fn test_missing_restriction_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        match load_restrictions(&path) {
            Err(RolegenError::ConfigFileError { path: reported, reason }) => {
                assert!(reported.ends_with("absent.yaml"));
                assert_eq!(reason, "file not found");
            }
            other => panic!("expected ConfigFileError, got {:?}", other),
        }
    }
}
