//! # rolegen-rules
//!
//! Turns API discovery data into the rules of a least-privilege ClusterRole.
//!
//! ## Overview
//!
//! This crate provides [`DiscoveryAggregator`], which implements the
//! [`RoleSynthesizer`](rolegen_core::traits::RoleSynthesizer) trait in two
//! stages:
//!
//! 1. [`normalize`](normalize::normalize) flattens group/version listings
//!    into `(group, resource, sorted verbs)` entries, dropping restricted
//!    resources.
//! 2. [`aggregate`](aggregate::aggregate) groups entries by
//!    `(group, verb-set)` and emits one rule per group, in first-seen order.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use rolegen_rules::DiscoveryAggregator;
//! use rolegen_core::traits::RoleSynthesizer;
//!
//! let role = DiscoveryAggregator.synthesize(&groups, &exclusions, "restricted-cluster-role")?;
//! ```

pub mod aggregate;
pub mod normalize;

use tracing::debug;

use rolegen_contracts::{
    discovery::ApiResourceList, error::RolegenResult, exclusion::ExclusionSet, role::ClusterRole,
};
use rolegen_core::traits::RoleSynthesizer;

pub use aggregate::aggregate;
pub use normalize::normalize;

/// The discovery-driven `RoleSynthesizer`: normalize, then aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveryAggregator;

impl RoleSynthesizer for DiscoveryAggregator {
    fn synthesize(
        &self,
        groups: &[ApiResourceList],
        exclusions: &ExclusionSet,
        role_name: &str,
    ) -> RolegenResult<ClusterRole> {
        let entries = normalize(groups, exclusions);
        debug!(entries = entries.len(), "discovery normalized");

        let rules = aggregate(&entries)?;
        Ok(ClusterRole::new(role_name, rules))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
