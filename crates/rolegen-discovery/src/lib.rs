//! # rolegen-discovery
//!
//! [`DiscoveryProvider`](rolegen_core::traits::DiscoveryProvider)
//! implementations for rolegen.
//!
//! - [`ClusterDiscovery`] queries a live API server through `kube`, either
//!   in-cluster or via a kubeconfig file, covering every version of the core
//!   API and of every API group.
//! - [`SnapshotDiscovery`] replays a saved list of `APIResourceList`
//!   documents.

pub mod cluster;
pub mod snapshot;

pub use cluster::{ClusterConnection, ClusterDiscovery};
pub use snapshot::SnapshotDiscovery;

// ── Tests ─────────────────────────────────────────────────────────────────────
