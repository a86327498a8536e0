//! # rolegen-output
//!
//! Sinks for rendered ClusterRole documents.
//!
//! ## Overview
//!
//! - [`FileRoleSink`] writes `role_base.yaml` / `role_merged.yaml`
//!   atomically (temporary file plus rename), so an aborted run never leaves
//!   a truncated document.
//! - [`InMemoryRoleSink`] keeps documents in memory for dry runs and tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rolegen_output::FileRoleSink;
//! use rolegen_core::traits::{RoleDocument, RoleSink};
//!
//! let sink = FileRoleSink::default();
//! sink.write(RoleDocument::Base, &yaml)?;
//! ```

pub mod file;
pub mod memory;

pub use file::{write_atomic, FileRoleSink};
pub use memory::InMemoryRoleSink;

// ── Tests ─────────────────────────────────────────────────────────────────────
