//! # rolegen-contracts
//!
//! Shared types, document formats, and errors for the rolegen ClusterRole
//! generator.
//!
//! All crates in the workspace import from here. No pipeline logic lives in
//! this crate, only data definitions and their (de)serialization.

pub mod discovery;
pub mod document;
pub mod entry;
pub mod error;
pub mod exclusion;
pub mod role;
