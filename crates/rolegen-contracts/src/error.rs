//! Error types for the rolegen pipeline.
//!
//! Every fallible operation returns `RolegenResult<T>`. rolegen is a one-shot
//! generator: no variant is retried or recovered, the binary reports it and
//! exits non-zero.

use thiserror::Error;

/// The unified error type for the rolegen workspace.
#[derive(Debug, Error)]
pub enum RolegenError {
    /// The cluster could not be reached or the client could not authenticate.
    #[error("cluster connection failed: {reason}")]
    ConnectionError { reason: String },

    /// The API server's resource listing failed.
    #[error("server resource discovery failed: {reason}")]
    DiscoveryError { reason: String },

    /// A restriction or snapshot file is missing, unreadable, or malformed.
    #[error("configuration file error in '{path}': {reason}")]
    ConfigFileError { path: String, reason: String },

    /// A ClusterRole could not be converted to or from its document form.
    #[error("serialization error: {reason}")]
    SerializationError { reason: String },

    /// An aggregation key did not decode into exactly a group and a verb list.
    ///
    /// Means a group or resource name contained the reserved key delimiter.
    #[error("internal invariant violated: {reason}")]
    InvariantError { reason: String },

    /// An output document could not be written.
    #[error("failed to write '{path}': {reason}")]
    OutputError { path: String, reason: String },
}

/// Convenience alias used throughout the rolegen crates.
pub type RolegenResult<T> = Result<T, RolegenError>;
