//! Error types for configuration store operations.
//!
//! Both base stores and decorators report failures through [`ConfigError`],
//! wrapped into the crate-level [`Error`](crate::Error).

use thiserror::Error;

use crate::tree::Path;

/// Errors that can occur during configuration store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No node exists at the requested path.
    #[error("Configuration node not found: {path}")]
    NodeNotFound {
        /// The path that was looked up
        path: Path,
    },

    /// The identifier is not present in the reference index.
    #[error("No node indexed for identifier {id}")]
    IdentifierNotFound {
        /// The identifier that was looked up
        id: String,
    },

    /// The identifier is not a UUID.
    #[error("Invalid identifier '{id}': not a UUID")]
    InvalidIdentifier {
        /// The rejected identifier
        id: String,
    },

    /// The node changed in storage since the writer read it.
    #[error("Optimistic lock conflict: claimed fingerprint {claimed}, storage has {effective}")]
    OptimisticLockConflict {
        /// Fingerprint presented by the writer
        claimed: String,
        /// Fingerprint of the node currently in storage
        effective: String,
    },

    /// The path cannot be applied to the current tree shape.
    #[error("Invalid path {path}: {reason}")]
    InvalidPath {
        /// The offending path
        path: Path,
        /// What went wrong while navigating
        reason: String,
    },

    /// File I/O error in a storage engine.
    #[error("Storage file I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Storage contents could not be (de)serialized.
    #[error("Storage serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Any other failure reported by a storage engine, such as a loaded
    /// document whose root is not a map.
    #[error("Backend failure: {reason}")]
    Backend {
        /// Description of the failure
        reason: String,
    },
}

impl ConfigError {
    /// Check if this error indicates a path or identifier was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::NodeNotFound { .. } | ConfigError::IdentifierNotFound { .. }
        )
    }

    /// Check if this error is an optimistic lock conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ConfigError::OptimisticLockConflict { .. })
    }

    /// Check if this error originated in a storage engine.
    pub fn is_backend_error(&self) -> bool {
        matches!(
            self,
            ConfigError::FileIo { .. }
                | ConfigError::SerializationFailed { .. }
                | ConfigError::Backend { .. }
        )
    }

    /// Get the path if this error is about a specific path.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::NodeNotFound { path } | ConfigError::InvalidPath { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get the `(claimed, effective)` fingerprints of a conflict.
    pub fn fingerprints(&self) -> Option<(&str, &str)> {
        match self {
            ConfigError::OptimisticLockConflict { claimed, effective } => {
                Some((claimed.as_str(), effective.as_str()))
            }
            _ => None,
        }
    }
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}
