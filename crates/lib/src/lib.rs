//!
//! Confstore: a hierarchical configuration store with stackable decorators.
//! This library provides the tree model, the store contract and the
//! decorators that add cross-cutting behavior to any storage engine.
//!
//! ## Core Concepts
//!
//! * **Trees (`tree::ConfigNode`)**: A configuration document is a tree of maps, sequences and scalars.
//! * **Paths (`tree::Path`)**: Steps from the root to a node, with a canonical escaped string form.
//! * **Stores (`backend::Configuration`)**: The contract every store exposes: read, persist, remove, refresh and existence checks on whole subtrees.
//! * **Decorators (`decorator`)**: Stores that wrap another store and add one concern each:
//!     * **Reference indexing (`decorator::ReferenceIndexingConfiguration`)**: Finds UUID-tagged nodes wherever they currently live.
//!     * **Optimistic locking (`decorator::OptimisticLockingConfiguration`)**: Rejects writes based on a stale read.
//!     * **Caching (`decorator::CachingConfiguration`)**: Memoizes subtree reads until refreshed.
//! * **Settings (`settings::StoreSettings`)**: Reserved field names shared by every process using a backend.

pub mod backend;
pub mod constants;
pub mod decorator;
pub mod settings;
pub mod tree;

/// Result type used throughout the Confstore library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Confstore library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Malformed path strings
    #[error(transparent)]
    Path(#[from] tree::PathError),

    /// Structured store errors from the backend module
    #[error(transparent)]
    Config(backend::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Path(_) => "tree",
            Error::Config(_) => "backend",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a node or identifier was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Config(config_err) => config_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is an optimistic lock conflict.
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Config(config_err) => config_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error originated in a storage engine.
    pub fn is_backend_error(&self) -> bool {
        match self {
            Error::Config(config_err) => config_err.is_backend_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Config(backend::ConfigError::FileIo { .. })
        )
    }

    /// Check if this error is about a malformed or inapplicable path.
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            Error::Path(_) | Error::Config(backend::ConfigError::InvalidPath { .. })
        )
    }
}
