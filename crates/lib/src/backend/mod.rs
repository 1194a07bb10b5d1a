//! The configuration store contract and its base implementations.
//!
//! [`Configuration`] is the interface every store exposes: base storage
//! engines implement it directly, and the decorators in
//! [`crate::decorator`] implement it by wrapping another `Configuration`.
//! Callers only ever see this trait, whatever the stack beneath them.

use std::sync::Arc;

use crate::Result;
use crate::tree::{ConfigNode, Path};

pub mod errors;
pub mod in_memory;

pub use errors::ConfigError;
pub use in_memory::InMemory;

/// Schema reference for the node addressed by an operation.
///
/// The store core only needs to know whether a node type takes part in
/// optimistic locking; everything else about a type lives in the mapping
/// layer that produced the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NodeSchema {
    /// Name of the node type, used for logging
    pub type_name: String,
    /// Whether reads of this type are stamped with a fingerprint
    #[serde(default)]
    pub optimistic_locking: bool,
}

impl NodeSchema {
    /// Schema for a type that does not take part in optimistic locking.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            optimistic_locking: false,
        }
    }

    /// Schema for a type whose reads are fingerprinted.
    pub fn locked(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            optimistic_locking: true,
        }
    }
}

/// Hierarchical configuration store.
///
/// Nodes are whole subtrees addressed by [`Path`]. `persist_node` replaces the
/// entire subtree at its path; it is not a field-level patch.
///
/// All implementations must be `Send` and `Sync` so a single stack can be
/// shared between threads. Operations block the calling thread until the
/// storage engine responds.
pub trait Configuration: Send + Sync {
    /// Reads the subtree at `path`.
    ///
    /// # Returns
    /// The node, or [`ConfigError::NodeNotFound`] if nothing exists there.
    fn get_configuration_node(&self, path: &Path, schema: Option<&NodeSchema>) -> Result<ConfigNode>;

    /// Replaces the subtree at `path` with `node`.
    fn persist_node(&self, path: &Path, node: ConfigNode, schema: Option<&NodeSchema>) -> Result<()>;

    /// Deletes the subtree at `path`.
    ///
    /// # Returns
    /// [`ConfigError::NodeNotFound`] if nothing exists there.
    fn remove_node(&self, path: &Path) -> Result<()>;

    /// Drops any cached state for `path` held at or beneath this store.
    fn refresh_node(&self, path: &Path) -> Result<()>;

    /// Returns whether a node exists at `path`.
    fn node_exists(&self, path: &Path) -> Result<bool>;
}

impl<C: Configuration + ?Sized> Configuration for Arc<C> {
    fn get_configuration_node(&self, path: &Path, schema: Option<&NodeSchema>) -> Result<ConfigNode> {
        (**self).get_configuration_node(path, schema)
    }

    fn persist_node(&self, path: &Path, node: ConfigNode, schema: Option<&NodeSchema>) -> Result<()> {
        (**self).persist_node(path, node, schema)
    }

    fn remove_node(&self, path: &Path) -> Result<()> {
        (**self).remove_node(path)
    }

    fn refresh_node(&self, path: &Path) -> Result<()> {
        (**self).refresh_node(path)
    }

    fn node_exists(&self, path: &Path) -> Result<bool> {
        (**self).node_exists(path)
    }
}

impl<C: Configuration + ?Sized> Configuration for Box<C> {
    fn get_configuration_node(&self, path: &Path, schema: Option<&NodeSchema>) -> Result<ConfigNode> {
        (**self).get_configuration_node(path, schema)
    }

    fn persist_node(&self, path: &Path, node: ConfigNode, schema: Option<&NodeSchema>) -> Result<()> {
        (**self).persist_node(path, node, schema)
    }

    fn remove_node(&self, path: &Path) -> Result<()> {
        (**self).remove_node(path)
    }

    fn refresh_node(&self, path: &Path) -> Result<()> {
        (**self).refresh_node(path)
    }

    fn node_exists(&self, path: &Path) -> Result<bool> {
        (**self).node_exists(path)
    }
}
