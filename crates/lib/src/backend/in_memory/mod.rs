//! In-memory configuration store
//!
//! This module provides an in-memory implementation of the [`Configuration`]
//! trait, suitable for testing, development, and small deployments that
//! persist the whole document to a JSON file.

mod persistence;

use std::path::Path as FsPath;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::Result;
use crate::backend::{Configuration, ConfigError, NodeSchema};
use crate::tree::{ConfigNode, Path};

/// A single configuration document held in memory.
///
/// Every operation takes the document lock for its own duration, so each
/// call is atomic with respect to other calls on the same store. The store
/// keeps no caches; `refresh_node` is a no-op.
///
/// The root node always exists. Removing the root resets the document to an
/// empty map.
#[derive(Debug)]
pub struct InMemory {
    pub(crate) root: RwLock<ConfigNode>,
}

impl InMemory {
    /// Creates a store holding an empty map document.
    pub fn new() -> Self {
        Self::from_tree(ConfigNode::empty_map())
    }

    /// Creates a store holding `root` as its document.
    pub fn from_tree(root: ConfigNode) -> Self {
        Self {
            root: RwLock::new(root),
        }
    }

    /// Returns a copy of the whole document.
    pub fn snapshot(&self) -> ConfigNode {
        self.read_root().clone()
    }

    /// Saves the whole document to a specified file as JSON.
    ///
    /// # Arguments
    /// * `path` - The path to the file where the document should be saved.
    pub fn save_to_file<P: AsRef<FsPath>>(&self, path: P) -> Result<()> {
        persistence::save_to_file(self, path)
    }

    /// Loads a document from a specified JSON file.
    ///
    /// If the file does not exist, a new, empty `InMemory` store is returned.
    pub fn load_from_file<P: AsRef<FsPath>>(path: P) -> Result<Self> {
        persistence::load_from_file(path)
    }

    fn read_root(&self) -> RwLockReadGuard<'_, ConfigNode> {
        self.root.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_root(&self) -> RwLockWriteGuard<'_, ConfigNode> {
        self.root.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration for InMemory {
    fn get_configuration_node(&self, path: &Path, _schema: Option<&NodeSchema>) -> Result<ConfigNode> {
        self.read_root()
            .get_path(path)
            .cloned()
            .ok_or_else(|| ConfigError::NodeNotFound { path: path.clone() }.into())
    }

    fn persist_node(&self, path: &Path, node: ConfigNode, _schema: Option<&NodeSchema>) -> Result<()> {
        self.write_root().set_path(path, node)?;
        Ok(())
    }

    fn remove_node(&self, path: &Path) -> Result<()> {
        let mut root = self.write_root();
        if path.is_root() {
            *root = ConfigNode::empty_map();
            return Ok(());
        }
        match root.remove_path(path) {
            Some(_) => Ok(()),
            None => Err(ConfigError::NodeNotFound { path: path.clone() }.into()),
        }
    }

    fn refresh_node(&self, path: &Path) -> Result<()> {
        tracing::trace!(path = %path, "InMemory holds no caches, nothing to refresh");
        Ok(())
    }

    fn node_exists(&self, path: &Path) -> Result<bool> {
        Ok(self.read_root().get_path(path).is_some())
    }
}
