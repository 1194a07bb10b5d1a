//! Optimistic locking decorator.
//!
//! Reads of lock-participating node types are stamped with a fingerprint of
//! the node's content. When the node is written back, the fingerprint the
//! writer carries is checked against what storage holds now; a mismatch means
//! someone else wrote in between and the write is rejected with
//! [`ConfigError::OptimisticLockConflict`].
//!
//! Conflicts are never retried or reconciled here. The caller re-reads,
//! reapplies its change and resubmits.
//!
//! ```
//! use confstore::backend::{Configuration, InMemory, NodeSchema};
//! use confstore::decorator::OptimisticLockingConfiguration;
//! use confstore::settings::StoreSettings;
//! use confstore::tree::ConfigNode;
//! use confstore::path;
//!
//! let store = OptimisticLockingConfiguration::new(InMemory::new(), &StoreSettings::default());
//! let schema = NodeSchema::locked("Device");
//! let at = path!("devices", "dev1");
//! store.persist_node(&at, ConfigNode::map([("port", ConfigNode::from(104i64))]), None)?;
//!
//! let mut mine = store.get_configuration_node(&at, Some(&schema))?;
//! let mut theirs = store.get_configuration_node(&at, Some(&schema))?;
//!
//! theirs.insert("port", ConfigNode::from(11112i64));
//! store.persist_node(&at, theirs, Some(&schema))?;
//!
//! mine.insert("port", ConfigNode::from(2762i64));
//! let err = store.persist_node(&at, mine, Some(&schema)).unwrap_err();
//! assert!(err.is_conflict());
//! # Ok::<(), confstore::Error>(())
//! ```

mod hash;
mod merger;

use std::sync::{Mutex, PoisonError};

pub use hash::{canonical_bytes, fingerprint};
pub use merger::OLockMerger;

use crate::Result;
use crate::backend::{ConfigError, Configuration, NodeSchema};
use crate::settings::StoreSettings;
use crate::tree::{ConfigNode, Path};

/// Decorator adding optimistic locking to an inner store.
pub struct OptimisticLockingConfiguration<C> {
    inner: C,
    merger: OLockMerger,
    /// Serializes validate-then-write so two holders of the same fingerprint
    /// cannot both pass validation.
    write_guard: Mutex<()>,
}

impl<C: Configuration> OptimisticLockingConfiguration<C> {
    /// Wraps `inner`, taking field names from `settings`.
    pub fn new(inner: C, settings: &StoreSettings) -> Self {
        Self::with_merger(
            inner,
            OLockMerger::new(settings.fingerprint_field.clone(), settings.ignored_fields()),
        )
    }

    /// Wraps `inner` with an explicitly configured merger.
    pub fn with_merger(inner: C, merger: OLockMerger) -> Self {
        Self {
            inner,
            merger,
            write_guard: Mutex::new(()),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn merger(&self) -> &OLockMerger {
        &self.merger
    }

    /// Validates `being_persisted` against `in_storage`. See [`OLockMerger::merge`].
    pub fn merge(&self, being_persisted: &ConfigNode, in_storage: &ConfigNode) -> Result<ConfigNode> {
        self.merger.merge(being_persisted, in_storage)
    }

    fn stored_for_claim(&self, path: &Path, claimed: &str) -> Result<ConfigNode> {
        match self.inner.get_configuration_node(path, None) {
            Err(err) if err.is_not_found() => {
                tracing::warn!(
                    path = %path,
                    claimed,
                    "Fingerprinted write to a node that no longer exists"
                );
                Err(err)
            }
            other => other,
        }
    }
}

fn participates(schema: Option<&NodeSchema>) -> bool {
    schema.is_some_and(|schema| schema.optimistic_locking)
}

impl<C: Configuration> Configuration for OptimisticLockingConfiguration<C> {
    fn get_configuration_node(&self, path: &Path, schema: Option<&NodeSchema>) -> Result<ConfigNode> {
        let mut node = self.inner.get_configuration_node(path, schema)?;
        if !participates(schema) {
            return Ok(node);
        }
        if self.merger.stamp(&mut node).is_none() {
            tracing::debug!(
                path = %path,
                node_type = node.type_name(),
                "Lock-participating schema on a non-map node, not stamped"
            );
        }
        Ok(node)
    }

    fn persist_node(&self, path: &Path, node: ConfigNode, schema: Option<&NodeSchema>) -> Result<()> {
        let _guard = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);

        let to_write = match self.merger.claimed(&node) {
            Some(claimed) => {
                let stored = self.stored_for_claim(path, &claimed)?;
                match self.merger.merge(&node, &stored) {
                    Ok(merged) => merged,
                    Err(err) => {
                        if let crate::Error::Config(ConfigError::OptimisticLockConflict {
                            claimed,
                            effective,
                        }) = &err
                        {
                            tracing::warn!(
                                path = %path,
                                claimed = %claimed,
                                effective = %effective,
                                "Rejecting write: node changed since it was read"
                            );
                        }
                        return Err(err);
                    }
                }
            }
            None => self.merger.stripped(&node),
        };

        self.inner.persist_node(path, to_write, schema)
    }

    fn remove_node(&self, path: &Path) -> Result<()> {
        let _guard = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);
        self.inner.remove_node(path)
    }

    fn refresh_node(&self, path: &Path) -> Result<()> {
        self.inner.refresh_node(path)
    }

    fn node_exists(&self, path: &Path) -> Result<bool> {
        self.inner.node_exists(path)
    }
}
