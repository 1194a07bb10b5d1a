//! Reference indexing decorator.
//!
//! Referable nodes carry a UUID under the identifier field and can be found by
//! that UUID wherever they currently live. [`ReferenceIndex`] maps each UUID to
//! the [`Path`] of its node; [`ReferenceIndexingConfiguration`] keeps that map
//! correct by reconciling the affected subtree on every persist, remove and
//! refresh.
//!
//! Reconciling a subtree at `p` means: every referable node found under `p`
//! is (re)indexed at its current path, and every index entry under `p` that
//! the fresh scan did not reproduce at the same path is dropped. Subtrees are
//! replaced wholesale, so merely adding new identifiers would leave stale
//! entries behind.
//!
//! The index is a pure cache of the stored tree. Clearing it and calling
//! [`rebuild_index`](ReferenceIndexingConfiguration::rebuild_index)
//! reconstructs it exactly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::Result;
use crate::backend::{ConfigError, Configuration, NodeSchema};
use crate::settings::StoreSettings;
use crate::tree::{ConfigNode, Path, Step, referable_nodes};

/// Shared map from identifier to current location.
///
/// Owned by the caller and injected into one or more decorators. Decorators
/// only ever mutate entries; they never replace the index. The index also
/// carries the lock that makes delegate-then-reconcile one critical section,
/// so decorators sharing an index serialize against each other.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    entries: RwLock<HashMap<Uuid, Path>>,
    reconcile_lock: Mutex<()>,
}

/// Counts from one reconciliation, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Identifiers found and (re)indexed
    pub indexed: usize,
    /// Stale entries dropped
    pub purged: usize,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the current path of `id`.
    pub fn get(&self, id: &Uuid) -> Option<Path> {
        self.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns a copy of every entry.
    pub fn snapshot(&self) -> HashMap<Uuid, Path> {
        self.read().clone()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Makes the entries under `prefix` match `found` exactly.
    ///
    /// `found` must hold every referable node currently stored under `prefix`.
    pub fn reconcile(&self, prefix: &Path, found: &HashMap<Uuid, Path>) -> ReconcileStats {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|id, path| !prefix.is_prefix_of(path) || found.get(id) == Some(&*path));
        let purged = before - entries.len();

        for (id, path) in found {
            match entries.insert(*id, path.clone()) {
                Some(previous) if previous != *path => {
                    tracing::trace!(id = %id, from = %previous, to = %path, "Identifier moved");
                }
                Some(_) => {}
                None => tracing::trace!(id = %id, at = %path, "Identifier indexed"),
            }
        }

        ReconcileStats {
            indexed: found.len(),
            purged,
        }
    }

    /// Drops every entry located under `prefix`.
    pub fn purge_prefix(&self, prefix: &Path) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, path| !prefix.is_prefix_of(path));
        before - entries.len()
    }

    fn lock_reconcile(&self) -> MutexGuard<'_, ()> {
        self.reconcile_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, Path>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, Path>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Decorator maintaining a [`ReferenceIndex`] over an inner store.
///
/// Every mutating call delegates and then updates the index inside one
/// critical section guarded by the index's lock, so overlapping
/// reconciliations cannot undo each other.
pub struct ReferenceIndexingConfiguration<C> {
    inner: C,
    index: Arc<ReferenceIndex>,
    identifier_field: String,
}

impl<C: Configuration> ReferenceIndexingConfiguration<C> {
    /// Wraps `inner`, indexing into `index` under the identifier field of `settings`.
    pub fn new(inner: C, index: Arc<ReferenceIndex>, settings: &StoreSettings) -> Self {
        Self::with_identifier_field(inner, index, settings.identifier_field.clone())
    }

    pub fn with_identifier_field(
        inner: C,
        index: Arc<ReferenceIndex>,
        identifier_field: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            index,
            identifier_field: identifier_field.into(),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn index(&self) -> &Arc<ReferenceIndex> {
        &self.index
    }

    /// Looks up where the node with identifier `id` currently lives.
    ///
    /// Pure index lookup; the inner store is not consulted.
    pub fn get_path_by_identifier(&self, id: &str) -> Result<Path> {
        let uuid = Uuid::parse_str(id).map_err(|_| ConfigError::InvalidIdentifier { id: id.to_string() })?;
        self.index
            .get(&uuid)
            .ok_or_else(|| ConfigError::IdentifierNotFound { id: id.to_string() }.into())
    }

    /// Re-scans the whole stored tree and reconciles the index against it.
    pub fn rebuild_index(&self) -> Result<()> {
        self.refresh_node(&Path::root())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.index.lock_reconcile()
    }

    /// The map holding `path` as its identifier field, if `path` is one.
    fn identified_by(&self, path: &Path) -> Option<Path> {
        match path.last() {
            Some(Step::Key(key)) if *key == self.identifier_field => path.parent(),
            _ => None,
        }
    }

    fn scan(&self, node: &ConfigNode, base: &Path) -> HashMap<Uuid, Path> {
        referable_nodes(node, base, &self.identifier_field).collect()
    }

    /// Re-reads `path` from the inner store and reconciles the index there.
    fn reconcile_from_storage(&self, path: &Path) -> Result<()> {
        match self.inner.get_configuration_node(path, None) {
            Ok(node) => {
                let found = self.scan(&node, path);
                let stats = self.index.reconcile(path, &found);
                tracing::debug!(
                    path = %path,
                    indexed = stats.indexed,
                    purged = stats.purged,
                    "Reconciled reference index"
                );
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                let purged = self.index.purge_prefix(path);
                tracing::debug!(path = %path, purged, "Subtree vanished, purged reference index");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

impl<C: Configuration> Configuration for ReferenceIndexingConfiguration<C> {
    fn get_configuration_node(&self, path: &Path, schema: Option<&NodeSchema>) -> Result<ConfigNode> {
        self.inner.get_configuration_node(path, schema)
    }

    fn persist_node(&self, path: &Path, node: ConfigNode, schema: Option<&NodeSchema>) -> Result<()> {
        let _guard = self.lock();
        let found = self.scan(&node, path);

        self.inner.persist_node(path, node, schema)?;

        let stats = self.index.reconcile(path, &found);
        tracing::debug!(
            path = %path,
            indexed = stats.indexed,
            purged = stats.purged,
            "Reindexed persisted subtree"
        );

        // Writing the identifier field re-keys the map that holds it.
        if let Some(owner) = self.identified_by(path) {
            self.reconcile_from_storage(&owner)?;
        }
        Ok(())
    }

    fn remove_node(&self, path: &Path) -> Result<()> {
        let _guard = self.lock();
        self.inner.remove_node(path)?;

        // Entries are matched by location: a copy of the same identifier
        // persisted elsewhere keeps its entry.
        let purged = self.index.purge_prefix(path);
        tracing::debug!(path = %path, purged, "Dropped identifiers of removed subtree");

        // Later siblings in a sequence shift down by one, and a map losing
        // its identifier field stops being referable.
        let shifted = match (path.last(), path.parent()) {
            (Some(Step::Index(_)), Some(parent)) => Some(parent),
            _ => self.identified_by(path),
        };
        if let Some(parent) = shifted {
            self.reconcile_from_storage(&parent)?;
        }
        Ok(())
    }

    fn refresh_node(&self, path: &Path) -> Result<()> {
        let _guard = self.lock();
        self.inner.refresh_node(path)?;
        self.reconcile_from_storage(path)
    }

    fn node_exists(&self, path: &Path) -> Result<bool> {
        self.inner.node_exists(path)
    }
}
