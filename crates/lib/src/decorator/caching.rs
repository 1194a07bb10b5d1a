//! Read-through cache decorator.
//!
//! Memoizes subtree reads per path. Writes and removals through this decorator
//! invalidate every cached entry that overlaps the written path. Changes made
//! behind its back are only picked up after [`Configuration::refresh_node`].

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::Result;
use crate::backend::{Configuration, NodeSchema};
use crate::tree::{ConfigNode, Path};

/// Decorator caching `get_configuration_node` results of an inner store.
///
/// Reads that carry a schema bypass the cache entirely, so layers above that
/// stamp or validate nodes always see what the inner store holds.
pub struct CachingConfiguration<C> {
    inner: C,
    cache: RwLock<CacheState>,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<Path, ConfigNode>,
    /// Bumped on every invalidation. A read only populates the cache if no
    /// invalidation happened while it was fetching from the inner store.
    generation: u64,
}

impl<C: Configuration> CachingConfiguration<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cache: RwLock::new(CacheState::default()),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Number of cached subtrees.
    pub fn cached_len(&self) -> usize {
        self.read_cache().entries.len()
    }

    /// Whether a read of `path` would currently be served from the cache.
    pub fn is_cached(&self, path: &Path) -> bool {
        self.read_cache().entries.contains_key(path)
    }

    /// Drops `path`, its ancestors and its descendants from the cache.
    fn invalidate(&self, path: &Path) {
        let mut cache = self.write_cache();
        cache.generation = cache.generation.wrapping_add(1);
        let before = cache.entries.len();
        cache
            .entries
            .retain(|cached, _| !cached.is_prefix_of(path) && !path.is_prefix_of(cached));
        let dropped = before - cache.entries.len();
        if dropped > 0 {
            tracing::trace!(path = %path, dropped, "Invalidated cached subtrees");
        }
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, CacheState> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Configuration> Configuration for CachingConfiguration<C> {
    fn get_configuration_node(&self, path: &Path, schema: Option<&NodeSchema>) -> Result<ConfigNode> {
        if schema.is_some() {
            return self.inner.get_configuration_node(path, schema);
        }
        let generation = {
            let cache = self.read_cache();
            if let Some(node) = cache.entries.get(path) {
                return Ok(node.clone());
            }
            cache.generation
        };

        let node = self.inner.get_configuration_node(path, None)?;
        let mut cache = self.write_cache();
        if cache.generation == generation {
            cache.entries.insert(path.clone(), node.clone());
        } else {
            tracing::trace!(path = %path, "Read raced a write, not caching it");
        }
        Ok(node)
    }

    // Writers invalidate on both sides of the delegated call: before, so no
    // reader is served the old subtree while the write is in flight; after,
    // so a read that fetched the old subtree concurrently cannot cache it.
    fn persist_node(&self, path: &Path, node: ConfigNode, schema: Option<&NodeSchema>) -> Result<()> {
        self.invalidate(path);
        let result = self.inner.persist_node(path, node, schema);
        self.invalidate(path);
        result
    }

    fn remove_node(&self, path: &Path) -> Result<()> {
        self.invalidate(path);
        let result = self.inner.remove_node(path);
        // A removed sequence element shifts its later siblings.
        match path.parent() {
            Some(parent) if result.is_ok() => self.invalidate(&parent),
            _ => self.invalidate(path),
        }
        result
    }

    fn refresh_node(&self, path: &Path) -> Result<()> {
        self.invalidate(path);
        let result = self.inner.refresh_node(path);
        self.invalidate(path);
        result
    }

    fn node_exists(&self, path: &Path) -> Result<bool> {
        if self.is_cached(path) {
            return Ok(true);
        }
        self.inner.node_exists(path)
    }
}
