//! Fingerprint stamping and write-time validation.

use std::collections::BTreeSet;

use super::hash::fingerprint;
use crate::Result;
use crate::backend::ConfigError;
use crate::tree::ConfigNode;

/// Stamps nodes with fingerprints on read and validates them on write.
///
/// The merger performs conflict *detection* only. Callers fold their own
/// edits into the node they persist; a successful [`merge`](OLockMerger::merge)
/// returns that node unchanged apart from the fingerprint fields it removes.
#[derive(Debug, Clone)]
pub struct OLockMerger {
    fingerprint_field: String,
    ignored_fields: BTreeSet<String>,
}

impl OLockMerger {
    /// Creates a merger. The fingerprint field is always ignored when hashing.
    pub fn new(fingerprint_field: impl Into<String>, ignored_fields: impl IntoIterator<Item = String>) -> Self {
        let fingerprint_field = fingerprint_field.into();
        let mut ignored_fields: BTreeSet<String> = ignored_fields.into_iter().collect();
        ignored_fields.insert(fingerprint_field.clone());
        Self {
            fingerprint_field,
            ignored_fields,
        }
    }

    pub fn fingerprint_field(&self) -> &str {
        &self.fingerprint_field
    }

    pub fn ignored_fields(&self) -> &BTreeSet<String> {
        &self.ignored_fields
    }

    /// Computes the fingerprint of `node` under this merger's ignored fields.
    pub fn fingerprint(&self, node: &ConfigNode) -> String {
        fingerprint(node, &self.ignored_fields)
    }

    /// Sets the fingerprint field on a map node, replacing any previous value.
    ///
    /// Returns the fingerprint, or `None` if `node` is not a map.
    pub fn stamp(&self, node: &mut ConfigNode) -> Option<String> {
        let hash = self.fingerprint(node);
        let map = node.as_map_mut()?;
        map.insert(self.fingerprint_field.clone(), ConfigNode::Text(hash.clone()));
        Some(hash)
    }

    /// The fingerprint a writer claims to have read, if any.
    ///
    /// Only text values count as claims.
    pub fn claimed(&self, node: &ConfigNode) -> Option<String> {
        node.get(&self.fingerprint_field)
            .and_then(ConfigNode::as_text)
            .map(str::to_string)
    }

    /// The fingerprint storage currently holds for `node`.
    ///
    /// A stored stamp wins; otherwise the fingerprint is computed on the spot.
    pub fn effective(&self, in_storage: &ConfigNode) -> String {
        match in_storage.get(&self.fingerprint_field).and_then(ConfigNode::as_text) {
            Some(stored) => stored.to_string(),
            None => self.fingerprint(in_storage),
        }
    }

    /// Validates `being_persisted` against `in_storage`.
    ///
    /// If `being_persisted` carries a fingerprint claim that differs from the
    /// effective fingerprint of `in_storage`, fails with
    /// [`ConfigError::OptimisticLockConflict`] and touches nothing. Otherwise
    /// returns a copy of `being_persisted` with every fingerprint field
    /// removed, ready to be written. `in_storage` is never modified.
    pub fn merge(&self, being_persisted: &ConfigNode, in_storage: &ConfigNode) -> Result<ConfigNode> {
        if let Some(claimed) = self.claimed(being_persisted) {
            let effective = self.effective(in_storage);
            if claimed != effective {
                return Err(ConfigError::OptimisticLockConflict { claimed, effective }.into());
            }
        }
        Ok(self.stripped(being_persisted))
    }

    /// Returns a copy of `node` without fingerprint fields at any depth.
    pub fn stripped(&self, node: &ConfigNode) -> ConfigNode {
        let mut copy = node.clone();
        self.strip(&mut copy);
        copy
    }

    fn strip(&self, node: &mut ConfigNode) {
        match node {
            ConfigNode::Map(map) => {
                map.remove(&self.fingerprint_field);
                map.values_mut().for_each(|child| self.strip(child));
            }
            ConfigNode::Sequence(items) => items.iter_mut().for_each(|child| self.strip(child)),
            _ => {}
        }
    }
}
