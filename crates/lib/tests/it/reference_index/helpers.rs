use std::sync::Arc;

use confstore::{
    backend::{Configuration, InMemory},
    decorator::{ReferenceIndex, ReferenceIndexingConfiguration},
    settings::StoreSettings,
    tree::Path,
};

/// Wrap `inner` in an indexing decorator with a fresh index, already built
pub fn create_indexed<C: Configuration>(
    inner: C,
) -> (Arc<ReferenceIndex>, ReferenceIndexingConfiguration<C>) {
    let index = Arc::new(ReferenceIndex::new());
    let store = ReferenceIndexingConfiguration::new(inner, Arc::clone(&index), &StoreSettings::default());
    store.rebuild_index().unwrap();
    (index, store)
}

/// Indexing decorator over an empty InMemory store
pub fn create_empty_indexed() -> (Arc<ReferenceIndex>, ReferenceIndexingConfiguration<InMemory>) {
    create_indexed(InMemory::new())
}

/// Look up `id`, mapping "not indexed" to `None`
pub fn lookup<C: Configuration>(store: &ReferenceIndexingConfiguration<C>, id: &str) -> Option<Path> {
    match store.get_path_by_identifier(id) {
        Ok(path) => Some(path),
        Err(err) if err.is_not_found() => None,
        Err(err) => panic!("Unexpected lookup error for {id}: {err}"),
    }
}
