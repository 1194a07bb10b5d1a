use std::sync::Arc;

use confstore::{
    backend::InMemory,
    decorator::{
        CachingConfiguration, OptimisticLockingConfiguration, ReferenceIndex,
        ReferenceIndexingConfiguration,
    },
    settings::StoreSettings,
};

/// Locking over indexing over caching over InMemory
pub type LockOverIndex =
    OptimisticLockingConfiguration<ReferenceIndexingConfiguration<CachingConfiguration<InMemory>>>;

/// Indexing over locking over InMemory
pub type IndexOverLock = ReferenceIndexingConfiguration<OptimisticLockingConfiguration<InMemory>>;

pub fn create_lock_over_index() -> (Arc<ReferenceIndex>, LockOverIndex) {
    let settings = StoreSettings::default();
    let index = Arc::new(ReferenceIndex::new());
    let store = OptimisticLockingConfiguration::new(
        ReferenceIndexingConfiguration::new(
            CachingConfiguration::new(InMemory::new()),
            Arc::clone(&index),
            &settings,
        ),
        &settings,
    );
    (index, store)
}

pub fn create_index_over_lock() -> (Arc<ReferenceIndex>, IndexOverLock) {
    let settings = StoreSettings::default();
    let index = Arc::new(ReferenceIndex::new());
    let store = ReferenceIndexingConfiguration::new(
        OptimisticLockingConfiguration::new(InMemory::new(), &settings),
        Arc::clone(&index),
        &settings,
    );
    (index, store)
}
