use confstore::{
    backend::{Configuration, InMemory, NodeSchema},
    constants::FINGERPRINT_FIELD,
    decorator::{OLockMerger, OptimisticLockingConfiguration},
    settings::StoreSettings,
    tree::{ConfigNode, Path},
};

/// Locking decorator over `inner` with default settings
pub fn create_locked<C: Configuration>(inner: C) -> OptimisticLockingConfiguration<C> {
    OptimisticLockingConfiguration::new(inner, &StoreSettings::default())
}

/// Locking decorator over an InMemory store seeded with `node` at `path`
pub fn create_seeded(path: &Path, node: ConfigNode) -> OptimisticLockingConfiguration<InMemory> {
    let store = create_locked(InMemory::new());
    store.persist_node(path, node, None).unwrap();
    store
}

/// Merger configured with default settings
pub fn default_merger() -> OLockMerger {
    let settings = StoreSettings::default();
    OLockMerger::new(settings.fingerprint_field.clone(), settings.ignored_fields())
}

pub fn device_schema() -> NodeSchema {
    NodeSchema::locked("Device")
}

/// The fingerprint stamped on `node`, if any
pub fn stamp_of(node: &ConfigNode) -> Option<&str> {
    node.get(FINGERPRINT_FIELD).and_then(ConfigNode::as_text)
}
