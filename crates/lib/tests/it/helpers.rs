use std::collections::HashMap;

use confstore::{
    backend::{Configuration, InMemory},
    constants::IDENTIFIER_FIELD,
    decorator::ReferenceIndex,
    tree::{ConfigNode, Path, referable_nodes},
};
use uuid::Uuid;

/// Deterministic identifier for test node `n`
pub fn uuid(n: u128) -> String {
    Uuid::from_u128(n).to_string()
}

/// Build a device node, referable when `id` is given
pub fn device(name: &str, id: Option<&str>, port: i64) -> ConfigNode {
    let mut node = ConfigNode::map([
        ("dicomDeviceName", ConfigNode::from(name)),
        ("port", ConfigNode::from(port)),
    ]);
    if let Some(id) = id {
        node.insert(IDENTIFIER_FIELD, ConfigNode::from(id));
    }
    node
}

/// Build an InMemory store from a JSON literal
pub fn store_from_json(json: serde_json::Value) -> InMemory {
    InMemory::from_tree(ConfigNode::from(json))
}

/// Every referable node of the whole document held by `store`
pub fn expected_index(store: &impl Configuration) -> HashMap<Uuid, Path> {
    let root = store
        .get_configuration_node(&Path::root(), None)
        .expect("Root should be readable");
    referable_nodes(&root, &Path::root(), IDENTIFIER_FIELD).collect()
}

/// Assert the index maps exactly the referable nodes currently stored
pub fn assert_index_complete(index: &ReferenceIndex, store: &impl Configuration) {
    assert_eq!(index.snapshot(), expected_index(store));
}
