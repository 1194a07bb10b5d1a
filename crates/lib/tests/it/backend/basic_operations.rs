use confstore::{
    backend::{Configuration, ConfigError, InMemory},
    path,
    tree::{ConfigNode, Path},
};
use serde_json::json;

use super::helpers::create_device_store;

#[test]
fn test_get_missing_node_is_not_found() {
    let store = create_device_store();
    let missing = path!("dicomConfigurationRoot", "dicomDevicesRoot", "dev9");
    let err = store.get_configuration_node(&missing, None).unwrap_err();
    assert!(err.is_not_found());
    match err {
        confstore::Error::Config(ConfigError::NodeNotFound { path }) => assert_eq!(path, missing),
        other => panic!("Unexpected error: {other}"),
    }
}

#[test]
fn test_persist_replaces_whole_subtree() {
    let store = create_device_store();
    let dev1 = path!("dicomConfigurationRoot", "dicomDevicesRoot", "dev1");
    store
        .persist_node(&dev1, ConfigNode::from(json!({"port": 11112})), None)
        .unwrap();

    let node = store.get_configuration_node(&dev1, None).unwrap();
    assert_eq!(node, ConfigNode::from(json!({"port": 11112})));
    assert!(!store.node_exists(&dev1.child("connections")).unwrap());
}

#[test]
fn test_persist_creates_missing_parents() {
    let store = InMemory::new();
    let deep = path!("a", "b", "c");
    store.persist_node(&deep, ConfigNode::from("leaf"), None).unwrap();
    assert!(store.node_exists(&path!("a", "b")).unwrap());
    assert_eq!(
        store.get_configuration_node(&deep, None).unwrap(),
        ConfigNode::from("leaf")
    );
}

#[test]
fn test_persist_under_scalar_is_invalid_path() {
    let store = create_device_store();
    let bad = path!("dicomConfigurationRoot", "dicomDevicesRoot", "dev2", "port", "x");
    let err = store.persist_node(&bad, ConfigNode::Null, None).unwrap_err();
    assert!(err.is_path_error());
    assert!(!err.is_not_found());
}

#[test]
fn test_remove_then_exists() {
    let store = create_device_store();
    let dev2 = path!("dicomConfigurationRoot", "dicomDevicesRoot", "dev2");
    assert!(store.node_exists(&dev2).unwrap());
    store.remove_node(&dev2).unwrap();
    assert!(!store.node_exists(&dev2).unwrap());
    assert!(store.remove_node(&dev2).unwrap_err().is_not_found());
}

#[test]
fn test_root_always_exists() {
    let store = InMemory::new();
    assert!(store.node_exists(&Path::root()).unwrap());
    assert_eq!(
        store.get_configuration_node(&Path::root(), None).unwrap(),
        ConfigNode::empty_map()
    );
    store.refresh_node(&Path::root()).unwrap();
}

#[test]
fn test_reads_are_detached_copies() {
    let store = create_device_store();
    let dev1 = path!("dicomConfigurationRoot", "dicomDevicesRoot", "dev1");
    let mut node = store.get_configuration_node(&dev1, None).unwrap();
    node.insert("port", ConfigNode::from(1i64));
    let stored = store.get_configuration_node(&dev1, None).unwrap();
    assert_eq!(stored.get("port").and_then(ConfigNode::as_i64), Some(104));
}
