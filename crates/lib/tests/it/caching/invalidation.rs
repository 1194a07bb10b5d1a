use std::sync::Arc;

use confstore::{
    backend::{Configuration, InMemory},
    decorator::CachingConfiguration,
    path,
    tree::{ConfigNode, Path},
};
use serde_json::json;

fn create_cached() -> (Arc<InMemory>, CachingConfiguration<Arc<InMemory>>) {
    let base = Arc::new(InMemory::from_tree(ConfigNode::from(json!({
        "devices": {"list": [{"n": 0}, {"n": 1}, {"n": 2}]}
    }))));
    let cached = CachingConfiguration::new(Arc::clone(&base));
    (base, cached)
}

#[test]
fn test_removing_sequence_element_invalidates_siblings() {
    let (_base, cached) = create_cached();
    let list = path!("devices", "list");
    let second = list.child(1usize);
    assert_eq!(
        cached.get_configuration_node(&second, None).unwrap(),
        ConfigNode::from(json!({"n": 1}))
    );

    cached.remove_node(&list.child(0usize)).unwrap();
    assert!(!cached.is_cached(&second));
    assert_eq!(
        cached.get_configuration_node(&second, None).unwrap(),
        ConfigNode::from(json!({"n": 2}))
    );
}

#[test]
fn test_refresh_root_drops_everything() {
    let (_base, cached) = create_cached();
    cached.get_configuration_node(&path!("devices"), None).unwrap();
    cached.get_configuration_node(&path!("devices", "list", 0usize), None).unwrap();
    assert_eq!(cached.cached_len(), 2);

    cached.refresh_node(&Path::root()).unwrap();
    assert_eq!(cached.cached_len(), 0);
}

#[test]
fn test_node_exists_served_from_cache() {
    let (base, cached) = create_cached();
    let at = path!("devices", "list", 2usize);
    cached.get_configuration_node(&at, None).unwrap();
    base.remove_node(&at).unwrap();

    assert!(cached.node_exists(&at).unwrap());
    cached.refresh_node(&at).unwrap();
    assert!(!cached.node_exists(&at).unwrap());
}

#[test]
fn test_failed_remove_still_invalidates() {
    let (base, cached) = create_cached();
    let at = path!("devices", "list", 0usize);
    cached.get_configuration_node(&at, None).unwrap();
    base.remove_node(&path!("devices")).unwrap();

    assert!(cached.remove_node(&at).unwrap_err().is_not_found());
    assert!(!cached.is_cached(&at));
}
