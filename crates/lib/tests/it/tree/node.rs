use confstore::{
    path,
    tree::{ConfigNode, Path},
};
use serde_json::json;

fn sample() -> ConfigNode {
    ConfigNode::from(json!({
        "devices": {
            "dev1": {
                "port": 104,
                "connections": [
                    {"hostname": "host-a"},
                    {"hostname": "host-b"}
                ]
            }
        }
    }))
}

#[test]
fn test_get_path_through_sequences() {
    let tree = sample();
    let host = tree
        .get_path(&path!("devices", "dev1", "connections", 1usize, "hostname"))
        .and_then(ConfigNode::as_text);
    assert_eq!(host, Some("host-b"));
    assert!(tree.get_path(&path!("devices", "dev1", "connections", 2usize)).is_none());
    assert!(tree.get_path(&path!("devices", "dev1", "port", "deeper")).is_none());
    assert_eq!(tree.get_path(&Path::root()), Some(&tree));
}

#[test]
fn test_set_path_creates_intermediate_maps() {
    let mut tree = ConfigNode::empty_map();
    tree.set_path(&path!("a", "b", "c"), ConfigNode::from(true)).unwrap();
    assert_eq!(tree, ConfigNode::from(json!({"a": {"b": {"c": true}}})));
}

#[test]
fn test_set_path_appends_and_replaces_in_sequence() {
    let mut tree = sample();
    let conns = path!("devices", "dev1", "connections");
    tree.set_path(&conns.child(2usize), ConfigNode::from(json!({"hostname": "host-c"})))
        .unwrap();
    tree.set_path(&conns.child(0usize), ConfigNode::from(json!({"hostname": "host-z"})))
        .unwrap();

    let hosts: Vec<_> = tree
        .get_path(&conns)
        .and_then(ConfigNode::as_sequence)
        .unwrap()
        .iter()
        .filter_map(|c| c.get("hostname").and_then(ConfigNode::as_text))
        .collect();
    assert_eq!(hosts, vec!["host-z", "host-b", "host-c"]);

    let err = tree
        .set_path(&conns.child(9usize), ConfigNode::Null)
        .unwrap_err();
    assert_eq!(err.path(), Some(&conns.child(9usize)));
}

#[test]
fn test_set_path_through_scalar_fails() {
    let mut tree = sample();
    let err = tree
        .set_path(&path!("devices", "dev1", "port", "x"), ConfigNode::Null)
        .unwrap_err();
    assert!(err.to_string().contains("cannot step into number"));
    // Nothing was modified
    assert_eq!(tree, sample());
}

#[test]
fn test_failed_set_path_creates_nothing() {
    let mut tree = sample();
    let err = tree
        .set_path(&path!("fresh", "branch", 0usize), ConfigNode::from("x"))
        .unwrap_err();
    assert!(err.to_string().contains("cannot step into map"));
    assert!(tree.get("fresh").is_none());
}

#[test]
fn test_null_is_promoted_by_key_steps() {
    let mut tree = ConfigNode::from(json!({"slot": null}));
    tree.set_path(&path!("slot", "port"), ConfigNode::from(104i64)).unwrap();
    assert_eq!(tree, ConfigNode::from(json!({"slot": {"port": 104}})));
}
