use std::sync::{
    Barrier,
    atomic::{AtomicUsize, Ordering},
};

use confstore::{
    backend::Configuration,
    path,
    tree::ConfigNode,
};
use serde_json::json;

use super::helpers::{create_seeded, device_schema};

#[test]
fn test_concurrent_writers_with_same_fingerprint_one_wins() {
    const WRITERS: usize = 8;

    let at = path!("devices", "dev1");
    let store = create_seeded(&at, ConfigNode::from(json!({"port": 104})));
    let schema = device_schema();
    let barrier = Barrier::new(WRITERS);
    let successes = AtomicUsize::new(0);
    let conflicts = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for writer in 0..WRITERS {
            let (store, schema, at) = (&store, &schema, &at);
            let (barrier, successes, conflicts) = (&barrier, &successes, &conflicts);
            scope.spawn(move || {
                let mut node = store.get_configuration_node(at, Some(schema)).unwrap();
                barrier.wait();
                node.insert("port", ConfigNode::from(1000 + writer as i64));
                match store.persist_node(at, node, Some(schema)) {
                    Ok(()) => successes.fetch_add(1, Ordering::SeqCst),
                    Err(err) if err.is_conflict() => conflicts.fetch_add(1, Ordering::SeqCst),
                    Err(err) => panic!("Unexpected error: {err}"),
                };
            });
        }
    });

    assert_eq!(successes.load(Ordering::SeqCst), 1);
    assert_eq!(conflicts.load(Ordering::SeqCst), WRITERS - 1);

    let port = store
        .get_configuration_node(&at, None)
        .unwrap()
        .get("port")
        .and_then(ConfigNode::as_i64)
        .unwrap();
    assert!((1000..1000 + WRITERS as i64).contains(&port));
}
