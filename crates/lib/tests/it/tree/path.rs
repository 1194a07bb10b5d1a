use std::str::FromStr;

use confstore::{
    path,
    tree::{Path, Step},
};

#[test]
fn test_spec_style_paths_roundtrip() {
    let inputs = [
        "",
        "/dicomConfigurationRoot",
        "/dicomConfigurationRoot/dicomDevicesRoot/dev1",
        "/root/connections/#0/hostname",
        "/root/deviceName=a\\/b/\\#notAnIndex/#12",
        "/with\\\\backslash",
    ];
    for input in inputs {
        let path = Path::from_str(input).unwrap();
        assert_eq!(path.render(), input, "render(parse(x)) must be x");
    }
}

#[test]
fn test_parsed_steps_are_typed() {
    let path: Path = "/root/connections/#3/\\#3".parse().unwrap();
    assert_eq!(
        path.steps(),
        &[
            Step::Key("root".to_string()),
            Step::Key("connections".to_string()),
            Step::Index(3),
            Step::Key("#3".to_string()),
        ]
    );
}

#[test]
fn test_macro_builds_same_path_as_parse() {
    let built = path!("devices", "dev/1", 0usize);
    let parsed = Path::parse("/devices/dev\\/1/#0").unwrap();
    assert_eq!(built, parsed);
    assert_eq!(built.last().and_then(Step::as_index), Some(0));
}

#[test]
fn test_try_from_reports_input() {
    let err = Path::try_from("devices/dev1").unwrap_err();
    assert_eq!(err.input(), "devices/dev1");

    let err: confstore::Error = err.into();
    assert!(err.is_path_error());
}

#[test]
fn test_paths_order_and_hash_structurally() {
    use std::collections::HashSet;

    let a = path!("a", "b");
    let same = Path::parse("/a/b").unwrap();
    let set: HashSet<Path> = [a.clone(), same].into_iter().collect();
    assert_eq!(set.len(), 1);

    assert!(path!("a") < path!("a", "b"));
    assert_eq!(a.join(&path!(1usize)), path!("a", "b", 1usize));
}
