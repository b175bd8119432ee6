use serde::{Deserialize, Serialize};
use serde_json::json;
use gena_utils::*;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Sample {
    zeta: u32,
    alpha: Vec<u32>,
    nested: Nested,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Nested {
    rods: u32,
    discs: u32,
}

fn sample() -> Sample {
    Sample {
        zeta: 7,
        alpha: vec![1, 4, 1],
        nested: Nested { rods: 4, discs: 3 },
    }
}

#[test]
fn test_jsonify_sorts_keys_at_every_depth() {
    assert_eq!(
        jsonify(&sample()),
        r#"{"alpha":[1,4,1],"nested":{"discs":3,"rods":4},"zeta":7}"#
    );
}

#[test]
fn test_sort_keys_inside_arrays() {
    let value = json!([{"b": 1, "a": 2}]);
    assert_eq!(
        serde_json::to_string(&sort_keys(&value)).unwrap(),
        r#"[{"a":2,"b":1}]"#
    );
}

#[test]
fn test_dejsonify() {
    let parsed: Sample =
        dejsonify(r#"{"zeta":7,"alpha":[1,4,1],"nested":{"rods":4,"discs":3}}"#).unwrap();
    assert_eq!(parsed, sample());
    assert!(dejsonify::<Sample>(r#"{"zeta":7}"#).is_err());
}

#[test]
fn test_compressed_object_is_recoverable() {
    let compressed = compress_obj(&sample()).unwrap();
    assert!(!compressed.is_empty());
    let restored: Sample = decompress_obj(&compressed).unwrap();
    assert_eq!(restored, sample());
}

#[test]
fn test_decompress_garbage_fails() {
    assert!(decompress_obj::<Sample>(&[1, 2, 3, 4]).is_err());
}
