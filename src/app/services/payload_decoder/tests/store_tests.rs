//! Tests for the flat store and single-hop field resolution

use serde_json::json;

use super::store_from_json;
use crate::app::services::payload_decoder::store::Node;

#[test]
fn test_get_in_and_out_of_range() {
    let store = store_from_json(json!(["a", 1, null]));

    assert_eq!(store.len(), 3);
    assert_eq!(store.get(0), Some(&Node::Str("a".to_string())));
    assert_eq!(store.get(2), Some(&Node::Null));
    assert_eq!(store.get(3), None);
    assert_eq!(store.get(usize::MAX), None);
}

#[test]
fn test_deref_follows_integer_references() {
    let store = store_from_json(json!([2, "target", 42.0]));

    assert_eq!(
        store.deref(&Node::Int(1)),
        Some(&Node::Str("target".to_string()))
    );

    // Out-of-range, negative, and non-integer nodes do not dereference
    assert_eq!(store.deref(&Node::Int(3)), None);
    assert_eq!(store.deref(&Node::Int(-1)), None);
    assert_eq!(store.deref(&Node::Float(1.0)), None);
    assert_eq!(store.deref(&Node::Str("1".to_string())), None);
    assert_eq!(store.deref(&Node::Null), None);
}

#[test]
fn test_resolve_single_hop() {
    let store = store_from_json(json!([{ "price": 1 }, 29.5]));
    let container = store.get(0).unwrap().clone();

    assert_eq!(store.resolve(&container, "price"), Some(&Node::Float(29.5)));
}

#[test]
fn test_resolve_missing_field_is_absent() {
    let store = store_from_json(json!([{ "price": 1 }, 29.5]));
    let container = store.get(0).unwrap().clone();

    assert_eq!(store.resolve(&container, "volume"), None);
}

#[test]
fn test_resolve_non_mapping_container_is_absent() {
    let store = store_from_json(json!(["text", 1]));

    assert_eq!(store.resolve(&Node::Str("text".to_string()), "price"), None);
    assert_eq!(store.resolve(&Node::List(vec![]), "price"), None);
    assert_eq!(store.resolve(&Node::Null, "price"), None);
}

#[test]
fn test_resolve_out_of_range_reference_is_absent() {
    // The field value points past the end of the store
    let store = store_from_json(json!([{ "price": 99 }]));
    let container = store.get(0).unwrap().clone();

    assert_eq!(store.resolve(&container, "price"), None);
}

#[test]
fn test_resolve_non_integer_reference_is_absent() {
    let store = store_from_json(json!([{ "price": "1", "other": 1.5 }, 29.5]));
    let container = store.get(0).unwrap().clone();

    assert_eq!(store.resolve(&container, "price"), None);
    assert_eq!(store.resolve(&container, "other"), None);
}

#[test]
fn test_node_numeric_interpretation() {
    assert_eq!(Node::Int(5).as_f64(), Some(5.0));
    assert_eq!(Node::Float(2.5).as_f64(), Some(2.5));
    assert_eq!(Node::Str("29.5".to_string()).as_f64(), Some(29.5));
    assert_eq!(Node::Str(" 12 ".to_string()).as_f64(), Some(12.0));
    assert_eq!(Node::Str("n/a".to_string()).as_f64(), None);
    assert_eq!(Node::Bool(true).as_f64(), None);
    assert_eq!(Node::Null.as_f64(), None);
}

#[test]
fn test_node_reference_interpretation() {
    assert_eq!(Node::Int(3).as_ref_index(), Some(3));
    assert_eq!(Node::Int(0).as_ref_index(), Some(0));
    assert_eq!(Node::Int(-1).as_ref_index(), None);
    assert_eq!(Node::Float(3.0).as_ref_index(), None);
    assert_eq!(Node::Bool(true).as_ref_index(), None);
}

#[test]
fn test_json_conversion_shapes() {
    let store = store_from_json(json!([
        null,
        true,
        7,
        2.5,
        "text",
        [1, 2],
        { "key": 3 }
    ]));

    assert_eq!(store.get(0), Some(&Node::Null));
    assert_eq!(store.get(1), Some(&Node::Bool(true)));
    assert_eq!(store.get(2), Some(&Node::Int(7)));
    assert_eq!(store.get(3), Some(&Node::Float(2.5)));
    assert_eq!(store.get(4), Some(&Node::Str("text".to_string())));
    assert_eq!(
        store.get(5),
        Some(&Node::List(vec![Node::Int(1), Node::Int(2)]))
    );
    assert!(store.get(6).unwrap().is_map());
}

#[test]
fn test_empty_store() {
    let store = store_from_json(json!([]));

    assert!(store.is_empty());
    assert_eq!(store.get(0), None);
}
