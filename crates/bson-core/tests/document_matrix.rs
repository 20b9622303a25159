//! Document semantics: copy-on-write isolation, key ordering, equality.

use bson_core::{doc, Document, Value};

#[test]
fn cow_isolation_under_interleaved_mutation() {
    let mut a = doc! { "k1": 1, "k2": "two", "k3": true };
    let mut b = a.clone();

    // Interleave inserts, updates, and deletes on both sides.
    b.set("k1", 100);
    a.set("k4", 4);
    b.remove("k2");
    a.set("k2", "updated");
    b.set("k5", 5.0);
    a.remove("k3");

    assert_eq!(a.get_i32("k1"), Some(1));
    assert_eq!(a.get_str("k2"), Some("updated"));
    assert!(!a.contains_key("k3"));
    assert_eq!(a.get_i32("k4"), Some(4));
    assert!(!a.contains_key("k5"));

    assert_eq!(b.get_i32("k1"), Some(100));
    assert!(!b.contains_key("k2"));
    assert_eq!(b.get_bool("k3"), Some(true));
    assert!(!b.contains_key("k4"));
    assert_eq!(b.get_f64("k5"), Some(5.0));
}

#[test]
fn cow_chain_of_clones() {
    let mut a = doc! { "x": 1 };
    let b = a.clone();
    let c = b.clone();
    a.set("x", 2);
    assert_eq!(a.get_i32("x"), Some(2));
    assert_eq!(b.get_i32("x"), Some(1));
    assert_eq!(c.get_i32("x"), Some(1));
}

#[test]
fn parsed_clone_keeps_buffer_until_mutation() {
    let original = doc! { "a": 1, "b": 2 };
    let bytes = original.to_bytes();
    let parsed = Document::from_bytes(&bytes).unwrap();
    let mut mutated = parsed.clone();
    mutated.set("c", 3);
    // The unmutated handle still returns the construction buffer.
    assert_eq!(parsed.to_bytes(), bytes);
    assert_ne!(mutated.to_bytes(), bytes);
    assert_eq!(parsed.len(), 2);
    assert_eq!(mutated.len(), 3);
}

fn permute(doc: &Document, order: &[&str]) -> Document {
    order
        .iter()
        .map(|&k| (k.to_owned(), doc.get(k).unwrap().clone()))
        .collect()
}

#[test]
fn permutations_equal_ignoring_key_order_only() {
    let doc = doc! { "a": 1, "b": "x", "c": true };
    let orders: [&[&str]; 5] = [
        &["a", "c", "b"],
        &["b", "a", "c"],
        &["b", "c", "a"],
        &["c", "a", "b"],
        &["c", "b", "a"],
    ];
    for order in orders {
        let permuted = permute(&doc, order);
        assert!(doc.eq_ignore_key_order(&permuted), "order {order:?}");
        assert_ne!(doc, permuted, "order {order:?}");
    }
    // The identity permutation is equal both ways.
    let same = permute(&doc, &["a", "b", "c"]);
    assert_eq!(doc, same);
    assert!(doc.eq_ignore_key_order(&same));
}

#[test]
fn key_set_difference_breaks_order_insensitive_equality() {
    let a = doc! { "x": 1 };
    let b = doc! { "y": 1 };
    assert!(!a.eq_ignore_key_order(&b));
    let c = doc! { "x": 1, "y": 2 };
    assert!(!a.eq_ignore_key_order(&c));
}

#[test]
fn nested_array_order_still_significant() {
    let a = doc! { "arr": vec![Value::Int32(1), Value::Int32(2)] };
    let b = doc! { "arr": vec![Value::Int32(2), Value::Int32(1)] };
    assert!(!a.eq_ignore_key_order(&b));
}

#[test]
fn deleting_missing_key_changes_nothing() {
    let mut doc = doc! { "a": 1, "b": 2 };
    let keys_before: Vec<String> = doc.keys().map(str::to_owned).collect();
    let values_before: Vec<Value> = doc.values().cloned().collect();
    doc.set_or_remove("missing-key", None);
    assert_eq!(doc.keys().map(str::to_owned).collect::<Vec<_>>(), keys_before);
    assert_eq!(doc.values().cloned().collect::<Vec<_>>(), values_before);
}

#[test]
fn set_none_deletes_existing_key() {
    let mut doc = doc! { "a": 1, "b": 2 };
    doc.set_or_remove("a", None);
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["b"]);
}

#[test]
fn replacing_value_changes_variant_freely() {
    let mut doc = doc! { "k": 1 };
    doc.set("k", "now a string");
    assert_eq!(doc.get_str("k"), Some("now a string"));
    doc.set("k", Value::Null);
    assert!(doc.get("k").unwrap().is_null());
}

#[test]
fn keys_and_values_are_parallel() {
    let doc = doc! { "a": 1, "b": "x", "c": 2.5 };
    let keys: Vec<&str> = doc.keys().collect();
    let values: Vec<&Value> = doc.values().collect();
    assert_eq!(keys.len(), values.len());
    for (key, value) in keys.iter().zip(&values) {
        assert_eq!(doc.get(key), Some(*value));
    }
}

#[test]
fn with_id_generates_distinct_first_key() {
    let doc = doc! { "name": "x", "n": 1 };
    let a = doc.with_id();
    let b = doc.with_id();
    assert_eq!(a.keys().collect::<Vec<_>>(), ["_id", "name", "n"]);
    assert!(a.get_object_id("_id").is_some());
    // Two separate calls on an id-less document generate different ids.
    assert_ne!(a.get_object_id("_id"), b.get_object_id("_id"));
    // A second call on the result is the identity.
    assert_eq!(a.with_id(), a);
}

#[test]
fn with_id_respects_existing_id() {
    let doc = doc! { "_id": "custom", "n": 1 };
    assert_eq!(doc.with_id(), doc);
}

#[test]
fn roundtrip_preserves_key_order() {
    let doc = doc! { "z": 1, "a": 2, "m": 3 };
    let decoded = Document::from_bytes(&doc.to_bytes()).unwrap();
    assert_eq!(decoded.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    assert_eq!(decoded, doc);
}
