#![cfg(feature = "serde")]

use anyhow::Result;
use listmap::{ListMap, Pair};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn serializes_the_list_in_order() -> Result<()> {
    let mut map = ListMap::new();
    map.insert("b".to_string(), 2);
    map.insert("a".to_string(), 1);
    map.add("b".to_string(), 3);

    let value = serde_json::to_value(&map)?;
    assert_eq!(
        value,
        json!([
            { "key": "b", "value": 2 },
            { "key": "a", "value": 1 },
            { "key": "b", "value": 3 },
        ])
    );
    Ok(())
}

#[test]
fn deserializing_reconciles() -> Result<()> {
    let map: ListMap<String, u32> = serde_json::from_value(json!([
        { "key": "k1", "value": 1 },
        { "key": "k2", "value": 2 },
        { "key": "k1", "value": 3 },
        { "key": null, "value": 4 },
        { "value": 5 },
    ]))?;

    assert!(!map.is_stale());
    assert_eq!(map.pairs().len(), 5);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("k1"), Some(&1));
    assert!(map.has_duplicate_keys());
    assert_eq!(map.diagnostics().rejected_rows, [2, 3, 4]);
    assert_eq!(map.pairs()[4], Pair::without_key(5));
    Ok(())
}

#[test]
fn round_trip_keeps_duplicates() -> Result<()> {
    let mut map = ListMap::new();
    map.pairs_mut().extend([
        Pair::new(1u32, "one".to_string()),
        Pair::without_key("none".to_string()),
        Pair::new(1u32, "uno".to_string()),
    ]);
    map.reconcile();

    let text = serde_json::to_string(&map)?;
    let back: ListMap<u32, String> = serde_json::from_str(&text)?;
    assert_eq!(back, map);
    Ok(())
}
