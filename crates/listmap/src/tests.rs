use crate::{Error, ListMap, Pair};
use core::fmt::Debug;
use core::hash::Hash;

/// Checks that the index and the map describe exactly the first occurrence
/// of every key in the list, and that the duplicate flag matches the list.
fn assert_consistent<K, V>(map: &ListMap<K, V>)
where
    K: Hash + Eq + Clone + Debug,
    V: PartialEq + Debug,
{
    assert!(!map.stale);
    assert_eq!(map.index_by_key.len(), map.map.len());

    let mut first = crate::collections::Map::new();
    let mut duplicates = false;
    for (index, pair) in map.list.iter().enumerate() {
        match &pair.key {
            Some(key) if !first.contains_key(key) => {
                first.insert(key.clone(), index);
            }
            _ => duplicates = true,
        }
    }
    assert_eq!(first, map.index_by_key);
    for (key, &index) in map.index_by_key.iter() {
        assert_eq!(map.list[index].key.as_ref(), Some(key));
        assert_eq!(map.map.get(key), Some(&map.list[index].value));
    }
    assert_eq!(duplicates, map.has_duplicate_keys);
}

fn pairs<K: Clone, V: Clone>(map: &ListMap<K, V>) -> Vec<(Option<K>, V)> {
    map.pairs()
        .iter()
        .map(|pair| (pair.key.clone(), pair.value.clone()))
        .collect()
}

#[test]
fn insert_appends_new_keys() {
    let mut map = ListMap::new();
    assert_eq!(map.insert("a", 1), None);
    assert_eq!(map.insert("b", 2), None);
    assert_eq!(map.insert("c", 3), None);
    assert_consistent(&map);

    assert_eq!(map.len(), 3);
    assert_eq!(map.index_by_key["a"], 0);
    assert_eq!(map.index_by_key["b"], 1);
    assert_eq!(map.index_by_key["c"], 2);
}

#[test]
fn insert_overwrites_in_place() {
    let mut map = ListMap::from([("a", 1), ("b", 2)]);
    assert_eq!(map.insert("a", 99), Some(1));
    assert_consistent(&map);

    assert_eq!(pairs(&map), [(Some("a"), 99), (Some("b"), 2)]);
    assert_eq!(map.get("a"), Some(&99));
    assert_eq!(map.len(), 2);
}

#[test]
fn remove_shifts_later_indices() {
    let mut map = ListMap::from([("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(map.remove("b"), Some(2));
    assert_consistent(&map);

    assert_eq!(pairs(&map), [(Some("a"), 1), (Some("c"), 3)]);
    assert_eq!(map.index_by_key["a"], 0);
    assert_eq!(map.index_by_key["c"], 1);
    assert_eq!(map.lookup("a"), Ok(&1));
    assert_eq!(map.lookup("c"), Ok(&3));
    assert!(!map.contains_key("b"));
}

#[test]
fn remove_first_last_and_only() {
    let mut map = ListMap::from([("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(map.remove("c"), Some(3));
    assert_consistent(&map);
    assert_eq!(map.remove("a"), Some(1));
    assert_consistent(&map);
    assert_eq!(map.index_by_key["b"], 0);
    assert_eq!(map.remove("b"), Some(2));
    assert_consistent(&map);
    assert!(map.is_empty());
    assert!(map.pairs().is_empty());
}

#[test]
fn remove_absent_key_changes_nothing() {
    let mut map = ListMap::from([("a", 1), ("b", 2)]);
    map.add("a", 3);
    let before = map.clone();

    assert_eq!(map.remove("z"), None);
    assert_eq!(map, before);
}

#[test]
fn remove_with_unindexed_duplicates_in_the_tail() {
    let mut map = ListMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.add("b", 20);
    map.insert("c", 3);
    map.add("c", 30);

    assert_eq!(map.remove("a"), Some(1));
    assert_consistent(&map);
    assert_eq!(map.index_by_key["b"], 0);
    assert_eq!(map.index_by_key["c"], 2);
    assert_eq!(map.get("c"), Some(&3));
}

#[test]
fn remove_promotes_a_repeated_key() {
    let mut map = ListMap::from([("a", 1), ("b", 2)]);
    map.add("a", 3);
    assert!(map.has_duplicate_keys());

    assert_eq!(map.remove("a"), Some(1));
    assert_consistent(&map);
    assert_eq!(pairs(&map), [(Some("b"), 2), (Some("a"), 3)]);
    assert_eq!(map.get("a"), Some(&3));
    assert_eq!(map.index_by_key["a"], 1);
    assert!(!map.has_duplicate_keys());
}

#[test]
fn remove_matching_checks_the_value() {
    let mut map = ListMap::from([("a", 1), ("b", 2)]);
    let before = map.clone();
    assert_eq!(map.remove_matching("a", &5), None);
    assert_eq!(map, before);

    assert_eq!(map.remove_matching("a", &1), Some(1));
    assert_consistent(&map);
    let mut expected = before.clone();
    expected.remove("a");
    assert_eq!(map, expected);
}

#[test]
fn add_keeps_the_original_value() {
    let mut map = ListMap::new();
    map.add("a", 1);
    map.add("b", 2);
    assert!(!map.has_duplicate_keys());
    map.add("a", 3);
    assert_consistent(&map);

    assert_eq!(map.pairs().len(), 3);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a"), Some(&1));
    assert!(map.has_duplicate_keys());
}

#[test]
fn reconcile_keeps_first_occurrence() {
    let mut map = ListMap::new();
    map.pairs_mut().extend([
        Pair::new("k1", "v1"),
        Pair::new("k2", "v2"),
        Pair::new("k1", "v3"),
    ]);
    assert!(map.is_stale());
    map.reconcile();
    assert_consistent(&map);

    assert_eq!(map.lookup("k1"), Ok(&"v1"));
    assert!(map.has_duplicate_keys());
    assert_eq!(map.len(), 2);
}

#[test]
fn reconcile_rejects_missing_keys() {
    let mut map = ListMap::from([("a", 1)]);
    map.pairs_mut().push(Pair::without_key(2));
    map.reconcile();
    assert_consistent(&map);

    assert_eq!(map.len(), 1);
    assert!(map.has_duplicate_keys());
    assert_eq!(map.diagnostics().rejected_rows, [1]);
}

#[test]
fn reconcile_after_inserts_has_no_duplicates() {
    let mut map = ListMap::new();
    for i in 0..100 {
        map.insert(i, i * 2);
    }
    map.reconcile();
    assert_consistent(&map);
    assert!(!map.has_duplicate_keys());
    assert_eq!(map.len(), 100);
}

#[test]
fn reconcile_after_fixing_a_duplicate_clears_the_flag() {
    let mut map = ListMap::new();
    map.pairs_mut()
        .extend([Pair::new("a", 1), Pair::new("a", 2)]);
    map.reconcile();
    assert!(map.has_duplicate_keys());

    map.pairs_mut()[1].key = Some("b");
    map.reconcile();
    assert_consistent(&map);
    assert!(!map.has_duplicate_keys());
    assert_eq!(map.get("b"), Some(&2));
}

#[test]
fn reconcile_after_reordering() {
    let mut map = ListMap::from([("a", 1), ("b", 2), ("c", 3)]);
    map.pairs_mut().reverse();
    map.reconcile();
    assert_consistent(&map);
    assert_eq!(map.index_of("a"), Some(2));
    assert_eq!(map.index_of("c"), Some(0));
}

#[test]
fn dedup_drops_rejected_rows() {
    let mut map = ListMap::new();
    map.pairs_mut().extend([
        Pair::without_key(0),
        Pair::new("a", 1),
        Pair::new("b", 2),
        Pair::new("a", 3),
        Pair::new("c", 4),
    ]);
    map.reconcile();
    map.dedup();
    assert_consistent(&map);

    assert_eq!(
        pairs(&map),
        [(Some("a"), 1), (Some("b"), 2), (Some("c"), 4)]
    );
    assert!(!map.has_duplicate_keys());
}

#[test]
fn clear_resets_everything() {
    let mut map = ListMap::from([("a", 1)]);
    map.add("a", 2);
    map.clear();
    assert_consistent(&map);
    assert_eq!(map, ListMap::new());
}

#[test]
fn positional_access_reads_the_list() {
    let mut map = ListMap::from([("a", 1)]);
    map.add("a", 2);
    assert_eq!(map.get_index(0), Some((Some(&"a"), &1)));
    assert_eq!(map.get_index(1), Some((Some(&"a"), &2)));
    assert_eq!(map.get_index(2), None);
    assert_eq!(map.key_at(1), Some(&"a"));
    assert_eq!(map.value_at(1), Some(&2));
    assert_eq!(map.value_at(5), None);
}

#[test]
fn copy_to_validates_its_arguments() {
    let map = ListMap::from([("a", 1), ("b", 2)]);

    let mut dest = [("", 0); 3];
    assert_eq!(
        map.copy_to(&mut dest, 4),
        Err(Error::OffsetOutOfBounds { offset: 4, len: 3 })
    );
    let err = map.copy_to(&mut dest, 2).unwrap_err();
    assert_eq!(
        err,
        Error::InsufficientCapacity {
            required: 2,
            available: 1
        }
    );
    assert!(err.is_invalid_argument());
    assert_eq!(dest, [("", 0); 3]);

    map.copy_to(&mut dest, 1).unwrap();
    assert_eq!(dest[0], ("", 0));
    let mut copied = dest[1..].to_vec();
    copied.sort();
    assert_eq!(copied, [("a", 1), ("b", 2)]);
}

#[test]
fn lookup_reports_missing_keys() {
    let map: ListMap<String, u32> = ListMap::new();
    assert_eq!(map.lookup("nope"), Err(Error::KeyNotFound));
    assert!(!Error::KeyNotFound.is_invalid_argument());
}

#[test]
#[should_panic(expected = "key not found")]
fn index_panics_on_missing_keys() {
    let map = ListMap::from([("a", 1)]);
    let _value = map["b"];
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "without calling `reconcile`")]
fn stale_lookups_are_caught_in_debug_builds() {
    let mut map = ListMap::from([("a", 1)]);
    map.pairs_mut().push(Pair::new("b", 2));
    let _ = map.get("b");
}
