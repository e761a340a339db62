use listmap::ListMap;
use std::fmt::Debug;
use std::hash::Hash;

pub mod json;
pub mod ops;

/// Asserts that `map` describes exactly the first occurrence of each key in
/// `expected`, which is the list the map should be holding.
pub fn assert_matches_list<K, V>(map: &ListMap<K, V>, expected: &[(Option<K>, V)])
where
    K: Hash + Eq + Clone + Debug,
    V: PartialEq + Debug,
{
    let actual = map
        .pairs()
        .iter()
        .map(|pair| (pair.key.as_ref(), &pair.value))
        .collect::<Vec<_>>();
    let expected_refs = expected
        .iter()
        .map(|(key, value)| (key.as_ref(), value))
        .collect::<Vec<_>>();
    assert_eq!(actual, expected_refs);

    let mut seen = Vec::new();
    let mut duplicates = false;
    for (row, (key, value)) in expected.iter().enumerate() {
        match key {
            Some(key) if !seen.contains(&key) => {
                seen.push(key);
                assert_eq!(map.index_of(key), Some(row), "index of {key:?}");
                assert_eq!(map.get(key), Some(value), "value of {key:?}");
            }
            _ => duplicates = true,
        }
    }
    assert_eq!(map.len(), seen.len());
    assert_eq!(map.has_duplicate_keys(), duplicates);

    let diagnostics = map.diagnostics();
    assert_eq!(diagnostics.rows, expected.len());
    assert_eq!(diagnostics.rows - diagnostics.rejected_rows.len(), map.len());
}
