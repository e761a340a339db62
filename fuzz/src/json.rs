use listmap::ListMap;
use serde_json::Value;

// Any JSON list of pairs must load into a consistent map, and writing that
// map back out must load into the same list again.
pub fn run(string: &str) {
    let map: ListMap<String, Value> = match serde_json::from_str(string) {
        Ok(map) => map,
        Err(_) => return,
    };
    log::debug!("loaded {}", map.diagnostics());

    let expected = map
        .pairs()
        .iter()
        .map(|pair| (pair.key.clone(), pair.value.clone()))
        .collect::<Vec<_>>();
    crate::assert_matches_list(&map, &expected);

    let text = serde_json::to_string(&map).unwrap();
    let back: ListMap<String, Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(back.diagnostics(), map.diagnostics());
    assert_eq!(
        back.pairs().iter().map(|p| &p.key).collect::<Vec<_>>(),
        map.pairs().iter().map(|p| &p.key).collect::<Vec<_>>(),
    );
}
