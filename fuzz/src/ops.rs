use arbitrary::{Arbitrary, Result, Unstructured};
use listmap::{ListMap, Pair};

// Runs a sequence of map operations and raw list edits against both a
// `ListMap` and a plain `Vec` standing in for its list. After every step the
// map must describe exactly the first occurrence of each key in the `Vec`.

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(u8, u16),
    Add(u8, u16),
    Remove(u8),
    RemoveMatching(u8, u16),
    Clear,
    Dedup,
    // Raw edits, each followed by a reconcile.
    SetKey { row: usize, key: Option<u8> },
    SetValue { row: usize, value: u16 },
    Push { key: Option<u8>, value: u16 },
    Swap(usize, usize),
    Truncate(usize),
}

type Model = Vec<(Option<u8>, u16)>;

fn first_occurrence(model: &Model, key: u8) -> Option<usize> {
    model.iter().position(|(k, _)| *k == Some(key))
}

pub fn run(u: &mut Unstructured<'_>) -> Result<()> {
    let ops: Vec<Op> = u.arbitrary()?;
    let mut map = ListMap::new();
    let mut model = Model::new();

    for op in ops {
        log::debug!("{op:?}");
        match op {
            Op::Insert(key, value) => {
                let prev = map.insert(key, value);
                match first_occurrence(&model, key) {
                    Some(row) => {
                        assert_eq!(prev, Some(model[row].1));
                        model[row].1 = value;
                    }
                    None => {
                        assert_eq!(prev, None);
                        model.push((Some(key), value));
                    }
                }
            }
            Op::Add(key, value) => {
                map.add(key, value);
                model.push((Some(key), value));
            }
            Op::Remove(key) => {
                let removed = map.remove(&key);
                let expected = first_occurrence(&model, key).map(|row| model.remove(row).1);
                assert_eq!(removed, expected);
            }
            Op::RemoveMatching(key, value) => {
                let removed = map.remove_matching(&key, &value);
                let expected = match first_occurrence(&model, key) {
                    Some(row) if model[row].1 == value => Some(model.remove(row).1),
                    _ => None,
                };
                assert_eq!(removed, expected);
            }
            Op::Clear => {
                map.clear();
                model.clear();
            }
            Op::Dedup => {
                map.dedup();
                let mut seen = Vec::new();
                model.retain(|(key, _)| match key {
                    Some(key) if !seen.contains(key) => {
                        seen.push(*key);
                        true
                    }
                    _ => false,
                });
            }
            Op::SetKey { row, key } => {
                if !model.is_empty() {
                    let row = row % model.len();
                    map.pairs_mut()[row].key = key;
                    model[row].0 = key;
                }
                map.reconcile();
            }
            Op::SetValue { row, value } => {
                if !model.is_empty() {
                    let row = row % model.len();
                    map.pairs_mut()[row].value = value;
                    model[row].1 = value;
                }
                map.reconcile();
            }
            Op::Push { key, value } => {
                map.pairs_mut().push(Pair { key, value });
                model.push((key, value));
                map.reconcile();
            }
            Op::Swap(a, b) => {
                if !model.is_empty() {
                    let (a, b) = (a % model.len(), b % model.len());
                    map.pairs_mut().swap(a, b);
                    model.swap(a, b);
                }
                map.reconcile();
            }
            Op::Truncate(len) => {
                map.pairs_mut().truncate(len);
                model.truncate(len);
                map.reconcile();
            }
        }
        crate::assert_matches_list(&map, &model);
    }
    Ok(())
}
