//! A `ListMap` is persisted as its list of pairs, duplicates included, so
//! that whatever an editor produced survives a round trip. The lookup
//! structures are rebuilt by reconciling once the list has been read.

use crate::{ListMap, Pair};
use core::hash::Hash;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

impl<K, V> Serialize for ListMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.list.len()))?;
        for pair in &self.list {
            seq.serialize_element(pair)?;
        }
        seq.end()
    }
}

impl<'de, K, V> Deserialize<'de> for ListMap<K, V>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<Pair<K, V>>::deserialize(deserializer)?;
        Ok(ListMap::from(pairs))
    }
}
