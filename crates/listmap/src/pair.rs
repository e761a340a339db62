#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// A row in the list of a [`ListMap`](crate::ListMap).
///
/// The key is optional so that an editor can append a row before its key
/// has been filled in. Such rows are never part of the map and mark it as
/// having duplicate keys once it is reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pair<K, V> {
    /// The key of this row, if one has been set.
    pub key: Option<K>,
    /// The value of this row.
    pub value: V,
}

impl<K, V> Pair<K, V> {
    /// Creates a row with the given key and value.
    pub fn new(key: K, value: V) -> Self {
        Pair {
            key: Some(key),
            value,
        }
    }

    /// Creates a row which has no key yet.
    pub fn without_key(value: V) -> Self {
        Pair { key: None, value }
    }

    /// Returns the key of this row, if one has been set.
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Returns the value of this row.
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Pair::new(key, value)
    }
}
