//! A hash map that keeps its entries in an externally editable list.
//!
//! [`ListMap`] stores every entry twice: once in an ordered list of
//! [`Pair`]s, which is what gets displayed, edited and persisted, and once in
//! a hash map used for lookups. A third structure records where each key lives
//! in the list so that overwrites and removals don't need to scan it.
//!
//! The typed API ([`ListMap::insert`], [`ListMap::add`], [`ListMap::remove`],
//! ...) keeps all three structures consistent as it goes. Tools which edit the
//! list directly through [`ListMap::pairs_mut`] must call
//! [`ListMap::reconcile`] afterwards, which rebuilds the lookup structures
//! from the list. During reconciliation only the first occurrence of a key is
//! admitted; later occurrences, and pairs without a key, are left in the list
//! but flag the whole map via [`ListMap::has_duplicate_keys`].
//!
//! ```
//! use listmap::{ListMap, Pair};
//!
//! let mut map = ListMap::new();
//! map.insert("a", 1);
//! map.insert("b", 2);
//!
//! // An editor appends a row that reuses an existing key.
//! map.pairs_mut().push(Pair::new("a", 3));
//! map.reconcile();
//!
//! assert_eq!(map.get("a"), Some(&1));
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.pairs().len(), 3);
//! assert!(map.has_duplicate_keys());
//! ```

#![deny(missing_docs)]

pub mod collections;
mod diagnostics;
mod error;
mod iter;
mod pair;
#[cfg(feature = "serde")]
mod serde_;
#[cfg(test)]
mod tests;

pub use self::diagnostics::{Diagnostics, DUPLICATE_KEYS_WARNING};
pub use self::error::{Error, Result};
pub use self::iter::{Iter, Keys, Values};
pub use self::pair::Pair;

use crate::collections::Map;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::ops::Index;

/// A hash map backed by an ordered, externally editable list of pairs.
///
/// See the [crate documentation](crate) for an overview.
#[derive(Clone)]
pub struct ListMap<K, V> {
    /// Source of truth for display, editing and persistence.
    list: Vec<Pair<K, V>>,
    /// Position in `list` of the first occurrence of each key.
    index_by_key: Map<K, usize>,
    map: Map<K, V>,
    has_duplicate_keys: bool,
    /// Set once `list` has been handed out mutably, cleared by `reconcile`.
    stale: bool,
}

impl<K, V> Default for ListMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ListMap<K, V> {
    /// Makes a new, empty [`ListMap`].
    ///
    /// Does not allocate anything on its own.
    pub fn new() -> Self {
        Self {
            list: Vec::new(),
            index_by_key: Map::new(),
            map: Map::new(),
            has_duplicate_keys: false,
            stale: false,
        }
    }

    /// Constructs a new, empty [`ListMap`] with room for at least `capacity`
    /// entries in each of its structures.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: Vec::with_capacity(capacity),
            index_by_key: Map::with_capacity(capacity),
            map: Map::with_capacity(capacity),
            has_duplicate_keys: false,
            stale: false,
        }
    }

    /// Returns the number of distinct keys in the map.
    ///
    /// This counts first occurrences only, so it is smaller than
    /// `self.pairs().len()` when the list holds duplicates.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map contains no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if the list holds a repeated key or a pair without a
    /// key.
    ///
    /// The flag describes the whole map, not any particular key.
    pub fn has_duplicate_keys(&self) -> bool {
        self.has_duplicate_keys
    }

    /// Returns `true` if the list was handed out by [`ListMap::pairs_mut`]
    /// and [`ListMap::reconcile`] has not run since.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Returns the list of pairs in display order, duplicates included.
    pub fn pairs(&self) -> &[Pair<K, V>] {
        &self.list
    }

    /// Returns the list of pairs for direct editing.
    ///
    /// This leaves the map stale: no other operation may be used until
    /// [`ListMap::reconcile`] has been called. Debug builds panic on lookups
    /// and mutations made in that state.
    pub fn pairs_mut(&mut self) -> &mut Vec<Pair<K, V>> {
        self.stale = true;
        &mut self.list
    }

    /// Consumes the map, returning its list of pairs.
    pub fn into_pairs(self) -> Vec<Pair<K, V>> {
        self.list
    }

    /// Returns the key and value stored at `index` in the list.
    ///
    /// This reads the list directly, so it also returns rows that are not
    /// part of the map. Returns `None` if `index` is out of bounds.
    pub fn get_index(&self, index: usize) -> Option<(Option<&K>, &V)> {
        self.list
            .get(index)
            .map(|pair| (pair.key.as_ref(), &pair.value))
    }

    /// Returns the key stored at `index` in the list, if any.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.list.get(index).and_then(|pair| pair.key.as_ref())
    }

    /// Returns the value stored at `index` in the list.
    pub fn value_at(&self, index: usize) -> Option<&V> {
        self.list.get(index).map(|pair| &pair.value)
    }

    /// Gets an iterator over the entries of the map.
    ///
    /// Iteration order is unspecified. Use [`ListMap::pairs`] for display
    /// order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.map.iter())
    }

    /// Gets an iterator over the keys of the map, in unspecified order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.map.keys())
    }

    /// Gets an iterator over the values of the map, in unspecified order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.map.values())
    }

    /// Clears the map, removing all pairs.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index_by_key.clear();
        self.map.clear();
        self.has_duplicate_keys = false;
        self.stale = false;
    }

    fn assert_fresh(&self) {
        debug_assert!(
            !self.stale,
            "`ListMap` used after `pairs_mut` without calling `reconcile`"
        );
    }
}

impl<K, V> ListMap<K, V>
where
    K: Hash + Eq,
{
    /// Reserve capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.list.reserve(additional);
        self.index_by_key.reserve(additional);
        self.map.reserve(additional);
    }

    /// Returns `true` if the map contains a value for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.assert_fresh();
        self.map.contains_key(key)
    }

    /// Returns `true` if `key` is mapped to a value equal to `value`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        self.get(key) == Some(value)
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.assert_fresh();
        self.map.get(key)
    }

    /// Returns a reference to the value for `key`, failing with
    /// [`Error::KeyNotFound`] if there is none.
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the position of `key`'s pair in the list.
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.assert_fresh();
        self.index_by_key.get(key).copied()
    }

    /// Removes every row from the list which is not part of the map, that is
    /// every repeated key and every pair without a key.
    ///
    /// Afterwards the list holds exactly one pair per key, in the same
    /// relative order, and [`ListMap::has_duplicate_keys`] is `false`.
    pub fn dedup(&mut self) {
        self.assert_fresh();
        let index_by_key = &self.index_by_key;
        let mut row = 0;
        self.list.retain(|pair| {
            let keep = match &pair.key {
                Some(key) => index_by_key.get(key) == Some(&row),
                None => false,
            };
            row += 1;
            keep
        });

        for (index, pair) in self.list.iter().enumerate() {
            if let Some(slot) = pair.key.as_ref().and_then(|k| self.index_by_key.get_mut(k)) {
                *slot = index;
            }
        }
        self.has_duplicate_keys = false;
    }

    /// Computes a report of the list's state for display.
    pub fn diagnostics(&self) -> Diagnostics {
        self.assert_fresh();
        let rejected_rows = self
            .list
            .iter()
            .enumerate()
            .filter(|(row, pair)| match &pair.key {
                Some(key) => self.index_by_key.get(key) != Some(row),
                None => true,
            })
            .map(|(row, _)| row)
            .collect();
        Diagnostics {
            rows: self.list.len(),
            distinct_keys: self.map.len(),
            has_duplicate_keys: self.has_duplicate_keys,
            rejected_rows,
        }
    }
}

impl<K, V> ListMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Sets the value for `key`, returning the previous one.
    ///
    /// An existing key is overwritten in place, keeping its position in the
    /// list. A new key is appended to the end of the list. This never creates
    /// a duplicate.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.assert_fresh();
        match self.index_by_key.get(&key) {
            Some(&index) => {
                self.list[index] = Pair::new(key.clone(), value.clone());
                self.map.insert(key, value)
            }
            None => {
                self.index_by_key.insert(key.clone(), self.list.len());
                self.list.push(Pair::new(key.clone(), value.clone()));
                self.map.insert(key, value);
                None
            }
        }
    }

    /// Appends `key` and `value` to the list.
    ///
    /// Unlike [`ListMap::insert`] the list always grows, mirroring what an
    /// editor appending a row does. If `key` is already present the map keeps
    /// its original value, the new row becomes a duplicate and
    /// [`ListMap::has_duplicate_keys`] is set.
    pub fn add(&mut self, key: K, value: V) {
        self.assert_fresh();
        if self.map.contains_key(&key) {
            log::trace!("row {} repeats an existing key", self.list.len());
            self.has_duplicate_keys = true;
        } else {
            self.index_by_key.insert(key.clone(), self.list.len());
            self.map.insert(key.clone(), value.clone());
        }
        self.list.push(Pair::new(key, value));
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// The key's pair is removed from the list and the pairs after it move
    /// up by one, keeping their relative order.
    ///
    /// If the list repeats `key` further down, that row now holds the first
    /// occurrence and takes the removed pair's place in the map, exactly as
    /// [`ListMap::reconcile`] would decide.
    ///
    /// Computes in **O(n)** time where `n` is the number of distinct keys,
    /// or the length of the list when it holds duplicates.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.assert_fresh();
        let removed = self.index_by_key.remove(key)?;
        self.map.remove(key);
        let pair = self.list.remove(removed);

        if self.has_duplicate_keys {
            self.reconcile();
            return Some(pair.value);
        }

        // Everything recorded after the removed row has moved up by one.
        for index in self.index_by_key.values_mut() {
            if *index > removed {
                *index -= 1;
            }
        }

        Some(pair.value)
    }

    /// Removes `key` only if it is currently mapped to a value equal to
    /// `expected`.
    ///
    /// Otherwise nothing is changed and `None` is returned.
    pub fn remove_matching<Q>(&mut self, key: &Q, expected: &V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        if !self.contains(key, expected) {
            return None;
        }
        self.remove(key)
    }

    /// Rebuilds the lookup structures from the list.
    ///
    /// The list is scanned front to back. The first pair seen for each key is
    /// admitted to the map; any later pair with an equal key, and any pair
    /// without a key, is skipped and sets [`ListMap::has_duplicate_keys`].
    ///
    /// This must be called after editing the list through
    /// [`ListMap::pairs_mut`], before the map is used again.
    pub fn reconcile(&mut self) {
        self.map.clear();
        self.index_by_key.clear();
        self.has_duplicate_keys = false;
        self.stale = false;

        for (index, pair) in self.list.iter().enumerate() {
            match &pair.key {
                Some(key) if !self.map.contains_key(key) => {
                    self.map.insert(key.clone(), pair.value.clone());
                    self.index_by_key.insert(key.clone(), index);
                }
                Some(_) => {
                    log::trace!("row {index} repeats an earlier key, skipping");
                    self.has_duplicate_keys = true;
                }
                None => {
                    log::trace!("row {index} has no key, skipping");
                    self.has_duplicate_keys = true;
                }
            }
        }

        log::debug!(
            "reconciled {} rows into {} keys",
            self.list.len(),
            self.map.len()
        );
    }

    /// Copies the map's entries into `dest`, starting at `offset`.
    ///
    /// Entries are written in unspecified order. Fails without writing
    /// anything if `offset` lies past the end of `dest` or if fewer than
    /// [`ListMap::len`] slots remain after it.
    pub fn copy_to(&self, dest: &mut [(K, V)], offset: usize) -> Result<()> {
        if offset > dest.len() {
            return Err(Error::OffsetOutOfBounds {
                offset,
                len: dest.len(),
            });
        }
        let available = dest.len() - offset;
        if available < self.map.len() {
            return Err(Error::InsufficientCapacity {
                required: self.map.len(),
                available,
            });
        }
        for (slot, (key, value)) in dest[offset..].iter_mut().zip(&self.map) {
            *slot = (key.clone(), value.clone());
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for ListMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListMap")
            .field("pairs", &self.list)
            .field("has_duplicate_keys", &self.has_duplicate_keys)
            .finish()
    }
}

impl<K, V> PartialEq for ListMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
            && self.index_by_key == other.index_by_key
            && self.map == other.map
            && self.has_duplicate_keys == other.has_duplicate_keys
    }
}

impl<K, V> Eq for ListMap<K, V>
where
    K: Hash + Eq,
    V: Eq,
{
}

impl<K, V, Q> Index<&Q> for ListMap<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key)
            .unwrap_or_else(|| panic!("key not found in `ListMap`"))
    }
}

impl<K, V> Extend<(K, V)> for ListMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        iter.into_iter().for_each(move |(key, value)| {
            self.insert(key, value);
        });
    }
}

impl<K, V> FromIterator<(K, V)> for ListMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = ListMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ListMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}

impl<K, V> From<Vec<Pair<K, V>>> for ListMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Adopts `pairs` as the list and reconciles it.
    fn from(pairs: Vec<Pair<K, V>>) -> Self {
        let mut map = ListMap {
            list: pairs,
            ..ListMap::new()
        };
        map.reconcile();
        map
    }
}

impl<'a, K, V> IntoIterator for &'a ListMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
