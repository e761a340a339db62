//! Type aliases for the maps used by `listmap`.
//!
//! Both lookup structures of a [`ListMap`](crate::ListMap) are hash maps from
//! `hashbrown` using its default hasher rather than the standard library's
//! `SipHash`.

/// Listmap-specific type alias for a hash map.
pub type Map<K, V> = hashbrown::HashMap<K, V>;
