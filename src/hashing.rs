//! This module provides a `HashMap` variant that uses the deterministic `FxHasher`.
//! The hashing data structures in the standard library are not deterministic:
//!
//! > By default, HashMap uses a hashing algorithm selected to provide
//! > resistance against HashDoS attacks. The algorithm is randomly seeded, and a
//! > reasonable best-effort is made to generate this seed from a high quality,
//! > secure source of randomness provided by the host without blocking the program.
//!
//! Keys in the data store come from the simulation itself, so HashDoS resistance buys nothing and
//! iteration order of two identical runs should agree.
//!
//! `HashMap<K, V, S>` does not have a `new` method unless `S` is the standard library's
//! `RandomState`. Use `HashMap::default()`, or bring the `HashMapExt` trait into scope to keep the
//! familiar API.

use std::hash::Hash;

pub use rustc_hash::FxHashMap as HashMap;

pub trait HashMapExt {
    fn new() -> Self;
    fn with_capacity(capacity: usize) -> Self;
}

impl<K: Hash + Eq, V> HashMapExt for HashMap<K, V> {
    fn new() -> Self {
        HashMap::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity_and_hasher(capacity, Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_ext_constructors() {
        let mut map: HashMap<&str, i32> = HashMap::new();
        map.insert("a", 1);
        assert_eq!(map.get("a"), Some(&1));

        let map: HashMap<&str, i32> = HashMap::with_capacity(8);
        assert!(map.capacity() >= 8);
    }

    #[test]
    fn iteration_order_is_reproducible() {
        let build = || {
            let mut map: HashMap<String, usize> = HashMap::new();
            for i in 0..64 {
                map.insert(format!("Agents/{i}/Velocity"), i);
            }
            map.into_keys().collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }
}
