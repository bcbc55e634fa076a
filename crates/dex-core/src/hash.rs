//! Fast hash map and hash set type aliases.
//!
//! Type names and resource keys are short strings, which is where the Fx hash
//! from `rustc-hash` does well. None of these maps are exposed to untrusted
//! keys at a scale where denial-of-service resistance matters.
//!
//! # Examples
//!
//! ```
//! use dex_core::{FxHashMap, fx_hash_map};
//!
//! let mut seen: FxHashMap<String, u32> = fx_hash_map();
//! seen.insert("fire".to_owned(), 10);
//! assert_eq!(seen.get("fire"), Some(&10));
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new empty [`FxHashMap`].
#[inline]
#[must_use]
pub fn fx_hash_map<K, V>() -> FxHashMap<K, V> {
    FxHashMap::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_hash_map_operations() {
        let mut map: FxHashMap<&str, u32> = fx_hash_map();
        map.insert("fire", 10);
        map.insert("water", 11);
        assert_eq!(map.get("fire"), Some(&10));
        assert_eq!(map.get("grass"), None);
    }
}
