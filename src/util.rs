// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Small collection helpers

use std::collections::HashMap;
use std::hash::Hash;

/// Build a map by letting `callback` turn every `(key, value)` item into zero
/// or more new key/value pairs.
///
/// Pairs are inserted in iteration order, so when two items produce the same
/// key the later one wins.
pub fn map_with_keys<I, K, V, NK, NV, F, R>(items: I, mut callback: F) -> HashMap<NK, NV>
where
    I: IntoIterator<Item = (K, V)>,
    NK: Eq + Hash,
    F: FnMut(V, K) -> R,
    R: IntoIterator<Item = (NK, NV)>,
{
    let mut result = HashMap::new();
    for (key, value) in items {
        for (mapped_key, mapped_value) in callback(value, key) {
            result.insert(mapped_key, mapped_value);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let items = vec![("a", 1), ("b", 2)];
        let map = map_with_keys(items, |v, k| [(k, v)]);

        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], 1);
        assert_eq!(map["b"], 2);
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let items = vec![("x", 1), ("y", 2), ("x", 3)];
        let map = map_with_keys(items, |v, k| [(k, v)]);

        assert_eq!(map.len(), 2);
        assert_eq!(map["x"], 3);
    }

    #[test]
    fn test_callback_can_fan_out() {
        let items = vec![("n", 2)];
        let map = map_with_keys(items, |v, k| {
            vec![(format!("{}-single", k), v), (format!("{}-double", k), v * 2)]
        });

        assert_eq!(map["n-single"], 2);
        assert_eq!(map["n-double"], 4);
    }
}
