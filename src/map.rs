// ABOUTME: Folds a flat alternating key/value sequence into a map.
// ABOUTME: Duplicate keys follow the configured policy, last-write-wins by default.

use crate::error::{Error, Result};
use crate::value::Value;
use std::collections::BTreeMap;

/// How to handle duplicate keys in maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeyMode {
    /// Raise an error on duplicate keys
    Error,
    /// Keep the first value, ignore subsequent duplicates
    KeepFirst,
    /// Keep the last value, overwrite earlier values (default)
    #[default]
    KeepLast,
}

/// Pair up `flat` as key, value, key, value, ... and collect into a map.
///
/// Fails with [`Error::OddPairCount`] if `flat` has an odd length.
pub fn pairs_to_map(flat: Vec<Value>, mode: DuplicateKeyMode) -> Result<BTreeMap<Value, Value>> {
    if flat.len() % 2 != 0 {
        return Err(Error::OddPairCount(flat.len()));
    }

    let mut map = BTreeMap::new();
    let mut iter = flat.into_iter();
    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
        if map.contains_key(&key) {
            match mode {
                DuplicateKeyMode::Error => return Err(Error::DuplicateKey),
                DuplicateKeyMode::KeepFirst => continue,
                DuplicateKeyMode::KeepLast => {}
            }
        }
        map.insert(key, value);
    }
    Ok(map)
}
