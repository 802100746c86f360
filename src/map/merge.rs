//! Merge operations and safe-mode clash detection.
//!
//! All merges iterate the incoming mapping in its own order and store each
//! pair through [`InsensitiveMap::set`]. In safe mode the incoming key set is
//! checked first; a clash fails the merge before anything is written.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{InsensitiveMapError, KeyClashError};
use crate::key::Key;
use crate::value::Value;

use super::InsensitiveMap;

impl InsensitiveMap {
    /// Merges `other` into this map, replacing values at equivalent keys.
    ///
    /// Nested mappings are wrapped, but never combined with a nested map
    /// already stored at the same key: the incoming value replaces it.
    ///
    /// # Errors
    ///
    /// In safe mode, returns [`InsensitiveMapError::KeyClash`] if two distinct
    /// incoming keys normalize identically. The map is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Value, plain_map};
    ///
    /// let mut map = InsensitiveMap::new();
    /// map.set("Name", "old");
    /// map.merge_in(plain_map! { "NAME" => "new", "Size" => 3 }).unwrap();
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get("name"), Some(&Value::from("new")));
    /// ```
    pub fn merge_in<I, K, V>(&mut self, other: I) -> Result<&mut Self, InsensitiveMapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        let pairs = collect_pairs(other);
        self.detect_clash(&pairs)?;
        for (key, value) in pairs {
            self.set(key, value);
        }
        Ok(self)
    }

    /// Merges `other` into this map, converting every nested plain mapping
    /// into an insensitive map at any depth.
    ///
    /// Every stored value is wrapped, so this has the same effect as
    /// [`merge_in`](Self::merge_in). It is the construction path for deep
    /// structures; see [`from_plain`](Self::from_plain).
    ///
    /// # Errors
    ///
    /// In safe mode, returns [`InsensitiveMapError::KeyClash`] if two distinct
    /// keys of the incoming mapping, or of any plain mapping nested in it,
    /// normalize identically. The map is left unchanged.
    pub fn merge_recursive<I, K, V>(&mut self, other: I) -> Result<&mut Self, InsensitiveMapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        self.merge_in(other)
    }

    /// Returns a new map holding this map's entries with `other` merged on
    /// top. This map is not modified.
    ///
    /// The new map keeps this map's safe mode and default.
    ///
    /// # Errors
    ///
    /// Same as [`merge_in`](Self::merge_in).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Value, plain_map};
    ///
    /// let map = InsensitiveMap::from_plain(plain_map! { "a" => 1 });
    /// let merged = map.merge(plain_map! { "B" => 2 }).unwrap();
    ///
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(merged.len(), 2);
    /// ```
    pub fn merge<I, K, V>(&self, other: I) -> Result<Self, InsensitiveMapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        let mut merged = self.clone();
        merged.merge_in(other)?;
        Ok(merged)
    }

    /// Checks the incoming pairs for keys that would collide once
    /// normalized. Does nothing unless safe mode is on.
    ///
    /// Only the incoming pairs are inspected; keys already in this map are
    /// overwritten legitimately.
    ///
    /// # Errors
    ///
    /// Returns the first clash found.
    pub fn detect_clash(&self, pairs: &[(Key, Value)]) -> Result<(), KeyClashError> {
        if !self.safe_mode {
            return Ok(());
        }
        find_clash(pairs.iter().map(|(key, value)| (key, value))).inspect_err(|clash| {
            tracing::debug!(
                first = %clash.first,
                second = %clash.second,
                normalized = %clash.normalized,
                "rejected merge with clashing keys"
            );
        })
    }
}

fn collect_pairs<I, K, V>(other: I) -> Vec<(Key, Value)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Key>,
    V: Into<Value>,
{
    other
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

fn find_clash<'a>(
    pairs: impl Iterator<Item = (&'a Key, &'a Value)>,
) -> Result<(), KeyClashError> {
    let mut seen: HashMap<Key, &Key> = HashMap::new();
    for (key, value) in pairs {
        match seen.entry(key.normalize()) {
            Entry::Occupied(occupied) if *occupied.get() != key => {
                return Err(KeyClashError::new((*occupied.get()).clone(), key.clone()));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(vacant) => {
                vacant.insert(key);
            }
        }
        find_nested_clash(value)?;
    }
    Ok(())
}

// Already-wrapped maps cannot hold clashing keys, so only plain mappings
// and sequences need a look.
fn find_nested_clash(value: &Value) -> Result<(), KeyClashError> {
    match value {
        Value::Plain(plain) => find_clash(plain.iter()),
        Value::Sequence(items) => items.iter().try_for_each(find_nested_clash),
        _ => Ok(()),
    }
}
