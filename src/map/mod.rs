//! The insensitive map.
//!
//! This module provides [`InsensitiveMap`], a mapping that treats keys
//! differing only by ASCII case or by space/underscore substitution as the
//! same key, while remembering the key exactly as the caller supplied it.
//!
//! # Overview
//!
//! Each entry is stored under its [normalized](Key::normalize) key together
//! with its original key. The normalized key is used for every lookup; the
//! original key is what iteration and [`to_plain_mapping`] hand back. Setting
//! an equivalent key replaces both the value and the stored original key.
//!
//! Values that are mappings are converted into insensitive maps when stored,
//! at every depth, including mappings inside sequences.
//!
//! | Operation          | Complexity          |
//! |--------------------|---------------------|
//! | `set`              | O(k) + O(wrap)      |
//! | `get` / `has_key`  | O(k)                |
//! | `delete`           | O(n)                |
//! | `len` / `is_empty` | O(1)                |
//!
//! where `k` is the key length.
//!
//! # Examples
//!
//! ```rust
//! use insensitive_map::{InsensitiveMap, Key, Value, plain_map};
//!
//! let mut map = InsensitiveMap::new();
//! map.set("Foo Bar", 1);
//!
//! assert_eq!(map.get("foo_bar"), Some(&Value::Integer(1)));
//! assert_eq!(map.get(Key::symbol("FOO_BAR")), Some(&Value::Integer(1)));
//!
//! map.set("FOO BAR", 2);
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.keys().next(), Some(&Key::from("FOO BAR")));
//!
//! map.set("outer", plain_map! { "Inner Key" => 3 });
//! assert_eq!(map["OUTER"].get("inner_key"), Some(&Value::Integer(3)));
//! ```
//!
//! [`to_plain_mapping`]: InsensitiveMap::to_plain_mapping

mod fallback;
mod iter;
mod merge;
mod wrap;

use std::borrow::Cow;
use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;

use crate::error::InsensitiveMapError;
use crate::hasher::TableHasher;
use crate::key::Key;
use crate::value::{PlainMap, Value};

use fallback::Fallback;

pub use iter::{InsensitiveMapIntoIterator, InsensitiveMapIterator};

/// Construction options.
///
/// # Examples
///
/// ```rust
/// use insensitive_map::{InsensitiveMap, Options};
///
/// let map = InsensitiveMap::with_options(Options::new().safe_mode(true));
/// assert!(map.is_safe_mode());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    safe_mode: bool,
}

impl Options {
    /// Creates the default options: safe mode off.
    pub const fn new() -> Self {
        Self { safe_mode: false }
    }

    /// Enables or disables clash detection on merge.
    #[must_use]
    pub const fn safe_mode(mut self, safe_mode: bool) -> Self {
        self.safe_mode = safe_mode;
        self
    }
}

/// An entry: the value and the key it was last stored under.
#[derive(Debug, Clone, PartialEq)]
struct Slot {
    original: Key,
    value: Value,
}

/// A mapping whose keys match regardless of ASCII case and of spaces versus
/// underscores.
///
/// See the [module documentation](self) for an overview.
#[derive(Clone)]
pub struct InsensitiveMap {
    /// Normalized key to entry, in insertion order of the first-seen key
    table: IndexMap<Key, Slot, TableHasher>,
    safe_mode: bool,
    fallback: Fallback,
}

impl InsensitiveMap {
    /// Creates an empty map with safe mode off.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::InsensitiveMap;
    ///
    /// let map = InsensitiveMap::new();
    /// assert!(map.is_empty());
    /// assert!(!map.is_safe_mode());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: IndexMap::default(),
            safe_mode: false,
            fallback: Fallback::None,
        }
    }

    /// Creates an empty map configured by `options`.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        let mut map = Self::new();
        map.safe_mode = options.safe_mode;
        map
    }

    /// Builds a map from a plain mapping, converting nested mappings at
    /// every depth. Equivalent keys in `plain` resolve to the last one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Value, plain_map};
    ///
    /// let map = InsensitiveMap::from_plain(plain_map! {
    ///     "Server" => plain_map! { "Host Name" => "localhost" },
    /// });
    /// assert_eq!(
    ///     map["server"].get("HOST_NAME"),
    ///     Some(&Value::from("localhost"))
    /// );
    /// ```
    #[must_use]
    pub fn from_plain(plain: PlainMap) -> Self {
        let mut map = Self::new();
        for (key, value) in plain {
            map.set(key, value);
        }
        map
    }

    /// Builds a map from a plain mapping with the given options.
    ///
    /// # Errors
    ///
    /// With safe mode enabled, returns [`InsensitiveMapError::KeyClash`] if
    /// `plain` or any mapping nested in it has equivalent keys.
    pub fn from_plain_with_options(
        plain: PlainMap,
        options: Options,
    ) -> Result<Self, InsensitiveMapError> {
        let mut map = Self::with_options(options);
        map.merge_recursive(plain)?;
        Ok(map)
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns `true` if merges reject clashing incoming keys.
    #[inline]
    pub const fn is_safe_mode(&self) -> bool {
        self.safe_mode
    }

    /// Enables or disables clash detection on merge.
    ///
    /// The mode is not pushed into maps already nested in this one; nested
    /// maps pick it up when they are stored.
    pub fn set_safe_mode(&mut self, safe_mode: bool) {
        self.safe_mode = safe_mode;
    }

    /// Sets safe mode from a dynamically typed value.
    ///
    /// # Errors
    ///
    /// Returns [`InsensitiveMapError::InvalidModeValue`] unless `value` is a
    /// [`Value::Boolean`]. The mode is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, InsensitiveMapError, Value};
    ///
    /// let mut map = InsensitiveMap::new();
    /// assert!(map.set_safe_mode_from(&Value::Boolean(true)).is_ok());
    /// assert_eq!(
    ///     map.set_safe_mode_from(&Value::from("yes")),
    ///     Err(InsensitiveMapError::InvalidModeValue { found: "text" })
    /// );
    /// assert!(map.is_safe_mode());
    /// ```
    pub fn set_safe_mode_from(&mut self, value: &Value) -> Result<(), InsensitiveMapError> {
        let safe_mode = value
            .as_boolean()
            .ok_or(InsensitiveMapError::InvalidModeValue {
                found: value.type_name(),
            })?;
        self.safe_mode = safe_mode;
        Ok(())
    }

    /// Stores `value` under `key`, returning the previous value at an
    /// equivalent key.
    ///
    /// `key` becomes the entry's original key even if an equivalent key was
    /// stored before. Mappings in `value` are converted into insensitive maps
    /// that take this map's safe mode. An entry keeps its position when it is
    /// overwritten.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Key, Value};
    ///
    /// let mut map = InsensitiveMap::new();
    /// assert_eq!(map.set("Foo", 1), None);
    /// assert_eq!(map.set("FOO", 2), Some(Value::Integer(1)));
    ///
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.keys().collect::<Vec<_>>(), vec![&Key::from("FOO")]);
    /// ```
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let value = self.wrap(value.into());
        self.store(key.into(), value)
    }

    /// Returns the value stored at a key equivalent to `key`.
    ///
    /// Does not consult the default; see [`lookup`](Self::lookup).
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.slot(&key.into()).map(|slot| &slot.value)
    }

    /// Returns the nested map stored at `key`, mutably.
    ///
    /// Only nested maps are reachable mutably, so stored values can never be
    /// turned back into plain mappings.
    pub fn get_map_mut(&mut self, key: impl Into<Key>) -> Option<&mut Self> {
        self.table
            .get_mut(&key.into().normalize())
            .and_then(|slot| slot.value.as_map_mut())
    }

    /// Returns the stored value, or the default for an absent key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Value};
    ///
    /// let mut map = InsensitiveMap::new();
    /// map.set("present", 1);
    /// map.set_default(-1);
    ///
    /// assert_eq!(map.lookup("PRESENT").as_deref(), Some(&Value::Integer(1)));
    /// assert_eq!(map.lookup("absent").as_deref(), Some(&Value::Integer(-1)));
    /// ```
    pub fn lookup(&self, key: impl Into<Key>) -> Option<Cow<'_, Value>> {
        let key = key.into();
        match self.slot(&key) {
            Some(slot) => Some(Cow::Borrowed(&slot.value)),
            None => self.fallback.resolve(&key),
        }
    }

    /// Returns `true` if a key equivalent to `key` is present.
    pub fn has_key(&self, key: impl Into<Key>) -> bool {
        self.table.contains_key(&key.into().normalize())
    }

    /// Same as [`has_key`](Self::has_key).
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.has_key(key)
    }

    /// Resolves `key` to the original key stored for it, or returns `key`
    /// itself when no equivalent key is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Key};
    ///
    /// let mut map = InsensitiveMap::new();
    /// map.set("Content Type", "text/plain");
    ///
    /// assert_eq!(map.lookup_key("content_type"), Key::from("Content Type"));
    /// assert_eq!(map.lookup_key("Accept"), Key::from("Accept"));
    /// ```
    pub fn lookup_key(&self, key: impl Into<Key>) -> Key {
        let key = key.into();
        self.original_key(&key).cloned().unwrap_or(key)
    }

    /// Returns the original key stored for `key`, if any.
    pub fn original_key(&self, key: &Key) -> Option<&Key> {
        self.slot(key).map(|slot| &slot.original)
    }

    /// Iterates the key registry: each normalized key with its original key.
    pub fn key_registry(&self) -> impl Iterator<Item = (&Key, &Key)> {
        self.table
            .iter()
            .map(|(normalized, slot)| (normalized, &slot.original))
    }

    /// Removes the entry at a key equivalent to `key`, returning its value.
    ///
    /// Removing an absent key does nothing and returns `None`.
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.evict(&key.into()).map(|(_, value)| value)
    }

    /// Removes the entry at `key`, or returns `handler(key)` when absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Key, Value};
    ///
    /// let mut map = InsensitiveMap::new();
    /// let value = map.delete_or_else("ghost", |key: &Key| Value::from(format!("{key} not found")));
    /// assert_eq!(value, Value::from("\"ghost\" not found"));
    /// ```
    pub fn delete_or_else<F>(&mut self, key: impl Into<Key>, handler: F) -> Value
    where
        F: FnOnce(&Key) -> Value,
    {
        let key = key.into();
        match self.evict(&key) {
            Some((_, value)) => value,
            None => handler(&key),
        }
    }

    /// Returns the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`InsensitiveMapError::KeyNotFound`] if no equivalent key is
    /// present. The default is not consulted.
    pub fn fetch(&self, key: impl Into<Key>) -> Result<&Value, InsensitiveMapError> {
        let key = key.into();
        self.slot(&key)
            .map(|slot| &slot.value)
            .ok_or(InsensitiveMapError::KeyNotFound { key })
    }

    /// Returns the value at `key`, or `fallback` when absent.
    pub fn fetch_or(&self, key: impl Into<Key>, fallback: impl Into<Value>) -> Cow<'_, Value> {
        self.get(key)
            .map_or_else(|| Cow::Owned(fallback.into()), Cow::Borrowed)
    }

    /// Returns the value at `key`, or `handler(key)` when absent.
    pub fn fetch_or_else<F>(&self, key: impl Into<Key>, handler: F) -> Cow<'_, Value>
    where
        F: FnOnce(&Key) -> Value,
    {
        let key = key.into();
        match self.slot(&key) {
            Some(slot) => Cow::Borrowed(&slot.value),
            None => Cow::Owned(handler(&key)),
        }
    }

    /// Looks up several keys at once, applying the default to absent ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Value};
    ///
    /// let mut map = InsensitiveMap::new();
    /// map.set("A", 1);
    /// map.set("B", 2);
    ///
    /// let values: Vec<_> = map
    ///     .values_at(["b", "c", "a"])
    ///     .into_iter()
    ///     .map(|value| value.map(|value| value.into_owned()))
    ///     .collect();
    /// assert_eq!(values, vec![Some(Value::Integer(2)), None, Some(Value::Integer(1))]);
    /// ```
    pub fn values_at<I, K>(&self, keys: I) -> Vec<Option<Cow<'_, Value>>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        keys.into_iter().map(|key| self.lookup(key)).collect()
    }

    /// Returns the original key and value stored at `key`.
    pub fn assoc(&self, key: impl Into<Key>) -> Option<(&Key, &Value)> {
        self.slot(&key.into())
            .map(|slot| (&slot.original, &slot.value))
    }

    /// Removes every entry. Safe mode and the default are kept.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Removes and returns the first entry in iteration order.
    pub fn shift(&mut self) -> Option<(Key, Value)> {
        self.table
            .shift_remove_index(0)
            .map(|(_, slot)| (slot.original, slot.value))
    }

    /// Replaces this map's contents with `other`'s entries, safe mode, and
    /// default.
    pub fn replace(&mut self, other: Self) {
        *self = other;
        self.rebuild_registry();
    }

    /// Replaces this map's contents with the entries of a plain mapping.
    ///
    /// Safe mode and the default are kept. Nested mappings are converted, and
    /// equivalent keys in `plain` resolve to the last one.
    pub fn replace_with_plain(&mut self, plain: PlainMap) {
        self.table.clear();
        for (key, value) in plain {
            self.set(key, value);
        }
    }

    /// Returns an ordinary mapping from original keys to values.
    ///
    /// Only the top level is converted: nested maps stay insensitive. See
    /// [`to_plain_mapping_deep`](Self::to_plain_mapping_deep).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Key, Value};
    ///
    /// let mut map = InsensitiveMap::new();
    /// map.set("Foo", 1);
    /// map.set("FOO", 2);
    ///
    /// let plain = map.to_plain_mapping();
    /// assert_eq!(plain.get(&Key::from("FOO")), Some(&Value::Integer(2)));
    /// assert_eq!(plain.get(&Key::from("foo")), None);
    /// ```
    pub fn to_plain_mapping(&self) -> PlainMap {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Same as [`to_plain_mapping`](Self::to_plain_mapping).
    pub fn to_sensitive(&self) -> PlainMap {
        self.to_plain_mapping()
    }

    /// Returns an ordinary mapping with every nested map, including maps
    /// inside sequences, converted as well.
    pub fn to_plain_mapping_deep(&self) -> PlainMap {
        fn flatten(value: &Value) -> Value {
            match value {
                Value::Map(map) => Value::Plain(map.to_plain_mapping_deep()),
                Value::Sequence(items) => Value::Sequence(items.iter().map(flatten).collect()),
                other => other.clone(),
            }
        }

        self.iter()
            .map(|(key, value)| (key.clone(), flatten(value)))
            .collect()
    }

    /// Iterates the original keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.table.values().map(|slot| &slot.original)
    }

    /// Iterates the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.table.values().map(|slot| &slot.value)
    }

    /// Iterates `(original_key, value)` pairs in insertion order.
    pub fn iter(&self) -> InsensitiveMapIterator<'_> {
        InsensitiveMapIterator::new(self.table.values())
    }

    fn wrap(&self, value: Value) -> Value {
        wrap::wrap(value, self.safe_mode)
    }

    fn slot(&self, key: &Key) -> Option<&Slot> {
        self.table.get(&key.normalize())
    }

    /// Stores an already wrapped value.
    fn store(&mut self, original: Key, value: Value) -> Option<Value> {
        let normalized = original.normalize();
        if let Some(slot) = self.table.get_mut(&normalized) {
            if slot.original != original {
                tracing::trace!(
                    previous = %slot.original,
                    current = %original,
                    "replacing original key"
                );
                slot.original = original;
            }
            return Some(std::mem::replace(&mut slot.value, value));
        }
        self.table.insert(normalized, Slot { original, value });
        None
    }

    fn evict(&mut self, key: &Key) -> Option<(Key, Value)> {
        self.table
            .shift_remove(&key.normalize())
            .map(|slot| (slot.original, slot.value))
    }

    /// Re-derives every normalized key from the stored original keys.
    fn rebuild_registry(&mut self) {
        let slots = std::mem::take(&mut self.table);
        tracing::trace!(entries = slots.len(), "rebuilding key registry");
        for (_, slot) in slots {
            self.store(slot.original, slot.value);
        }
    }
}

impl Default for InsensitiveMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for InsensitiveMap {
    /// Maps are equal when they hold equal values at the same normalized
    /// keys. Original key spelling, order, safe mode, and defaults are
    /// ignored.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.table.iter().all(|(normalized, slot)| {
                other
                    .table
                    .get(normalized)
                    .is_some_and(|other_slot| other_slot.value == slot.value)
            })
    }
}

impl fmt::Debug for InsensitiveMap {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_map();
        for (key, value) in self {
            debug.entry(key, value);
        }
        debug.finish()
    }
}

impl fmt::Display for InsensitiveMap {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key} => {value}")?;
        }
        write!(formatter, "}}")
    }
}

impl<K: Into<Key>> Index<K> for InsensitiveMap {
    type Output = Value;

    /// Returns the stored default value when no equivalent key is present.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent and no default value is set. A default
    /// producer is not consulted; use [`lookup`](InsensitiveMap::lookup).
    fn index(&self, key: K) -> &Value {
        self.get(key)
            .or_else(|| self.default_value())
            .expect("no entry found for key")
    }
}

impl From<PlainMap> for InsensitiveMap {
    fn from(plain: PlainMap) -> Self {
        Self::from_plain(plain)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for InsensitiveMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Stores each pair through [`set`](InsensitiveMap::set).
///
/// Equivalent keys resolve to the last one even in safe mode, since `extend`
/// cannot fail. Use [`merge_in`](InsensitiveMap::merge_in) to have clashes
/// rejected.
impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for InsensitiveMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

// The default producer is reference counted with `Rc` unless `arc` is on.
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(InsensitiveMap: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(InsensitiveMap: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
