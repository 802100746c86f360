//! Error types for [`InsensitiveMap`](crate::InsensitiveMap) operations.
//!
//! Reads never fail on a missing key unless the caller asks for a required
//! lookup ([`fetch`](crate::InsensitiveMap::fetch)). Writes through `set` and
//! `delete` are total. The remaining failures are a rejected safe-mode value
//! and a key clash detected while merging in safe mode.

use std::fmt;

use crate::key::Key;

/// Two distinct incoming keys normalize to the same lookup key.
///
/// # Examples
///
/// ```rust
/// use insensitive_map::{Key, KeyClashError};
///
/// let error = KeyClashError::new(Key::from("Foo"), Key::from("foo"));
/// assert_eq!(
///     format!("{error}"),
///     "key clash detected: \"Foo\" and \"foo\" both normalize to \"foo\""
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyClashError {
    /// The shared normalized key.
    pub normalized: Key,
    /// The key seen first in the incoming mapping.
    pub first: Key,
    /// The key that collided with `first`.
    pub second: Key,
}

impl KeyClashError {
    /// Creates a clash error for two colliding keys.
    pub fn new(first: Key, second: Key) -> Self {
        Self {
            normalized: first.normalize(),
            first,
            second,
        }
    }
}

impl fmt::Display for KeyClashError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "key clash detected: {} and {} both normalize to {}",
            self.first, self.second, self.normalized
        )
    }
}

impl std::error::Error for KeyClashError {}

/// Errors raised by [`InsensitiveMap`](crate::InsensitiveMap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsensitiveMapError {
    /// Safe mode was given something other than a boolean.
    InvalidModeValue {
        /// Type name of the rejected value.
        found: &'static str,
    },
    /// A safe-mode merge found colliding keys in the incoming mapping.
    KeyClash(KeyClashError),
    /// A required lookup found no entry.
    KeyNotFound {
        /// The key as requested.
        key: Key,
    },
}

impl fmt::Display for InsensitiveMapError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidModeValue { found } => {
                write!(formatter, "safe mode must be true or false, found {found}")
            }
            Self::KeyClash(error) => write!(formatter, "{error}"),
            Self::KeyNotFound { key } => write!(formatter, "key not found: {key}"),
        }
    }
}

impl std::error::Error for InsensitiveMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::KeyClash(error) => Some(error),
            _ => None,
        }
    }
}

impl From<KeyClashError> for InsensitiveMapError {
    fn from(error: KeyClashError) -> Self {
        Self::KeyClash(error)
    }
}
