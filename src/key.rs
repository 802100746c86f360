//! Keys and key normalization.
//!
//! This module provides [`Key`], the closed set of key shapes an
//! [`InsensitiveMap`](crate::InsensitiveMap) accepts, and the normalization
//! rule that decides when two keys are the same key.
//!
//! # Normalization
//!
//! Textual keys ([`Key::Text`] and [`Key::Symbol`]) are normalized by
//! lowercasing ASCII letters and replacing every space with an underscore.
//! The result is always a [`Key::Text`], so a symbol and a string that
//! normalize identically address the same entry. Every other key is its own
//! normal form.
//!
//! ```rust
//! use insensitive_map::Key;
//!
//! assert_eq!(Key::from("Foo Bar").normalize(), Key::from("foo_bar"));
//! assert_eq!(Key::symbol("FOO_BAR").normalize(), Key::from("foo_bar"));
//! assert_eq!(Key::from(42).normalize(), Key::from(42));
//! ```

use std::fmt;

/// A map key.
///
/// Keys are compared by value. Two keys address the same map entry if and
/// only if their [normalized](Key::normalize) forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// The nil key.
    Nil,
    /// A boolean key.
    Boolean(bool),
    /// An integer key.
    Integer(i64),
    /// A string key.
    Text(String),
    /// A symbolic identifier key.
    Symbol(String),
    /// A compound key. Compound keys are never normalized, not even their
    /// textual components.
    Tuple(Vec<Key>),
}

impl Key {
    /// Creates a symbolic key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::Key;
    ///
    /// let key = Key::symbol("name");
    /// assert!(key.is_textual());
    /// ```
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates a compound key.
    pub fn tuple(components: impl IntoIterator<Item = impl Into<Self>>) -> Self {
        Self::Tuple(components.into_iter().map(Into::into).collect())
    }

    /// Returns `true` for string and symbol keys.
    #[inline]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Symbol(_))
    }

    /// Returns the text of a string or symbol key.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Symbol(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the normalized form of this key.
    ///
    /// Normalization is pure and idempotent:
    /// `key.normalize().normalize() == key.normalize()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::Key;
    ///
    /// let key = Key::from("Content Type");
    /// assert_eq!(key.normalize(), Key::from("content_type"));
    /// assert_eq!(key.normalize().normalize(), key.normalize());
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Self {
        match self {
            Self::Text(text) | Self::Symbol(text) => Self::Text(normalize_text(text)),
            other => other.clone(),
        }
    }

    /// Returns `true` if both keys address the same entry.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.normalize() == other.normalize()
    }
}

/// Lowercases ASCII letters and replaces spaces with underscores.
///
/// Non-ASCII characters are left untouched.
///
/// # Examples
///
/// ```rust
/// use insensitive_map::normalize_text;
///
/// assert_eq!(normalize_text("Hello World"), "hello_world");
/// assert_eq!(normalize_text("ÉCOLE"), "École");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|character| {
            if character == ' ' {
                '_'
            } else {
                character.to_ascii_lowercase()
            }
        })
        .collect()
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(formatter, "nil"),
            Self::Boolean(boolean) => write!(formatter, "{boolean}"),
            Self::Integer(integer) => write!(formatter, "{integer}"),
            Self::Text(text) => write!(formatter, "{text:?}"),
            Self::Symbol(name) => write!(formatter, ":{name}"),
            Self::Tuple(components) => {
                write!(formatter, "(")?;
                for (index, component) in components.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{component}")?;
                }
                write!(formatter, ")")
            }
        }
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Key {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<i64> for Key {
    fn from(integer: i64) -> Self {
        Self::Integer(integer)
    }
}

impl From<i32> for Key {
    fn from(integer: i32) -> Self {
        Self::Integer(i64::from(integer))
    }
}

impl From<bool> for Key {
    fn from(boolean: bool) -> Self {
        Self::Boolean(boolean)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}
