//! Missing-key fallback: a default value or a default producer.
//!
//! A map holds at most one of the two. Setting one replaces the other, and
//! neither is consulted unless a lookup has confirmed the key is absent.

use std::borrow::Cow;
use std::fmt;

use crate::key::Key;
use crate::value::Value;

use super::InsensitiveMap;

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc` and producers
/// must be `Send + Sync`. Otherwise it is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

#[cfg(feature = "arc")]
pub(crate) type Producer = ReferenceCounter<dyn Fn(&Key) -> Value + Send + Sync>;

#[cfg(not(feature = "arc"))]
pub(crate) type Producer = ReferenceCounter<dyn Fn(&Key) -> Value>;

#[derive(Clone, Default)]
pub(crate) enum Fallback {
    #[default]
    None,
    Value(Box<Value>),
    Producer(Producer),
}

impl Fallback {
    pub(crate) fn resolve(&self, key: &Key) -> Option<Cow<'_, Value>> {
        match self {
            Self::None => None,
            Self::Value(value) => Some(Cow::Borrowed(value.as_ref())),
            Self::Producer(producer) => Some(Cow::Owned(producer(key))),
        }
    }
}

impl fmt::Debug for Fallback {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(formatter, "None"),
            Self::Value(value) => formatter.debug_tuple("Value").field(value).finish(),
            Self::Producer(_) => write!(formatter, "Producer(..)"),
        }
    }
}

impl InsensitiveMap {
    /// Sets the value returned by [`lookup`](Self::lookup) for absent keys.
    ///
    /// Clears any default producer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Value};
    ///
    /// let mut map = InsensitiveMap::new();
    /// map.set_default(0);
    /// assert_eq!(map.lookup("missing").as_deref(), Some(&Value::Integer(0)));
    /// assert_eq!(map.get("missing"), None);
    /// ```
    pub fn set_default(&mut self, value: impl Into<Value>) {
        self.fallback = Fallback::Value(Box::new(value.into()));
    }

    /// Sets a function that produces the value for absent keys.
    ///
    /// The producer receives the key exactly as it was requested. Clears any
    /// default value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Key, Value};
    ///
    /// let mut map = InsensitiveMap::new();
    /// map.set_default_producer(|key: &Key| Value::from(format!("no {key}")));
    /// assert_eq!(
    ///     map.lookup("Colour").as_deref(),
    ///     Some(&Value::from("no \"Colour\""))
    /// );
    /// ```
    #[cfg(not(feature = "arc"))]
    pub fn set_default_producer<F>(&mut self, producer: F)
    where
        F: Fn(&Key) -> Value + 'static,
    {
        self.fallback = Fallback::Producer(ReferenceCounter::new(producer));
    }

    /// Sets a function that produces the value for absent keys.
    ///
    /// The producer receives the key exactly as it was requested. Clears any
    /// default value.
    #[cfg(feature = "arc")]
    pub fn set_default_producer<F>(&mut self, producer: F)
    where
        F: Fn(&Key) -> Value + Send + Sync + 'static,
    {
        self.fallback = Fallback::Producer(ReferenceCounter::new(producer));
    }

    /// Removes the default value or producer.
    pub fn clear_default(&mut self) {
        self.fallback = Fallback::None;
    }

    /// Returns the stored default value, if one is set.
    pub fn default_value(&self) -> Option<&Value> {
        match &self.fallback {
            Fallback::Value(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Returns `true` if a default producer is set.
    pub const fn has_default_producer(&self) -> bool {
        matches!(self.fallback, Fallback::Producer(_))
    }

    /// Returns what a lookup of the absent `key` would yield, without
    /// checking whether the key is actually present.
    pub fn default_for(&self, key: impl Into<Key>) -> Option<Value> {
        self.fallback
            .resolve(&key.into())
            .map(Cow::into_owned)
    }
}
