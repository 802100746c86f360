//! Values stored in an [`InsensitiveMap`].
//!
//! [`Value`] is a closed tagged variant covering scalars, sequences, and
//! nested mappings. A nested mapping arrives either as an [`InsensitiveMap`]
//! or as a [`PlainMap`]; the map converts plain mappings into insensitive
//! ones when the value is stored, so a stored value never holds a
//! [`Value::Plain`].

use std::fmt;

use indexmap::IndexMap;

use crate::key::Key;
use crate::map::InsensitiveMap;

/// An ordinary, insertion-ordered mapping that compares keys exactly.
pub type PlainMap = IndexMap<Key, Value>;

/// A value held by an [`InsensitiveMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    Nil,
    /// A boolean.
    Boolean(bool),
    /// An integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Text(String),
    /// A symbolic identifier.
    Symbol(String),
    /// An ordered sequence of values.
    Sequence(Vec<Value>),
    /// A plain (case-sensitive) mapping, accepted as input only.
    Plain(PlainMap),
    /// A nested insensitive mapping.
    Map(InsensitiveMap),
}

impl Value {
    /// Returns a short name for the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Symbol(_) => "symbol",
            Self::Sequence(_) => "sequence",
            Self::Plain(_) => "plain map",
            Self::Map(_) => "map",
        }
    }

    /// Returns `true` for [`Value::Nil`].
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns the boolean, if this is one.
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(integer) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the float, if this is one.
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(float) => Some(*float),
            _ => None,
        }
    }

    /// Returns the text of a string or symbol value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Symbol(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements of a sequence.
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested insensitive map.
    pub const fn as_map(&self) -> Option<&InsensitiveMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the nested insensitive map mutably.
    pub const fn as_map_mut(&mut self) -> Option<&mut InsensitiveMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` in a nested insensitive map.
    ///
    /// Returns `None` when this value is not a map or the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use insensitive_map::{InsensitiveMap, Value, plain_map};
    ///
    /// let mut map = InsensitiveMap::new();
    /// map.set("outer", plain_map! { "Inner Key" => 1 });
    ///
    /// let inner = map.get("OUTER").and_then(|outer| outer.get("inner_key"));
    /// assert_eq!(inner, Some(&Value::Integer(1)));
    /// ```
    pub fn get(&self, key: impl Into<Key>) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(formatter, "nil"),
            Self::Boolean(boolean) => write!(formatter, "{boolean}"),
            Self::Integer(integer) => write!(formatter, "{integer}"),
            Self::Float(float) => write!(formatter, "{float:?}"),
            Self::Text(text) => write!(formatter, "{text:?}"),
            Self::Symbol(name) => write!(formatter, ":{name}"),
            Self::Sequence(items) => {
                write!(formatter, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{item}")?;
                }
                write!(formatter, "]")
            }
            Self::Plain(plain) => {
                write!(formatter, "{{")?;
                for (index, (key, value)) in plain.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{key} => {value}")?;
                }
                write!(formatter, "}}")
            }
            Self::Map(map) => write!(formatter, "{map}"),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Nil
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Self::Boolean(boolean)
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Self::Integer(integer)
    }
}

impl From<i32> for Value {
    fn from(integer: i32) -> Self {
        Self::Integer(i64::from(integer))
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Self::Float(float)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Nil, Into::into)
    }
}

impl From<PlainMap> for Value {
    fn from(plain: PlainMap) -> Self {
        Self::Plain(plain)
    }
}

impl From<InsensitiveMap> for Value {
    fn from(map: InsensitiveMap) -> Self {
        Self::Map(map)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plain_map;
    use rstest::rstest;

    #[rstest]
    fn test_conversions() {
        assert_eq!(Value::from(1), Value::Integer(1));
        assert_eq!(Value::from("a"), Value::Text("a".to_string()));
        assert_eq!(Value::from(None::<i64>), Value::Nil);
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::Sequence(vec![Value::Integer(1), Value::Integer(2)])
        );
    }

    #[rstest]
    fn test_type_name() {
        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(Value::from(plain_map! {}).type_name(), "plain map");
        assert_eq!(Value::from(InsensitiveMap::new()).type_name(), "map");
    }

    #[rstest]
    fn test_display_nested() {
        let value = Value::from(plain_map! { "a" => vec![1, 2], "b" => () });
        assert_eq!(value.to_string(), "{\"a\" => [1, 2], \"b\" => nil}");
    }

    #[rstest]
    fn test_get_on_scalar_is_none() {
        assert_eq!(Value::from(1).get("anything"), None);
    }
}
