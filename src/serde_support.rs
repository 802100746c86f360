//! `serde` support, enabled by the `serde` feature.
//!
//! An [`InsensitiveMap`] serializes as a map of original keys to values and
//! deserializes through [`InsensitiveMap::set`], so nested maps are converted
//! and equivalent keys resolve to the last one read.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::key::Key;
use crate::map::InsensitiveMap;
use crate::value::{PlainMap, Value};

// =============================================================================
// Serialize
// =============================================================================

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Nil => serializer.serialize_unit(),
            Self::Boolean(boolean) => serializer.serialize_bool(*boolean),
            Self::Integer(integer) => serializer.serialize_i64(*integer),
            Self::Text(text) | Self::Symbol(text) => serializer.serialize_str(text),
            Self::Tuple(components) => {
                let mut sequence = serializer.serialize_seq(Some(components.len()))?;
                for component in components {
                    sequence.serialize_element(component)?;
                }
                sequence.end()
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Nil => serializer.serialize_unit(),
            Self::Boolean(boolean) => serializer.serialize_bool(*boolean),
            Self::Integer(integer) => serializer.serialize_i64(*integer),
            Self::Float(float) => serializer.serialize_f64(*float),
            Self::Text(text) | Self::Symbol(text) => serializer.serialize_str(text),
            Self::Sequence(items) => {
                let mut sequence = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    sequence.serialize_element(item)?;
                }
                sequence.end()
            }
            Self::Plain(plain) => {
                let mut map = serializer.serialize_map(Some(plain.len()))?;
                for (key, value) in plain {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Map(insensitive) => insensitive.serialize(serializer),
        }
    }
}

impl Serialize for InsensitiveMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Deserialize
// =============================================================================

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, integer, boolean, unit, or sequence key")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Key, E> {
        Ok(Key::Nil)
    }

    fn visit_none<E: de::Error>(self) -> Result<Key, E> {
        Ok(Key::Nil)
    }

    fn visit_bool<E: de::Error>(self, boolean: bool) -> Result<Key, E> {
        Ok(Key::Boolean(boolean))
    }

    fn visit_i64<E: de::Error>(self, integer: i64) -> Result<Key, E> {
        Ok(Key::Integer(integer))
    }

    fn visit_u64<E: de::Error>(self, integer: u64) -> Result<Key, E> {
        i64::try_from(integer)
            .map(Key::Integer)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(integer), &self))
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<Key, E> {
        Ok(Key::from(text))
    }

    fn visit_string<E: de::Error>(self, text: String) -> Result<Key, E> {
        Ok(Key::Text(text))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Key, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut components = Vec::new();
        while let Some(component) = access.next_element()? {
            components.push(component);
        }
        Ok(Key::Tuple(components))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, boolean: bool) -> Result<Value, E> {
        Ok(Value::Boolean(boolean))
    }

    fn visit_i64<E: de::Error>(self, integer: i64) -> Result<Value, E> {
        Ok(Value::Integer(integer))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, integer: u64) -> Result<Value, E> {
        Ok(i64::try_from(integer).map_or(Value::Float(integer as f64), Value::Integer))
    }

    fn visit_f64<E: de::Error>(self, float: f64) -> Result<Value, E> {
        Ok(Value::Float(float))
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<Value, E> {
        Ok(Value::from(text))
    }

    fn visit_string<E: de::Error>(self, text: String) -> Result<Value, E> {
        Ok(Value::Text(text))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(item) = access.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut plain = PlainMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            plain.insert(key, value);
        }
        Ok(Value::Plain(plain))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct InsensitiveMapVisitor {
    marker: PhantomData<InsensitiveMap>,
}

impl InsensitiveMapVisitor {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de> Visitor<'de> for InsensitiveMapVisitor {
    type Value = InsensitiveMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = InsensitiveMap::new();
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            map.set(key, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for InsensitiveMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(InsensitiveMapVisitor::new())
    }
}
