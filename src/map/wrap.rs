//! Recursive wrapping of stored values.
//!
//! Every value stored in an [`InsensitiveMap`] passes through [`wrap`]:
//!
//! - a nested [`InsensitiveMap`] is kept, with the parent's safe mode stamped
//!   onto it and every map nested below it
//! - a [`PlainMap`](crate::PlainMap) becomes a new [`InsensitiveMap`] in the
//!   parent's safe mode, built recursively from the plain entries
//! - a sequence is wrapped element by element, keeping order and length
//! - scalars pass through unchanged

use crate::value::Value;

use super::InsensitiveMap;

pub(crate) fn wrap(value: Value, safe_mode: bool) -> Value {
    match value {
        Value::Map(mut map) => {
            map.stamp_safe_mode(safe_mode);
            Value::Map(map)
        }
        Value::Plain(plain) => {
            let mut map = InsensitiveMap::new();
            map.safe_mode = safe_mode;
            for (key, value) in plain {
                map.set(key, value);
            }
            Value::Map(map)
        }
        Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| wrap(item, safe_mode))
                .collect(),
        ),
        scalar => scalar,
    }
}

fn stamp_value(value: &mut Value, safe_mode: bool) {
    match value {
        Value::Map(map) => map.stamp_safe_mode(safe_mode),
        Value::Sequence(items) => {
            for item in items {
                stamp_value(item, safe_mode);
            }
        }
        _ => {}
    }
}

impl InsensitiveMap {
    fn stamp_safe_mode(&mut self, safe_mode: bool) {
        self.safe_mode = safe_mode;
        for slot in self.table.values_mut() {
            stamp_value(&mut slot.value, safe_mode);
        }
    }
}
