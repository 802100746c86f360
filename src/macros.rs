//! Literal construction macros.

/// Builds a [`PlainMap`](crate::PlainMap) from `key => value` pairs.
///
/// Keys go through [`Key::from`](crate::Key) and values through
/// [`Value::from`](crate::Value), so string, integer, and boolean literals
/// work directly. Nested `plain_map!` invocations build nested mappings.
///
/// # Examples
///
/// ```rust
/// use insensitive_map::{Key, Value, plain_map};
///
/// let plain = plain_map! {
///     "Name" => "config",
///     "Limits" => plain_map! { "Max Size" => 10 },
/// };
/// assert_eq!(plain.len(), 2);
/// assert_eq!(plain[&Key::from("Name")], Value::from("config"));
/// ```
#[macro_export]
macro_rules! plain_map {
    () => {
        $crate::PlainMap::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut plain = $crate::PlainMap::new();
        $(
            plain.insert($crate::Key::from($key), $crate::Value::from($value));
        )+
        plain
    }};
}

/// Builds an [`InsensitiveMap`](crate::InsensitiveMap) from `key => value`
/// pairs, converting nested mappings recursively.
///
/// # Examples
///
/// ```rust
/// use insensitive_map::{Value, insensitive_map, plain_map};
///
/// let map = insensitive_map! {
///     "Database" => plain_map! { "Pool Size" => 5 },
/// };
/// assert_eq!(map["database"].get("POOL_SIZE"), Some(&Value::Integer(5)));
/// ```
#[macro_export]
macro_rules! insensitive_map {
    ($($tokens:tt)*) => {
        $crate::InsensitiveMap::from_plain($crate::plain_map!($($tokens)*))
    };
}
