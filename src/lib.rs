//! # insensitive-map
//!
//! A key-normalizing map: keys that differ only by ASCII letter case or by
//! spaces versus underscores address the same entry, while the key is kept
//! exactly as the caller last supplied it.
//!
//! ## Overview
//!
//! - [`InsensitiveMap`]: the map itself
//! - [`Key`]: the closed set of key shapes, and [`Key::normalize`]
//! - [`Value`]: scalars, sequences, and nested maps
//! - [`PlainMap`]: an ordinary insertion-ordered mapping used for input and
//!   output
//! - [`InsensitiveMapError`]: rejected safe-mode values, key clashes, and
//!   missing required keys
//!
//! Nested mappings stored in an [`InsensitiveMap`] are converted into
//! insensitive maps themselves, so lookups are insensitive at every depth.
//!
//! ## Feature Flags
//!
//! - `arc`: use `Arc` for the default producer, making the map `Send + Sync`
//! - `serde`: `Serialize`/`Deserialize` implementations
//! - `fxhash`: use `FxHash` for the lookup table
//! - `ahash`: use `AHash` for the lookup table
//! - `full`: enable `serde`
//!
//! ## Example
//!
//! ```rust
//! use insensitive_map::{InsensitiveMap, Key, Value, plain_map};
//!
//! let mut headers = InsensitiveMap::new();
//! headers.set("Content Type", "text/html");
//! headers.set(Key::symbol("Cache_Control"), "no-cache");
//!
//! assert_eq!(headers.get("content_type"), Some(&Value::from("text/html")));
//! assert_eq!(headers.get("CACHE CONTROL"), Some(&Value::from("no-cache")));
//!
//! headers.set_safe_mode(true);
//! let clash = headers.merge_in(plain_map! { "Accept" => "*/*", "ACCEPT" => "text/*" });
//! assert!(clash.is_err());
//! assert!(!headers.has_key("accept"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use insensitive_map::prelude::*;
///
/// let map: InsensitiveMap = insensitive_map! { "A" => 1 };
/// assert_eq!(map.get("a"), Some(&Value::Integer(1)));
/// ```
pub mod prelude {
    pub use crate::error::{InsensitiveMapError, KeyClashError};
    pub use crate::key::Key;
    pub use crate::map::{InsensitiveMap, Options};
    pub use crate::value::{PlainMap, Value};
    pub use crate::{insensitive_map, plain_map};
}

mod error;
mod hasher;
mod key;
mod macros;
mod map;
mod value;

#[cfg(feature = "serde")]
mod serde_support;

pub use error::{InsensitiveMapError, KeyClashError};
pub use key::{Key, normalize_text};
pub use map::{InsensitiveMap, InsensitiveMapIntoIterator, InsensitiveMapIterator, Options};
pub use value::{PlainMap, Value};
