//! Hasher selection for the lookup table.
//!
//! The `fxhash` feature selects `rustc_hash::FxBuildHasher`, the `ahash`
//! feature selects `ahash::RandomState`. Without either, the standard
//! library's SipHash-based `RandomState` is used. When both features are
//! enabled `fxhash` takes precedence.

#[cfg(feature = "fxhash")]
pub(crate) type TableHasher = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type TableHasher = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type TableHasher = std::hash::RandomState;
