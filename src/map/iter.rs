//! Iterators over `(original_key, value)` pairs.

use std::iter::FusedIterator;

use crate::key::Key;
use crate::value::Value;

use super::{InsensitiveMap, Slot};

/// Borrowing iterator over an [`InsensitiveMap`], in insertion order.
pub struct InsensitiveMapIterator<'a> {
    slots: indexmap::map::Values<'a, Key, Slot>,
}

impl<'a> InsensitiveMapIterator<'a> {
    pub(super) const fn new(slots: indexmap::map::Values<'a, Key, Slot>) -> Self {
        Self { slots }
    }
}

impl<'a> Iterator for InsensitiveMapIterator<'a> {
    type Item = (&'a Key, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next().map(|slot| (&slot.original, &slot.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl DoubleEndedIterator for InsensitiveMapIterator<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots
            .next_back()
            .map(|slot| (&slot.original, &slot.value))
    }
}

impl ExactSizeIterator for InsensitiveMapIterator<'_> {
    fn len(&self) -> usize {
        self.slots.len()
    }
}

impl FusedIterator for InsensitiveMapIterator<'_> {}

/// Owning iterator over an [`InsensitiveMap`], in insertion order.
pub struct InsensitiveMapIntoIterator {
    slots: indexmap::map::IntoValues<Key, Slot>,
}

impl Iterator for InsensitiveMapIntoIterator {
    type Item = (Key, Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next().map(|slot| (slot.original, slot.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl DoubleEndedIterator for InsensitiveMapIntoIterator {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots
            .next_back()
            .map(|slot| (slot.original, slot.value))
    }
}

impl ExactSizeIterator for InsensitiveMapIntoIterator {
    fn len(&self) -> usize {
        self.slots.len()
    }
}

impl FusedIterator for InsensitiveMapIntoIterator {}

impl IntoIterator for InsensitiveMap {
    type Item = (Key, Value);
    type IntoIter = InsensitiveMapIntoIterator;

    fn into_iter(self) -> Self::IntoIter {
        InsensitiveMapIntoIterator {
            slots: self.table.into_values(),
        }
    }
}

impl<'a> IntoIterator for &'a InsensitiveMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = InsensitiveMapIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
