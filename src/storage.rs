//! Pluggable position-index backends
//!
//! An indexed heap keeps a side table mapping each value to the slot it
//! currently occupies in the heap's backing vector. This module abstracts over
//! that table so heaps can pick a memory/hashing strategy:
//!
//! - `HashMap<V, usize, S>`: any hashable value type, with any hasher. The
//!   heap's default is [`FxHashMap`](rustc_hash::FxHashMap), which is fast but
//!   not HashDoS-resistant; use `std::collections::hash_map::RandomState` when
//!   values come from untrusted input.
//! - [`DenseIndex`]: values that are small `usize` ids (node indices, vertex
//!   numbers) below a fixed limit. Lookups are a plain vector access with no
//!   hashing.
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::{DenseIndex, IndexedHeap, IndexedMinHeap};
//!
//! let mut heap: IndexedMinHeap<usize, u32, DenseIndex> = IndexedMinHeap::new();
//! heap.add(7, 30).unwrap();
//! heap.add(2, 10).unwrap();
//! assert!(heap.contains(&7));
//! assert_eq!(heap.poll(), Ok(2));
//! ```

use crate::traits::HeapError;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Trait for value-to-slot index backends
///
/// Implementations must provide expected O(1) lookup, insertion, in-place
/// update, and removal. The heap relies on [`len`](PositionIndex::len) being
/// the number of live mappings, not the allocated capacity.
pub trait PositionIndex<V>: Default {
    /// Creates an empty index sized for `capacity` values
    fn with_capacity(capacity: usize) -> Self;

    /// Number of values currently mapped
    fn len(&self) -> usize;

    /// Returns true if no value is mapped
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot currently recorded for `value`
    fn get(&self, value: &V) -> Option<usize>;

    /// Maps `value` to `slot`, returning the previous slot if there was one
    ///
    /// # Errors
    /// Returns [`HeapError::ValueOutOfRange`] if the backend cannot represent
    /// `value`. The index is left untouched in that case.
    fn insert(&mut self, value: V, slot: usize) -> Result<Option<usize>, HeapError>;

    /// Rewrites the slot of an already-mapped value, returning the old slot
    ///
    /// Returns `None` and leaves the index untouched if `value` is not mapped.
    /// Unlike [`insert`](PositionIndex::insert) this never needs an owned key.
    fn update(&mut self, value: &V, slot: usize) -> Option<usize>;

    /// Removes the mapping for `value`, returning its slot
    fn remove(&mut self, value: &V) -> Option<usize>;

    /// Removes every mapping
    fn clear(&mut self);
}

impl<V, S> PositionIndex<V> for HashMap<V, usize, S>
where
    V: Eq + Hash,
    S: BuildHasher + Default,
{
    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity_and_hasher(capacity, S::default())
    }

    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    #[inline]
    fn get(&self, value: &V) -> Option<usize> {
        HashMap::get(self, value).copied()
    }

    #[inline]
    fn insert(&mut self, value: V, slot: usize) -> Result<Option<usize>, HeapError> {
        Ok(HashMap::insert(self, value, slot))
    }

    #[inline]
    fn update(&mut self, value: &V, slot: usize) -> Option<usize> {
        self.get_mut(value).map(|current| std::mem::replace(current, slot))
    }

    #[inline]
    fn remove(&mut self, value: &V) -> Option<usize> {
        HashMap::remove(self, value)
    }

    fn clear(&mut self) {
        HashMap::clear(self)
    }
}

/// Largest table a default [`DenseIndex`] will grow to
pub const DEFAULT_DENSE_LIMIT: usize = 1 << 20;

/// Vector-backed index for dense `usize` values
///
/// Slot `i` of the table holds the heap position of value `i`. Only values in
/// `0..limit` can be stored; the limit is [`DEFAULT_DENSE_LIMIT`] unless set
/// with [`DenseIndex::with_limit`]. Adding a value at or above the limit fails
/// with [`HeapError::ValueOutOfRange`]. Memory grows with the largest value
/// inserted, up to `limit` slots.
#[derive(Debug, Clone)]
pub struct DenseIndex {
    slots: Vec<Option<usize>>,
    len: usize,
    limit: usize,
}

impl DenseIndex {
    /// Creates an empty index accepting values in `0..limit`
    pub fn with_limit(limit: usize) -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            limit,
        }
    }

    /// Exclusive upper bound on storable values
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for DenseIndex {
    fn default() -> Self {
        Self::with_limit(DEFAULT_DENSE_LIMIT)
    }
}

impl PositionIndex<usize> for DenseIndex {
    fn with_capacity(capacity: usize) -> Self {
        let limit = DEFAULT_DENSE_LIMIT.max(capacity);
        Self {
            slots: Vec::with_capacity(capacity),
            len: 0,
            limit,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, value: &usize) -> Option<usize> {
        self.slots.get(*value).copied().flatten()
    }

    fn insert(&mut self, value: usize, slot: usize) -> Result<Option<usize>, HeapError> {
        if value >= self.limit {
            return Err(HeapError::ValueOutOfRange);
        }
        // value < limit, so value + 1 cannot overflow
        if value >= self.slots.len() {
            self.slots.resize(value + 1, None);
        }
        let previous = self.slots[value].replace(slot);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    #[inline]
    fn update(&mut self, value: &usize, slot: usize) -> Option<usize> {
        self.slots
            .get_mut(*value)
            .and_then(|entry| entry.as_mut())
            .map(|current| std::mem::replace(current, slot))
    }

    fn remove(&mut self, value: &usize) -> Option<usize> {
        let removed = self.slots.get_mut(*value).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
    }
}
