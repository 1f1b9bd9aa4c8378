//! Common traits for indexed heap data structures
//!
//! This module provides the error type shared by every heap operation and the
//! [`IndexedHeap`] trait, which exposes the heap's public operations so that
//! generic code (pathfinding, tests, benchmarks) can be written once and run
//! against any position-index backend.
//!
//! Unlike `std::collections::BinaryHeap`, an indexed heap stores *distinct*
//! values. The value itself is the lookup key, which is what makes
//! [`IndexedHeap::contains`] and [`IndexedHeap::change_priority`] possible
//! without a linear scan.

use thiserror::Error;

/// Error type for heap operations
///
/// Every variant is a precondition failure reported to the immediate caller.
/// The heap is never modified by a call that returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The value passed to `add` is already in the heap
    #[error("value is already present in the heap")]
    DuplicateValue,
    /// `peek` or `poll` was called on an empty heap
    #[error("heap is empty")]
    Empty,
    /// The value passed to `change_priority` is not in the heap
    #[error("value is not present in the heap")]
    NotFound,
    /// The position index cannot store the value passed to `add`, e.g. a
    /// [`DenseIndex`](crate::DenseIndex) id at or above its limit
    #[error("value is outside the range the position index can hold")]
    ValueOutOfRange,
}

/// Trait for min-heaps over distinct values with updatable priorities
///
/// # Example
///
/// ```rust
/// use indexed_heaps::{HeapError, IndexedHeap, IndexedMinHeap};
///
/// let mut heap: IndexedMinHeap<&str, u32> = IndexedMinHeap::new();
/// heap.add("a", 5).unwrap();
/// heap.add("b", 3).unwrap();
/// assert_eq!(heap.add("a", 1), Err(HeapError::DuplicateValue));
///
/// heap.change_priority(&"a", 1).unwrap();
/// assert_eq!(heap.peek(), Ok(&"a"));
/// assert_eq!(heap.poll(), Ok("a"));
/// assert_eq!(heap.poll(), Ok("b"));
/// assert_eq!(heap.poll(), Err(HeapError::Empty));
/// ```
pub trait IndexedHeap<V, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of values in the heap
    ///
    /// # Time Complexity
    /// O(1)
    fn len(&self) -> usize;

    /// Adds `value` with the given priority
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateValue`] if `value` is already present,
    /// or [`HeapError::ValueOutOfRange`] if the position index cannot hold it.
    ///
    /// # Time Complexity
    /// O(log n)
    fn add(&mut self, value: V, priority: P) -> Result<(), HeapError>;

    /// Returns the value with the smallest priority without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Result<&V, HeapError>;

    /// Removes and returns the value with the smallest priority
    ///
    /// When several values share the smallest priority, which one is returned
    /// is unspecified.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n)
    fn poll(&mut self) -> Result<V, HeapError>;

    /// Returns true if `value` is in the heap
    ///
    /// # Time Complexity
    /// O(1) expected
    fn contains(&self, value: &V) -> bool;

    /// Replaces the priority of `value` and restores heap order
    ///
    /// The new priority may be smaller, larger, or equal to the old one.
    ///
    /// # Errors
    /// Returns [`HeapError::NotFound`] if `value` is not present.
    ///
    /// # Time Complexity
    /// O(log n)
    fn change_priority(&mut self, value: &V, priority: P) -> Result<(), HeapError>;
}
