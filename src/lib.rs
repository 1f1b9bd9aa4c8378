//! Indexed Heap Data Structures for Rust
//!
//! This crate provides an indexed binary min-heap: a priority queue over
//! *distinct* values that keeps a side index from each value to its slot in
//! the heap. The index makes membership tests O(1) expected and lets the
//! priority of any value be raised or lowered in O(log n).
//!
//! # Features
//!
//! - **Indexed Binary Heap**: O(log n) add, poll, and change_priority; O(1) peek and contains
//! - **Pluggable position index**: `FxHashMap` by default, any `HashMap` hasher, or a
//!   vector-backed [`DenseIndex`] for small integer values
//! - **Pathfinding**: Dijkstra and A* that update open-set priorities in place
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::{HeapError, IndexedHeap, IndexedMinHeap};
//!
//! let mut heap: IndexedMinHeap<&str, i32> = IndexedMinHeap::new();
//! heap.add("a", 10).unwrap();
//! heap.add("b", 5).unwrap();
//! heap.change_priority(&"a", 1).unwrap();
//!
//! assert!(heap.contains(&"b"));
//! assert_eq!(heap.peek(), Ok(&"a"));
//! assert_eq!(heap.add("b", 7), Err(HeapError::DuplicateValue));
//! ```

pub mod indexed_binary;
pub mod pathfinding;
pub mod storage;
pub mod traits;

// Re-export the main types for convenience
pub use indexed_binary::IndexedMinHeap;
pub use storage::{DenseIndex, PositionIndex};
pub use traits::{HeapError, IndexedHeap};
