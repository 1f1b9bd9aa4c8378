//! Indexed Binary Heap implementation
//!
//! A binary min-heap over *distinct* values, paired with a position index that
//! records where each value currently sits in the heap's backing vector. The
//! index is what turns membership tests into a single lookup and lets
//! [`change_priority`](IndexedHeap::change_priority) find its target without
//! scanning.
//!
//! # Representation
//!
//! The backing vector encodes a complete binary tree: slot 0 is the root, the
//! children of slot `i` are `2i + 1` and `2i + 2`, and the parent of a non-root
//! slot `i` is `(i - 1) / 2`. Every relocation of an entry during repair goes
//! through a single `swap` primitive, which rewrites the index for both moved
//! values. That is the only code path that can desynchronize the vector and
//! the index.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity   |
//! |-------------------|--------------|
//! | `add`             | O(log n)     |
//! | `poll`            | O(log n)     |
//! | `peek`            | O(1)         |
//! | `contains`        | O(1) expected|
//! | `change_priority` | O(log n)     |
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::{IndexedHeap, IndexedMinHeap};
//!
//! let mut heap: IndexedMinHeap<&str, i32> = IndexedMinHeap::new();
//! heap.add("a", 5).unwrap();
//! heap.add("b", 3).unwrap();
//! heap.add("c", 8).unwrap();
//! assert_eq!(heap.peek(), Ok(&"b"));
//!
//! // Raise "b" above everything else
//! heap.change_priority(&"b", 10).unwrap();
//! assert_eq!(heap.poll(), Ok("a"));
//! assert_eq!(heap.poll(), Ok("c"));
//! assert_eq!(heap.poll(), Ok("b"));
//! assert!(heap.is_empty());
//! ```

use crate::storage::PositionIndex;
use crate::traits::{HeapError, IndexedHeap};
use log::trace;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// A value together with its priority
#[derive(Debug, Clone)]
struct Entry<V, P> {
    value: V,
    priority: P,
}

#[inline]
fn parent(slot: usize) -> usize {
    (slot - 1) / 2
}

#[inline]
fn left(slot: usize) -> usize {
    2 * slot + 1
}

#[inline]
fn right(slot: usize) -> usize {
    2 * slot + 2
}

/// A binary min-heap of distinct values with an auxiliary position index
///
/// The value with the smallest priority is at the root. Values must be
/// `Clone` because one copy keys the position index; the clone is taken once,
/// on [`add`](IndexedHeap::add).
///
/// The third type parameter selects the position-index backend; see
/// [`storage`](crate::storage). It defaults to an `FxHashMap`.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<V, P, M = FxHashMap<V, usize>> {
    /// Complete binary tree in array form
    entries: Vec<Entry<V, P>>,
    /// Maps each value to its slot in `entries`
    positions: M,
}

impl<V, P, M> IndexedHeap<V, P> for IndexedMinHeap<V, P, M>
where
    V: Clone,
    P: Ord,
    M: PositionIndex<V>,
{
    fn new() -> Self {
        Self::with_index(M::default())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn add(&mut self, value: V, priority: P) -> Result<(), HeapError> {
        if self.positions.get(&value).is_some() {
            return Err(HeapError::DuplicateValue);
        }

        let slot = self.entries.len();
        self.positions.insert(value.clone(), slot)?;
        self.entries.push(Entry { value, priority });
        let settled = self.bubble_up(slot);

        trace!(
            "add: appended at slot {}, settled at slot {}, len {}",
            slot,
            settled,
            self.entries.len()
        );
        Ok(())
    }

    fn peek(&self) -> Result<&V, HeapError> {
        self.entries
            .first()
            .map(|entry| &entry.value)
            .ok_or(HeapError::Empty)
    }

    fn poll(&mut self) -> Result<V, HeapError> {
        if self.entries.is_empty() {
            return Err(HeapError::Empty);
        }

        // The last entry takes over the root slot
        let root = self.entries.swap_remove(0);
        self.positions.remove(&root.value);

        if let Some(relocated) = self.entries.first() {
            let previous = self.positions.update(&relocated.value, 0);
            debug_assert_eq!(previous, Some(self.entries.len()));
            let settled = self.bubble_down(0);
            trace!(
                "poll: relocated last entry to root, settled at slot {}, len {}",
                settled,
                self.entries.len()
            );
        } else {
            trace!("poll: heap is now empty");
        }

        Ok(root.value)
    }

    fn contains(&self, value: &V) -> bool {
        self.positions.get(value).is_some()
    }

    fn change_priority(&mut self, value: &V, priority: P) -> Result<(), HeapError> {
        let slot = self.positions.get(value).ok_or(HeapError::NotFound)?;
        let old = std::mem::replace(&mut self.entries[slot].priority, priority);

        // Only one direction can move the entry; the rest of the tree is valid
        let settled = match self.entries[slot].priority.cmp(&old) {
            Ordering::Less => self.bubble_up(slot),
            Ordering::Greater => self.bubble_down(slot),
            Ordering::Equal => slot,
        };

        trace!("change_priority: slot {} -> {}", slot, settled);
        Ok(())
    }
}

impl<V, P, M> IndexedMinHeap<V, P, M>
where
    V: Clone,
    P: Ord,
    M: PositionIndex<V>,
{
    /// Creates an empty heap with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: M::with_capacity(capacity),
        }
    }

    /// Creates an empty heap on top of a caller-supplied position index
    ///
    /// Use this to pick a hasher that cannot be defaulted or to reuse an
    /// allocation. Any mappings already in `positions` are discarded.
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use std::collections::hash_map::RandomState;
    /// use indexed_heaps::{IndexedHeap, IndexedMinHeap};
    ///
    /// let index: HashMap<String, usize, RandomState> = HashMap::with_hasher(RandomState::new());
    /// let mut heap: IndexedMinHeap<String, u8, _> = IndexedMinHeap::with_index(index);
    /// heap.add("untrusted".to_string(), 1u8).unwrap();
    /// assert!(heap.contains(&"untrusted".to_string()));
    /// ```
    pub fn with_index(mut positions: M) -> Self {
        positions.clear();
        Self {
            entries: Vec::new(),
            positions,
        }
    }

    /// Returns the current priority of `value`, if it is in the heap
    pub fn priority(&self, value: &V) -> Option<&P> {
        self.positions
            .get(value)
            .map(|slot| &self.entries[slot].priority)
    }

    /// Removes every value, keeping allocated capacity
    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }

    /// Checks every structural invariant of the heap
    ///
    /// - heap order: no entry has a smaller priority than its parent
    /// - the index holds exactly one mapping per entry
    /// - each entry's mapping points back at the entry's own slot
    ///
    /// Uniqueness of values follows from the last two. Runs in O(n); intended
    /// for tests and debugging.
    pub fn verify_invariants(&self) -> bool {
        if self.positions.len() != self.entries.len() {
            return false;
        }

        self.entries.iter().enumerate().all(|(slot, entry)| {
            let indexed = self.positions.get(&entry.value) == Some(slot);
            let ordered = slot == 0 || self.entries[parent(slot)].priority <= entry.priority;
            indexed && ordered
        })
    }

    /// Exchanges the entries at slots `i` and `j` and rewrites both mappings
    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }

        self.entries.swap(i, j);
        let was_at_j = self.positions.update(&self.entries[i].value, i);
        let was_at_i = self.positions.update(&self.entries[j].value, j);
        debug_assert_eq!(was_at_j, Some(j), "position index out of sync at slot {}", j);
        debug_assert_eq!(was_at_i, Some(i), "position index out of sync at slot {}", i);
    }

    /// Moves the entry at `slot` toward the root until its parent is not
    /// larger, returning the slot where it settles
    fn bubble_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let up = parent(slot);
            if self.entries[slot].priority < self.entries[up].priority {
                self.swap(slot, up);
                slot = up;
            } else {
                break;
            }
        }
        slot
    }

    /// Moves the entry at `slot` toward the leaves until no child is smaller,
    /// returning the slot where it settles
    fn bubble_down(&mut self, mut slot: usize) -> usize {
        while let Some(child) = self.smaller_child(slot) {
            if self.entries[child].priority < self.entries[slot].priority {
                self.swap(slot, child);
                slot = child;
            } else {
                break;
            }
        }
        slot
    }

    /// Index of the child of `slot` with the smaller priority
    ///
    /// Returns `None` for a leaf. With a single child that child is returned;
    /// when both children tie, the right child wins.
    fn smaller_child(&self, slot: usize) -> Option<usize> {
        let len = self.entries.len();
        let l = left(slot);
        if l >= len {
            return None;
        }

        let r = right(slot);
        if r < len && self.entries[r].priority <= self.entries[l].priority {
            Some(r)
        } else {
            Some(l)
        }
    }
}

impl<V, P, M> Default for IndexedMinHeap<V, P, M>
where
    V: Clone,
    P: Ord,
    M: PositionIndex<V>,
{
    fn default() -> Self {
        Self::new()
    }
}
