//! Big-O complexity proofs for indexed heap operations
//!
//! Empirically verifies that add, poll, and change_priority stay within
//! their O(log n) bounds using the `big-o-test` crate.
//!
//! ## Testing Strategy
//!
//! We use `test_algorithm` to measure batch operations, so an O(log n)
//! per-element operation appears as O(n log n) for n operations. Inputs are
//! chosen so every operation walks a full root-to-leaf path: adds arrive in
//! descending priority order and every priority change moves a leaf to the
//! root.
//!
//! Note: These are empirical tests, not formal proofs. They detect significant
//! deviations from expected behavior but may not catch subtle issues with
//! specific input patterns.

use big_o_test::{test_algorithm, BigOAlgorithmComplexity};
use indexed_heaps::{DenseIndex, IndexedHeap, IndexedMinHeap};

use ctor::ctor;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Sets up the ENV, affecting the Rust's test runner
#[ctor]
fn setup_env() {
    // cause tests to run serially -- this may be replaced by using the `serial_test` crate
    std::env::set_var("RUST_TEST_THREADS", "1");
}

// ============================================================================
// Helper functions for each operation
// ============================================================================

fn fill_descending<H: IndexedHeap<usize, i64>>(heap: &mut H, n: usize) {
    for i in 0..n {
        heap.add(i, -(i as i64)).unwrap();
    }
}

/// Test that n adds, each bubbling to the root, has O(n log n) batch complexity
fn test_add_batch_complexity<H>(heap_name: &str)
where
    H: IndexedHeap<usize, i64> + Send + Sync,
{
    let heap = Arc::new(RwLock::new(H::new()));

    test_algorithm(
        &format!("{} add batch", heap_name),
        3,
        || {
            *heap.write() = H::new();
        },
        1000,
        || {
            fill_descending(&mut *heap.write(), 1000);
            42
        },
        2000,
        || {
            fill_descending(&mut *heap.write(), 2000);
            42
        },
        BigOAlgorithmComplexity::ONLogN,
        BigOAlgorithmComplexity::ON,
    );
}

/// Test that n polls has O(n log n) batch complexity
fn test_poll_batch_complexity<H>(heap_name: &str)
where
    H: IndexedHeap<usize, i64> + Send + Sync,
{
    let heap = Arc::new(RwLock::new(H::new()));

    let add_then_drain = |n: usize| {
        let mut h = heap.write();
        for i in 0..n {
            h.add(i, i as i64).unwrap();
        }
        for _ in 0..n {
            assert!(h.poll().is_ok(), "poll() must succeed after adding values");
        }
        42
    };

    test_algorithm(
        &format!("{} poll batch", heap_name),
        3,
        || {
            *heap.write() = H::new();
        },
        1000,
        || add_then_drain(1000),
        2000,
        || add_then_drain(2000),
        BigOAlgorithmComplexity::ONLogN,
        BigOAlgorithmComplexity::ON,
    );
}

/// Test that n priority changes, each moving a leaf to the root, has O(n log n)
/// batch complexity
fn test_change_priority_batch_complexity<H>(heap_name: &str)
where
    H: IndexedHeap<usize, i64> + Send + Sync,
{
    let heap = Arc::new(RwLock::new(H::new()));

    let add_then_lower = |n: usize| {
        let mut h = heap.write();
        // Ascending priorities: no add moves anything
        for i in 0..n {
            h.add(i, 1_000_000 + i as i64).unwrap();
        }
        // Each value from the back becomes the new global minimum
        for (step, v) in (0..n).rev().enumerate() {
            assert!(h.change_priority(&v, -(step as i64)).is_ok());
        }
        42
    };

    test_algorithm(
        &format!("{} change_priority batch", heap_name),
        3,
        || {
            *heap.write() = H::new();
        },
        1000,
        || add_then_lower(1000),
        2000,
        || add_then_lower(2000),
        BigOAlgorithmComplexity::ONLogN,
        BigOAlgorithmComplexity::ON,
    );
}

// ============================================================================
// FxHashMap Index Tests
// ============================================================================

type FxHeap = IndexedMinHeap<usize, i64>;

#[test]
fn test_fx_index_add() {
    test_add_batch_complexity::<FxHeap>("IndexedMinHeap<FxHashMap>");
}

#[test]
fn test_fx_index_poll() {
    test_poll_batch_complexity::<FxHeap>("IndexedMinHeap<FxHashMap>");
}

#[test]
fn test_fx_index_change_priority() {
    test_change_priority_batch_complexity::<FxHeap>("IndexedMinHeap<FxHashMap>");
}

// ============================================================================
// std HashMap Index Tests
// ============================================================================

type StdHeap = IndexedMinHeap<usize, i64, HashMap<usize, usize>>;

#[test]
fn test_std_index_poll() {
    test_poll_batch_complexity::<StdHeap>("IndexedMinHeap<HashMap>");
}

#[test]
fn test_std_index_change_priority() {
    test_change_priority_batch_complexity::<StdHeap>("IndexedMinHeap<HashMap>");
}

// ============================================================================
// DenseIndex Tests
// ============================================================================

type DenseHeap = IndexedMinHeap<usize, i64, DenseIndex>;

#[test]
fn test_dense_index_add() {
    test_add_batch_complexity::<DenseHeap>("IndexedMinHeap<DenseIndex>");
}

#[test]
fn test_dense_index_poll() {
    test_poll_batch_complexity::<DenseHeap>("IndexedMinHeap<DenseIndex>");
}

#[test]
fn test_dense_index_change_priority() {
    test_change_priority_batch_complexity::<DenseHeap>("IndexedMinHeap<DenseIndex>");
}
