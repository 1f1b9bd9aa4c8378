//! Extreme stress tests that really push the heap to its limits
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use indexed_heaps::{DenseIndex, IndexedHeap, IndexedMinHeap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

type FxHeap = IndexedMinHeap<usize, i64>;
type StdHeap = IndexedMinHeap<usize, i64, HashMap<usize, usize>>;
type DenseHeap = IndexedMinHeap<usize, i64, DenseIndex>;

/// Test massive numbers of adds and polls
fn test_massive_operations<H: IndexedHeap<usize, i64>>() {
    let mut heap = H::new();

    for i in 0..10_000 {
        heap.add(i, i as i64).unwrap();
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.poll(), Ok(i));
    }
    assert!(heap.is_empty());
}

/// Test many priority decreases, each moving a value to the root
fn test_many_decreases<H: IndexedHeap<usize, i64>>() {
    let mut heap = H::new();

    for i in 0..2_000 {
        heap.add(i, 1_000_000 + i as i64).unwrap();
    }

    // Walk values backwards, each getting a new global minimum
    for (step, v) in (0..2_000).rev().enumerate() {
        heap.change_priority(&v, -(step as i64)).unwrap();
        assert_eq!(heap.peek(), Ok(&v));
    }

    for v in 0..2_000 {
        assert_eq!(heap.poll(), Ok(v));
    }
}

/// Test many priority increases, each pushing the root to a leaf
fn test_many_increases<H: IndexedHeap<usize, i64>>() {
    let mut heap = H::new();

    for i in 0..2_000 {
        heap.add(i, i as i64).unwrap();
    }

    for v in 0..1_000 {
        assert_eq!(heap.peek(), Ok(&v));
        heap.change_priority(&v, 10_000 + v as i64).unwrap();
    }

    let order: Vec<usize> = std::iter::from_fn(|| heap.poll().ok()).collect();
    let expected: Vec<usize> = (1_000..2_000).chain(0..1_000).collect();
    assert_eq!(order, expected);
}

/// Test alternating add and poll
fn test_alternating_ops<H: IndexedHeap<usize, i64>>() {
    let mut heap = H::new();

    for i in 0..2_000 {
        heap.add(2 * i, (2 * i) as i64).unwrap();
        heap.add(2 * i + 1, (2 * i + 1) as i64).unwrap();
        assert_eq!(heap.poll(), Ok(i));
    }
    assert_eq!(heap.len(), 2_000);

    let mut last = i64::MIN;
    while let Ok(v) = heap.poll() {
        assert!(v as i64 >= last);
        last = v as i64;
    }
}

/// Test that every value in a large heap can be found and updated
fn test_contains_everything<H: IndexedHeap<usize, i64>>() {
    let mut heap = H::new();

    for i in 0..5_000 {
        heap.add(i * 3, -(i as i64)).unwrap();
    }
    for i in 0..5_000 {
        assert!(heap.contains(&(i * 3)));
        assert!(!heap.contains(&(i * 3 + 1)));
    }
    assert_eq!(heap.peek(), Ok(&(4_999 * 3)));
}

/// Seeded random workload checked against a reference map
fn test_random_workload<H: IndexedHeap<usize, i64>>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut heap = H::new();
    let mut model: HashMap<usize, i64> = HashMap::new();

    for _ in 0..20_000 {
        let v = rng.gen_range(0..512usize);
        let p = rng.gen_range(-1_000..1_000i64);

        match rng.gen_range(0..4) {
            0 => {
                let expected_ok = !model.contains_key(&v);
                assert_eq!(heap.add(v, p).is_ok(), expected_ok);
                model.entry(v).or_insert(p);
            }
            1 => {
                let expected_ok = model.contains_key(&v);
                assert_eq!(heap.change_priority(&v, p).is_ok(), expected_ok);
                if let Some(slot) = model.get_mut(&v) {
                    *slot = p;
                }
            }
            _ => match heap.poll() {
                Ok(polled) => {
                    let min = model.values().min().copied();
                    assert_eq!(model.remove(&polled), min);
                }
                Err(_) => assert!(model.is_empty()),
            },
        }

        assert_eq!(heap.len(), model.len());
    }

    while let Ok(polled) = heap.poll() {
        let min = model.values().min().copied();
        assert_eq!(model.remove(&polled), min);
    }
    assert!(model.is_empty());
}

macro_rules! stress_tests {
    ($module:ident, $heap:ty) => {
        mod $module {
            use super::*;

            #[test]
            fn massive_operations() {
                test_massive_operations::<$heap>();
            }

            #[test]
            fn many_decreases() {
                test_many_decreases::<$heap>();
            }

            #[test]
            fn many_increases() {
                test_many_increases::<$heap>();
            }

            #[test]
            fn alternating_ops() {
                test_alternating_ops::<$heap>();
            }

            #[test]
            fn contains_everything() {
                test_contains_everything::<$heap>();
            }

            #[test]
            fn random_workload() {
                for seed in [1, 7, 42] {
                    test_random_workload::<$heap>(seed);
                }
            }
        }
    };
}

stress_tests!(fx_index, FxHeap);
stress_tests!(std_index, StdHeap);
stress_tests!(dense_index, DenseHeap);

#[test]
fn test_invariants_under_random_churn() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut heap: IndexedMinHeap<u32, u16> = IndexedMinHeap::with_capacity(256);

    for round in 0..2_000 {
        let v = rng.gen_range(0..256u32);
        let p = rng.gen_range(0..64u16);
        if heap.contains(&v) {
            heap.change_priority(&v, p).unwrap();
        } else {
            heap.add(v, p).unwrap();
        }
        if round % 3 == 0 {
            let _ = heap.poll();
        }
        assert!(heap.verify_invariants(), "invariants broken in round {round}");
    }
}
