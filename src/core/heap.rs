//! Comparator-parameterized binary min-heap.
//!
//! The ordering strategy is a runtime value injected at construction, which
//! `std::collections::BinaryHeap`'s `T: Ord` bound cannot express, so the
//! sift operations are implemented here directly. The heap knows nothing
//! about tasks; any `T` with any [`Compare<T>`] works.

use std::cmp::Ordering;

/// Total-order strategy over two values.
///
/// `compare(a, b) == Less` means `a` sorts earlier (closer to the heap root).
/// Implementations must be consistent for the same logical inputs within a
/// single heap operation: a sift may compare the same values several times as
/// the heap reshapes.
pub trait Compare<T> {
    /// Order `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Array-backed binary min-heap with an injected comparator.
///
/// Invariant: for every index `i > 0`,
/// `compare(items[(i - 1) / 2], items[i]) != Greater`.
///
/// Ties carry no ordering guarantee beyond what the comparator states; equal
/// elements surface in whatever order the sifts left them.
#[derive(Debug, Clone)]
pub struct BinaryHeap<T, C> {
    items: Vec<T>,
    cmp: C,
}

impl<T, C: Compare<T>> BinaryHeap<T, C> {
    /// Create an empty heap ordered by `cmp`.
    pub const fn new(cmp: C) -> Self {
        Self {
            items: Vec::new(),
            cmp,
        }
    }

    /// Create an empty heap with room for `capacity` elements.
    pub fn with_capacity(cmp: C, capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Build a heap from an existing sequence in O(n): sift down every
    /// position from the last non-leaf to the root.
    pub fn from_vec(cmp: C, items: Vec<T>) -> Self {
        let mut heap = Self { items, cmp };
        for idx in (0..heap.items.len() / 2).rev() {
            heap.sift_down(idx);
        }
        heap
    }

    /// Insert a value in O(log n). Always succeeds.
    pub fn insert(&mut self, value: T) {
        self.items.push(value);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the smallest element in O(log n), or `None` when
    /// empty.
    pub fn extract(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let root = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some(root)
    }

    /// The smallest element without removal, or `None` when empty.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Current element count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The injected comparator.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Defensive copy of the backing sequence in heap (not sorted) order.
    ///
    /// Never aliases internal storage; callers snapshot this for
    /// serialization.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.cmp.compare(&self.items[idx], &self.items[parent]) != Ordering::Less {
                break;
            }
            self.items.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len
                && self.cmp.compare(&self.items[right], &self.items[left]) == Ordering::Less
            {
                child = right;
            }
            if self.cmp.compare(&self.items[child], &self.items[idx]) != Ordering::Less {
                break;
            }
            self.items.swap(idx, child);
            idx = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    struct Ascending;

    impl Compare<i64> for Ascending {
        fn compare(&self, a: &i64, b: &i64) -> Ordering {
            a.cmp(b)
        }
    }

    struct Descending;

    impl Compare<i64> for Descending {
        fn compare(&self, a: &i64, b: &i64) -> Ordering {
            b.cmp(a)
        }
    }

    fn min_heap() -> BinaryHeap<i64, Ascending> {
        BinaryHeap::new(Ascending)
    }

    fn assert_heap_invariant<T, C: Compare<T>>(heap: &BinaryHeap<T, C>)
    where
        T: Clone + std::fmt::Debug,
    {
        let items = heap.to_vec();
        for idx in 1..items.len() {
            let parent = (idx - 1) / 2;
            assert_ne!(
                heap.comparator().compare(&items[parent], &items[idx]),
                Ordering::Greater,
                "parent {:?} sorts after child {:?}",
                items[parent],
                items[idx],
            );
        }
    }

    #[test]
    fn test_extract_on_empty_returns_none() {
        let mut heap = min_heap();
        assert!(heap.extract().is_none());
        assert!(heap.peek().is_none());
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_insert_then_extract_sorts() {
        let mut heap = min_heap();
        for v in [42, 7, 19, -3, 0, 7, 100, -50] {
            heap.insert(v);
        }
        let mut drained = Vec::new();
        while let Some(v) = heap.extract() {
            drained.push(v);
        }
        let mut expected = vec![42, 7, 19, -3, 0, 7, 100, -50];
        expected.sort_unstable();
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_peek_is_idempotent() {
        let mut heap = min_heap();
        heap.insert(5);
        heap.insert(2);
        heap.insert(9);
        for _ in 0..10 {
            assert_eq!(heap.peek(), Some(&2));
        }
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_len_round_trip() {
        let mut heap = min_heap();
        for v in 0..20 {
            heap.insert(v);
        }
        for _ in 0..8 {
            heap.extract();
        }
        assert_eq!(heap.len(), 12);
    }

    #[test]
    fn test_invariant_under_random_operations() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut heap = min_heap();
        for _ in 0..2_000 {
            if rng.random_bool(0.6) {
                heap.insert(rng.random_range(-1_000..1_000));
            } else {
                heap.extract();
            }
            assert_heap_invariant(&heap);
        }
    }

    #[test]
    fn test_from_vec_heapifies() {
        let mut rng = StdRng::seed_from_u64(0xBEEF);
        let items: Vec<i64> = (0..500).map(|_| rng.random_range(-1_000..1_000)).collect();
        let mut expected = items.clone();
        expected.sort_unstable();

        let mut heap = BinaryHeap::from_vec(Ascending, items);
        assert_heap_invariant(&heap);

        let mut drained = Vec::new();
        while let Some(v) = heap.extract() {
            drained.push(v);
        }
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_to_vec_is_a_copy() {
        let mut heap = min_heap();
        heap.insert(3);
        heap.insert(1);
        let mut copy = heap.to_vec();
        copy.clear();
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.peek(), Some(&1));
    }

    #[test]
    fn test_reversed_comparator_yields_max_heap() {
        let mut heap = BinaryHeap::new(Descending);
        for v in [1, 5, 3] {
            heap.insert(v);
        }
        assert_eq!(heap.extract(), Some(5));
        assert_eq!(heap.extract(), Some(3));
        assert_eq!(heap.extract(), Some(1));
    }
}
