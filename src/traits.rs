//! Common traits for mergeable heap data structures
//!
//! Every backing algorithm in this crate implements [`MergeableHeap`]: the five
//! classic mergeable-heap operations (make-heap, insert, minimum, extract-min,
//! union) plus a non-mutating traversal used for diagnostics.
//!
//! The heaps store bare keys; the key itself is the priority. Use
//! `std::cmp::Reverse<K>` to get max-heap behavior.

use crate::any::Algorithm;
use thiserror::Error;

/// Error type for heap operations that can be rejected
///
/// Empty heaps are not an error: `minimum` and `extract_min` report them as
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// Two heaps backed by different algorithms were asked to merge
    #[error("cannot merge {src} heap into {dst} heap")]
    AlgorithmMismatch { dst: Algorithm, src: Algorithm },
    /// An algorithm name did not match any known backing algorithm
    #[error("unknown heap algorithm `{0}` (expected unsorted, sorted or lazy-binomial)")]
    UnknownAlgorithm(String),
}

/// Base trait for mergeable heap / priority queue data structures
///
/// `merge` takes the other heap by mutable reference and leaves it empty, so
/// the donor can be reused as a fresh heap afterwards. Because both sides are
/// `Self`, merging two different algorithms does not type-check; see
/// [`AnyHeap`](crate::AnyHeap) for the runtime-selected variant.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::MergeableHeap;
/// use mergeable_heaps::lazy_binomial::LazyBinomialHeap;
///
/// let mut a = LazyBinomialHeap::new();
/// a.insert(10);
/// a.insert(5);
///
/// let mut b = LazyBinomialHeap::new();
/// b.insert(15);
/// b.insert(20);
///
/// a.merge(&mut b);
/// assert!(b.is_empty());
/// assert_eq!(a.minimum(), Some(&5));
/// assert_eq!(a.into_sorted_vec(), vec![5, 10, 15, 20]);
/// ```
pub trait MergeableHeap<K: Ord> {
    /// Borrowing iterator over the keys in the algorithm's natural order
    type Iter<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a;

    /// Creates a new empty heap (MAKE-HEAP)
    fn new() -> Self;

    /// Returns the number of keys in the heap
    fn len(&self) -> usize;

    /// Returns true if the heap holds no keys
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a key, taking ownership of it
    fn insert(&mut self, key: K);

    /// Returns the minimum key without removing it
    ///
    /// # Time Complexity
    /// O(1) for all implementations
    fn minimum(&self) -> Option<&K>;

    /// Removes and returns the minimum key
    fn extract_min(&mut self) -> Option<K>;

    /// Moves every key of `other` into `self`, leaving `other` empty
    ///
    /// No keys are copied; nodes change owner.
    fn merge(&mut self, other: &mut Self);

    /// Walks the keys in heap order without mutating the heap
    ///
    /// The order is the algorithm's physical layout, not sorted order (except
    /// for [`SortedLinkedHeap`](crate::sorted::SortedLinkedHeap)).
    fn iter(&self) -> Self::Iter<'_>;

    /// Visits every key in ascending order, leaving the heap's contents intact
    ///
    /// Keys are extracted one by one into a temporary heap of the same
    /// algorithm, `visit` sees each one as it comes out, and the temporary heap
    /// is merged back at the end.
    ///
    /// # Time Complexity
    /// n * O(extract_min) + n * O(insert) + O(merge), even for heaps whose
    /// storage is already sorted.
    fn sort_with<F>(&mut self, mut visit: F)
    where
        Self: Sized,
        F: FnMut(&K),
    {
        let mut temp = Self::new();
        while let Some(key) = self.extract_min() {
            visit(&key);
            temp.insert(key);
        }
        self.merge(&mut temp);
    }

    /// Rearranges the heap by a full extract-and-merge pass
    ///
    /// For the lazy binomial heap this leaves the forest consolidated.
    fn sort(&mut self)
    where
        Self: Sized,
    {
        self.sort_with(|_| {});
    }

    /// Drains the heap into a vector in ascending order
    fn into_sorted_vec(mut self) -> Vec<K>
    where
        Self: Sized,
    {
        let mut keys = Vec::with_capacity(self.len());
        while let Some(key) = self.extract_min() {
            keys.push(key);
        }
        keys
    }
}
