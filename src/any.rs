//! Runtime selection of the backing algorithm
//!
//! The concrete heaps make mixing algorithms a type error. When the algorithm
//! is only known at run time (read from a command line, say), [`AnyHeap`]
//! picks it once at construction and forwards every operation to it.
//! Merging two `AnyHeap`s built on different algorithms is rejected by
//! [`AnyHeap::try_merge`] and panics in [`AnyHeap::merge`].
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::{Algorithm, AnyHeap};
//!
//! let algorithm: Algorithm = "lazy-binomial".parse().unwrap();
//! let mut heap = AnyHeap::new(algorithm);
//! heap.insert(3);
//! heap.insert(1);
//!
//! let mut other = AnyHeap::new(Algorithm::Sorted);
//! other.insert(2);
//! assert!(heap.try_merge(&mut other).is_err());
//! assert_eq!(other.len(), 1);
//!
//! assert_eq!(heap.extract_min(), Some(1));
//! ```

use crate::lazy_binomial::{self, LazyBinomialHeap};
use crate::sorted::{self, SortedLinkedHeap};
use crate::traits::{HeapError, MergeableHeap};
use crate::unsorted::{self, UnsortedLinkedHeap};
use std::fmt;
use std::str::FromStr;

/// The backing algorithms available in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// [`UnsortedLinkedHeap`]
    Unsorted,
    /// [`SortedLinkedHeap`]
    Sorted,
    /// [`LazyBinomialHeap`]
    LazyBinomial,
}

impl Algorithm {
    /// Every algorithm, in declaration order
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Unsorted,
        Algorithm::Sorted,
        Algorithm::LazyBinomial,
    ];

    /// Canonical lowercase name, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Unsorted => "unsorted",
            Algorithm::Sorted => "sorted",
            Algorithm::LazyBinomial => "lazy-binomial",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = HeapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unsorted" => Ok(Algorithm::Unsorted),
            "sorted" => Ok(Algorithm::Sorted),
            "lazy" | "lazy-binomial" | "lazy_binomial" | "binomial" => {
                Ok(Algorithm::LazyBinomial)
            }
            _ => Err(HeapError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A mergeable heap whose algorithm is chosen at construction
pub enum AnyHeap<K> {
    Unsorted(UnsortedLinkedHeap<K>),
    Sorted(SortedLinkedHeap<K>),
    LazyBinomial(LazyBinomialHeap<K>),
}

macro_rules! dispatch {
    ($heap:expr, $inner:ident => $body:expr) => {
        match $heap {
            AnyHeap::Unsorted($inner) => $body,
            AnyHeap::Sorted($inner) => $body,
            AnyHeap::LazyBinomial($inner) => $body,
        }
    };
}

impl<K: Ord> AnyHeap<K> {
    /// Creates an empty heap backed by `algorithm`
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Unsorted => AnyHeap::Unsorted(UnsortedLinkedHeap::new()),
            Algorithm::Sorted => AnyHeap::Sorted(SortedLinkedHeap::new()),
            Algorithm::LazyBinomial => AnyHeap::LazyBinomial(LazyBinomialHeap::new()),
        }
    }

    /// The algorithm this heap was built with
    pub fn algorithm(&self) -> Algorithm {
        match self {
            AnyHeap::Unsorted(_) => Algorithm::Unsorted,
            AnyHeap::Sorted(_) => Algorithm::Sorted,
            AnyHeap::LazyBinomial(_) => Algorithm::LazyBinomial,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, heap => heap.len())
    }

    pub fn is_empty(&self) -> bool {
        dispatch!(self, heap => heap.is_empty())
    }

    pub fn insert(&mut self, key: K) {
        dispatch!(self, heap => heap.insert(key))
    }

    pub fn minimum(&self) -> Option<&K> {
        dispatch!(self, heap => heap.minimum())
    }

    pub fn extract_min(&mut self) -> Option<K> {
        dispatch!(self, heap => heap.extract_min())
    }

    /// Moves every key of `other` into `self` if both use the same algorithm
    ///
    /// # Errors
    /// Returns [`HeapError::AlgorithmMismatch`] and leaves both heaps untouched
    /// when the algorithms differ.
    pub fn try_merge(&mut self, other: &mut Self) -> Result<(), HeapError> {
        match (self, other) {
            (AnyHeap::Unsorted(dst), AnyHeap::Unsorted(src)) => dst.merge(src),
            (AnyHeap::Sorted(dst), AnyHeap::Sorted(src)) => dst.merge(src),
            (AnyHeap::LazyBinomial(dst), AnyHeap::LazyBinomial(src)) => dst.merge(src),
            (dst, src) => {
                return Err(HeapError::AlgorithmMismatch {
                    dst: dst.algorithm(),
                    src: src.algorithm(),
                })
            }
        }
        Ok(())
    }

    /// Moves every key of `other` into `self`, leaving `other` empty
    ///
    /// # Panics
    /// Panics if the two heaps were built with different algorithms.
    pub fn merge(&mut self, other: &mut Self) {
        if let Err(err) = self.try_merge(other) {
            panic!("{err}");
        }
    }

    /// Walks the keys in the backing algorithm's natural order
    pub fn iter(&self) -> Iter<'_, K> {
        match self {
            AnyHeap::Unsorted(heap) => Iter::Unsorted(heap.iter()),
            AnyHeap::Sorted(heap) => Iter::Sorted(heap.iter()),
            AnyHeap::LazyBinomial(heap) => Iter::LazyBinomial(heap.iter()),
        }
    }

    /// See [`MergeableHeap::sort_with`]
    pub fn sort_with<F: FnMut(&K)>(&mut self, visit: F) {
        dispatch!(self, heap => heap.sort_with(visit))
    }

    /// See [`MergeableHeap::sort`]
    pub fn sort(&mut self) {
        dispatch!(self, heap => heap.sort())
    }

    /// Drains the heap into a vector in ascending order
    pub fn into_sorted_vec(self) -> Vec<K> {
        dispatch!(self, heap => heap.into_sorted_vec())
    }
}

impl<K: Ord> Extend<K> for AnyHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for AnyHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyHeap")
            .field("algorithm", &self.algorithm())
            .field("keys", &DebugKeys(self))
            .finish()
    }
}

struct DebugKeys<'a, K>(&'a AnyHeap<K>);

impl<K: Ord + fmt::Debug> fmt::Debug for DebugKeys<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Iterator returned by [`AnyHeap::iter`]
pub enum Iter<'a, K> {
    Unsorted(unsorted::Iter<'a, K>),
    Sorted(sorted::Iter<'a, K>),
    LazyBinomial(lazy_binomial::Iter<'a, K>),
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        match self {
            Iter::Unsorted(iter) => Iter::Unsorted(iter.clone()),
            Iter::Sorted(iter) => Iter::Sorted(iter.clone()),
            Iter::LazyBinomial(iter) => Iter::LazyBinomial(iter.clone()),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        match self {
            Iter::Unsorted(iter) => iter.next(),
            Iter::Sorted(iter) => iter.next(),
            Iter::LazyBinomial(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Unsorted(iter) => iter.size_hint(),
            Iter::Sorted(iter) => iter.size_hint(),
            Iter::LazyBinomial(iter) => iter.size_hint(),
        }
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
