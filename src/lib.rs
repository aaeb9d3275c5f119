//! Mergeable Heap Data Structures for Rust
//!
//! This crate provides three interchangeable implementations of the mergeable
//! heap (meldable priority queue) abstraction: make-heap, insert, minimum,
//! extract-min and union of two heaps. They share one trait,
//! [`MergeableHeap`], and trade cost between operations differently.
//!
//! # Features
//!
//! - **Unsorted Linked Heap**: O(1) insert, minimum and merge; O(n) extract-min
//! - **Sorted Linked Heap**: O(1) minimum and extract-min; O(n) insert; O(n + m) merge
//! - **Lazy Binomial Heap**: O(1) insert, minimum and merge; O(log n) amortized extract-min
//!
//! All heaps are single-owner, single-threaded containers. Merging moves the
//! nodes of one heap into another and leaves the donor empty.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::lazy_binomial::LazyBinomialHeap;
//! use mergeable_heaps::MergeableHeap;
//!
//! let mut a = LazyBinomialHeap::new();
//! a.insert(10);
//! a.insert(5);
//!
//! let mut b = LazyBinomialHeap::new();
//! b.insert(15);
//! b.insert(20);
//!
//! a.merge(&mut b);
//! assert_eq!(a.minimum(), Some(&5));
//!
//! let mut ascending = Vec::new();
//! a.sort_with(|key| ascending.push(*key));
//! assert_eq!(ascending, vec![5, 10, 15, 20]);
//! assert_eq!(a.len(), 4);
//! ```

pub mod any;
pub mod lazy_binomial;
pub mod sorted;
pub mod traits;
pub mod unsorted;

// Re-export the main trait for convenience
pub use any::{Algorithm, AnyHeap};
pub use traits::{HeapError, MergeableHeap};
