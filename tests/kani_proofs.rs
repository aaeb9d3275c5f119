//! Kani verification proofs for heap operations
//!
//! Kani is AWS's model checker for Rust. It can verify properties of Rust code
//! by checking all possible executions up to certain bounds.
//!
//! To run these proofs:
//!   cargo kani --tests

#[cfg(kani)]
use mergeable_heaps::lazy_binomial::LazyBinomialHeap;
#[cfg(kani)]
use mergeable_heaps::sorted::SortedLinkedHeap;
#[cfg(kani)]
use mergeable_heaps::unsorted::UnsortedLinkedHeap;
#[cfg(kani)]
use mergeable_heaps::MergeableHeap;

/// Insert then extract returns the smallest of three arbitrary keys
#[cfg(kani)]
fn check_three_keys<H: MergeableHeap<u8>>() {
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();

    let mut heap = H::new();
    heap.insert(a);
    heap.insert(b);
    heap.insert(c);
    assert!(heap.len() == 3);

    let smallest = a.min(b).min(c);
    assert!(heap.minimum() == Some(&smallest));
    assert!(heap.extract_min() == Some(smallest));
    assert!(heap.len() == 2);

    let first = heap.extract_min();
    let second = heap.extract_min();
    assert!(first <= second);
    assert!(heap.extract_min().is_none());
    assert!(heap.is_empty());
}

/// Merge conserves the total length and empties the donor
#[cfg(kani)]
fn check_merge<H: MergeableHeap<u8>>() {
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();

    let mut left = H::new();
    left.insert(a);
    let mut right = H::new();
    right.insert(b);
    right.insert(c);

    left.merge(&mut right);
    assert!(left.len() == 3);
    assert!(right.is_empty());
    assert!(right.minimum().is_none());
    assert!(left.minimum() == Some(&a.min(b).min(c)));
}

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_unsorted_three_keys() {
    check_three_keys::<UnsortedLinkedHeap<u8>>();
}

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_sorted_three_keys() {
    check_three_keys::<SortedLinkedHeap<u8>>();
}

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_lazy_binomial_three_keys() {
    check_three_keys::<LazyBinomialHeap<u8>>();
}

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_unsorted_merge() {
    check_merge::<UnsortedLinkedHeap<u8>>();
}

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_sorted_merge() {
    check_merge::<SortedLinkedHeap<u8>>();
}

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_lazy_binomial_merge() {
    check_merge::<LazyBinomialHeap<u8>>();
}

/// Extracting from an empty heap is a no-op for every algorithm
#[cfg(kani)]
#[kani::proof]
fn verify_empty_extract() {
    let mut unsorted = UnsortedLinkedHeap::<u8>::new();
    let mut sorted = SortedLinkedHeap::<u8>::new();
    let mut lazy = LazyBinomialHeap::<u8>::new();
    assert!(unsorted.extract_min().is_none());
    assert!(sorted.extract_min().is_none());
    assert!(lazy.extract_min().is_none());
    assert!(unsorted.is_empty() && sorted.is_empty() && lazy.is_empty());
}
