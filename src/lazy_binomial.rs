//! Lazy Binomial Heap implementation
//!
//! A forest of binomial trees whose root list is only tidied up when the
//! minimum is extracted:
//! - O(1) insert and merge
//! - O(1) minimum
//! - O(log n) amortized extract_min (O(n) worst case)
//!
//! # Algorithm Overview
//!
//! Each tree is stored in left-child, right-sibling form: a node points to its
//! first child, and the `sibling` pointer chains either the children of one
//! parent or the roots of the forest.
//!
//! **Binomial Tree Bₖ**:
//! - B₀ is a single node
//! - Bₖ is formed by linking two Bₖ₋₁ trees, the larger root becoming the
//!   first child of the smaller
//! - Bₖ has exactly 2ᵏ nodes and its root has degree k
//!
//! **Laziness**: `insert` appends a B₀ to the root list and `merge` concatenates
//! two root lists, so several roots may share a degree between extractions.
//! `extract_min` removes the minimum root, promotes its children to roots and
//! then **consolidates**: roots are bucketed by degree and equal-degree pairs
//! are linked, lowest degree first, until every degree appears at most once.
//!
//! **Amortized cost**: take the number of roots as the potential. Insert and
//! merge do O(1) work and raise the potential by O(1). Every link done during
//! consolidation removes one root, so it is paid for by the potential drop,
//! leaving O(log n) amortized for extract_min: at most ⌈log₂ n⌉ + 1 roots
//! survive and the removed root had O(log n) children.
//!
//! **Invariant**: right after `extract_min` returns, root degrees are pairwise
//! distinct and each node's degree equals its number of children.

use crate::traits::MergeableHeap;
use log::{debug, trace};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

type NodePtr<K> = NonNull<Node<K>>;

type Link<K> = Option<NodePtr<K>>;

/// Trees of one degree waiting to be linked during consolidation
type Bucket<K> = SmallVec<[NodePtr<K>; 2]>;

/// Internal node structure
///
/// - `child`: first child (the most recently linked one), None for a leaf
/// - `sibling`: next root in the root list, or next child of the same parent
/// - `degree`: number of children; a root of degree k holds 2ᵏ nodes
struct Node<K> {
    key: K,
    degree: usize,
    child: Link<K>,
    sibling: Link<K>,
}

/// Lazy Binomial Heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::MergeableHeap;
/// use mergeable_heaps::lazy_binomial::LazyBinomialHeap;
///
/// let mut heap = LazyBinomialHeap::new();
/// for key in [10, 5, 15] {
///     heap.insert(key);
/// }
/// assert_eq!(heap.minimum(), Some(&5));
/// assert_eq!(heap.extract_min(), Some(5));
/// assert_eq!(heap.extract_min(), Some(10));
/// assert_eq!(heap.extract_min(), Some(15));
/// assert_eq!(heap.extract_min(), None);
/// ```
pub struct LazyBinomialHeap<K> {
    /// First root of the root list
    head: Link<K>,
    /// Last root of the root list, for O(1) append
    tail: Link<K>,
    /// Root holding the smallest key
    min: Link<K>,
    len: usize,
    _marker: PhantomData<Box<Node<K>>>,
}

unsafe impl<K: Send> Send for LazyBinomialHeap<K> {}
unsafe impl<K: Sync> Sync for LazyBinomialHeap<K> {}

impl<K> Drop for LazyBinomialHeap<K> {
    fn drop(&mut self) {
        // Explicit stack: a long root list or a deep child chain must not
        // recurse.
        let mut pending: Vec<NodePtr<K>> = self.head.take().into_iter().collect();
        while let Some(node) = pending.pop() {
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            pending.extend(node.sibling);
            pending.extend(node.child);
        }
        self.tail = None;
        self.min = None;
    }
}

impl<K: Ord> MergeableHeap<K> for LazyBinomialHeap<K> {
    type Iter<'a>
        = Iter<'a, K>
    where
        Self: 'a,
        K: 'a;

    fn new() -> Self {
        Self {
            head: None,
            tail: None,
            min: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    /// Appends a new B₀ tree to the root list
    ///
    /// **Time Complexity**: O(1)
    ///
    /// No linking happens here; the new root waits for the next consolidation.
    fn insert(&mut self, key: K) {
        let node = NonNull::from(Box::leak(Box::new(Node {
            key,
            degree: 0,
            child: None,
            sibling: None,
        })));

        unsafe {
            self.append_roots(node, node);
            let is_new_min = match self.min {
                Some(min) => (*node.as_ptr()).key < (*min.as_ptr()).key,
                None => true,
            };
            if is_new_min {
                self.min = Some(node);
            }
        }

        self.len += 1;
    }

    fn minimum(&self) -> Option<&K> {
        // SAFETY: `min` is a root owned by this heap and `&self` keeps the
        // forest frozen for the lifetime of the borrow.
        self.min.map(|min| unsafe { &(*min.as_ptr()).key })
    }

    /// Removes and returns the minimum element
    ///
    /// **Time Complexity**: O(log n) amortized, O(n) worst case
    ///
    /// **Algorithm**:
    /// 1. Scan the root list for the minimum root and unlink it
    /// 2. Append its children to the end of the root list
    /// 3. Consolidate: link equal-degree trees until all degrees differ
    /// 4. Rescan the (now short) root list for the new minimum
    /// 5. Free the removed node and hand back its key
    fn extract_min(&mut self) -> Option<K> {
        let removed = self.remove_min_root()?;

        unsafe {
            if let Some(first_child) = (*removed.as_ptr()).child.take() {
                let mut last_child = first_child;
                while let Some(next) = (*last_child.as_ptr()).sibling {
                    last_child = next;
                }
                self.append_roots(first_child, last_child);
            }
        }

        self.consolidate();
        self.min = self.scan_min();

        // SAFETY: the removed root has been unlinked and its children moved to
        // the root list, so this Box is the only owner left.
        let node = unsafe { Box::from_raw(removed.as_ptr()) };
        Some(node.key)
    }

    /// Concatenates `other`'s root list onto ours
    ///
    /// **Time Complexity**: O(1)
    ///
    /// Sizes add up and the smaller of the two cached minimums is kept. No
    /// consolidation is performed.
    fn merge(&mut self, other: &mut Self) {
        let (Some(other_head), Some(other_tail), Some(other_min)) =
            (other.head.take(), other.tail.take(), other.min.take())
        else {
            return;
        };

        unsafe {
            let keep_ours = match self.min {
                Some(min) => (*min.as_ptr()).key <= (*other_min.as_ptr()).key,
                None => false,
            };
            if !keep_ours {
                self.min = Some(other_min);
            }
            self.append_roots(other_head, other_tail);
        }

        self.len += mem::take(&mut other.len);
    }

    fn iter(&self) -> Iter<'_, K> {
        let mut queue = VecDeque::new();
        let mut root = self.head;
        while let Some(node) = root {
            queue.push_back(node);
            root = unsafe { (*node.as_ptr()).sibling };
        }
        Iter {
            queue,
            remaining: self.len,
            _marker: PhantomData,
        }
    }
}

impl<K: Ord> LazyBinomialHeap<K> {
    /// Returns the number of trees in the root list
    ///
    /// **Time Complexity**: O(number of roots)
    pub fn root_count(&self) -> usize {
        self.roots().count()
    }

    /// Iterates over the roots of the forest in root-list order
    fn roots(&self) -> impl Iterator<Item = NodePtr<K>> + '_ {
        let mut current = self.head;
        std::iter::from_fn(move || {
            let node = current?;
            current = unsafe { (*node.as_ptr()).sibling };
            Some(node)
        })
    }

    /// Hangs the chain `first..=last` off the end of the root list
    ///
    /// # Safety
    /// `first` must start a sibling chain ending at `last`, owned by no one
    /// else, with `last.sibling == None`.
    unsafe fn append_roots(&mut self, first: NodePtr<K>, last: NodePtr<K>) {
        match self.tail {
            Some(tail) => (*tail.as_ptr()).sibling = Some(first),
            None => self.head = Some(first),
        }
        self.tail = Some(last);
    }

    /// Finds the minimum root by a linear scan and unlinks it
    ///
    /// The first of several equal minimum roots is taken. Decrements `len`.
    fn remove_min_root(&mut self) -> Link<K> {
        let head = self.head?;

        let mut min = head;
        let mut before_min: Link<K> = None;
        let mut prev = head;
        let mut current = unsafe { (*head.as_ptr()).sibling };

        while let Some(node) = current {
            unsafe {
                if (*node.as_ptr()).key < (*min.as_ptr()).key {
                    min = node;
                    before_min = Some(prev);
                }
                prev = node;
                current = (*node.as_ptr()).sibling;
            }
        }

        unsafe {
            let after_min = (*min.as_ptr()).sibling.take();
            match before_min {
                Some(before) => (*before.as_ptr()).sibling = after_min,
                None => self.head = after_min,
            }
            if after_min.is_none() {
                self.tail = before_min;
            }
        }

        self.min = None;
        self.len -= 1;
        Some(min)
    }

    /// Number of degree buckets needed to consolidate `len` nodes
    ///
    /// ⌈log₂ len⌉ + 1, which covers every degree a binomial tree over `len`
    /// nodes can reach.
    fn bucket_count(len: usize) -> usize {
        match len {
            0 | 1 => 1,
            n => (usize::BITS - (n - 1).leading_zeros()) as usize + 1,
        }
    }

    /// Links two trees of equal degree into one tree of degree + 1
    ///
    /// **Time Complexity**: O(1)
    ///
    /// The root with the larger key becomes the first child of the other.
    /// `first` stays on top unless its key is strictly greater, so on equal keys
    /// `second` becomes the child.
    fn link(first: NodePtr<K>, second: NodePtr<K>) -> NodePtr<K> {
        unsafe {
            let (parent, child) = if (*first.as_ptr()).key > (*second.as_ptr()).key {
                (second, first)
            } else {
                (first, second)
            };

            (*child.as_ptr()).sibling = (*parent.as_ptr()).child;
            (*parent.as_ptr()).child = Some(child);
            (*parent.as_ptr()).degree += 1;

            trace!(
                "linked two degree-{} trees",
                (*parent.as_ptr()).degree - 1
            );
            parent
        }
    }

    /// Restores distinct root degrees
    ///
    /// **Time Complexity**: O(roots + log n)
    ///
    /// **Algorithm**:
    /// 1. Counting sort: detach every root into the bucket for its degree
    /// 2. From degree 0 upward, pop pairs out of any bucket holding two or more
    ///    trees, link them and push the result into the next bucket
    /// 3. Rebuild the root list from the non-empty buckets, ascending degree
    fn consolidate(&mut self) {
        let Some(head) = self.head.take() else {
            return;
        };
        self.tail = None;

        let mut buckets: Vec<Bucket<K>> = (0..Self::bucket_count(self.len))
            .map(|_| Bucket::new())
            .collect();

        let mut roots_before = 0usize;
        let mut current = Some(head);
        while let Some(node) = current {
            let degree = unsafe {
                current = (*node.as_ptr()).sibling.take();
                (*node.as_ptr()).degree
            };
            if degree >= buckets.len() {
                buckets.resize_with(degree + 1, Bucket::new);
            }
            buckets[degree].push(node);
            roots_before += 1;
        }

        let mut links = 0usize;
        let mut degree = 0;
        while degree < buckets.len() {
            while buckets[degree].len() > 1 {
                let bucket = &mut buckets[degree];
                let n = bucket.len();
                let first = bucket[n - 1];
                let second = bucket[n - 2];
                bucket.truncate(n - 2);

                let tree = Self::link(first, second);
                if degree + 1 == buckets.len() {
                    buckets.push(Bucket::new());
                }
                buckets[degree + 1].push(tree);
                links += 1;
            }
            degree += 1;
        }

        for bucket in &buckets {
            if let Some(&tree) = bucket.first() {
                unsafe { self.append_roots(tree, tree) };
            }
        }

        debug!(
            "consolidated {} roots into {} with {} links ({} buckets, {} nodes)",
            roots_before,
            roots_before - links,
            links,
            buckets.len(),
            self.len
        );
    }

    /// Finds the root with the smallest key
    fn scan_min(&self) -> Link<K> {
        let mut best: Link<K> = None;
        for root in self.roots() {
            let better = match best {
                Some(best) => unsafe { (*root.as_ptr()).key < (*best.as_ptr()).key },
                None => true,
            };
            if better {
                best = Some(root);
            }
        }
        best
    }
}

impl<K: Ord> Default for LazyBinomialHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for LazyBinomialHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for LazyBinomialHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for LazyBinomialHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Breadth-first iterator over a [`LazyBinomialHeap`]
///
/// Yields every root in root-list order, then the children of each visited
/// node in sibling order, level by level.
pub struct Iter<'a, K> {
    queue: VecDeque<NodePtr<K>>,
    remaining: usize,
    _marker: PhantomData<&'a K>,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            queue: self.queue.clone(),
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let node = self.queue.pop_front()?;
        unsafe {
            let mut child = (*node.as_ptr()).child;
            while let Some(c) = child {
                self.queue.push_back(c);
                child = (*c.as_ptr()).sibling;
            }
            self.remaining -= 1;
            Some(&(*node.as_ptr()).key)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    impl<K: Ord> LazyBinomialHeap<K> {
        fn root_degrees(&self) -> Vec<usize> {
            self.roots()
                .map(|root| unsafe { (*root.as_ptr()).degree })
                .collect()
        }

        /// Checks heap order, degree == child count and |Bₖ| == 2ᵏ for every
        /// tree, and that the cached minimum and `len` are right
        fn assert_forest_valid(&self) {
            let mut total = 0;
            for root in self.roots() {
                total += Self::assert_tree_valid(root);
            }
            assert_eq!(total, self.len);

            match (self.min, self.scan_min()) {
                (Some(cached), Some(scanned)) => unsafe {
                    assert!((*cached.as_ptr()).key == (*scanned.as_ptr()).key);
                },
                (None, None) => {}
                _ => panic!("cached minimum out of sync"),
            }

            let last_root = self.roots().last();
            assert_eq!(last_root, self.tail);
        }

        /// Returns the subtree size
        fn assert_tree_valid(node: NodePtr<K>) -> usize {
            unsafe {
                let degree = (*node.as_ptr()).degree;
                let mut children = 0;
                let mut size = 1;
                let mut child = (*node.as_ptr()).child;
                while let Some(c) = child {
                    assert!((*node.as_ptr()).key <= (*c.as_ptr()).key, "heap order");
                    size += Self::assert_tree_valid(c);
                    children += 1;
                    child = (*c.as_ptr()).sibling;
                }
                assert_eq!(children, degree, "degree must equal child count");
                assert_eq!(size, 1 << degree, "binomial tree size");
                size
            }
        }

        fn assert_consolidated(&self) {
            let mut degrees = self.root_degrees();
            let count = degrees.len();
            degrees.sort_unstable();
            degrees.dedup();
            assert_eq!(degrees.len(), count, "two roots share a degree");
            // Roots come out of consolidation in ascending degree order
            assert!(self.root_degrees().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_insert_is_lazy() {
        let mut heap = LazyBinomialHeap::new();
        for key in 0..16 {
            heap.insert(key);
        }
        assert_eq!(heap.root_count(), 16);
        assert!(heap.root_degrees().iter().all(|&d| d == 0));
        heap.assert_forest_valid();
    }

    #[test]
    fn test_extract_consolidates() {
        let mut heap: LazyBinomialHeap<i32> = (0..16).collect();
        assert_eq!(heap.extract_min(), Some(0));
        heap.assert_forest_valid();
        heap.assert_consolidated();

        // 15 = 0b1111 nodes: one tree each of degree 0..=3
        assert_eq!(heap.root_degrees(), vec![0, 1, 2, 3]);
        assert_eq!(heap.minimum(), Some(&1));
    }

    #[test]
    fn test_consolidated_after_every_extract() {
        let mut heap = LazyBinomialHeap::new();
        for i in 0..200 {
            heap.insert((i * 37) % 101);
        }
        let mut last = i32::MIN;
        while let Some(key) = heap.extract_min() {
            assert!(key >= last);
            last = key;
            heap.assert_forest_valid();
            heap.assert_consolidated();
            assert_eq!(heap.root_count(), heap.len().count_ones() as usize);
        }
    }

    #[test]
    fn test_merge_concatenates_root_lists() {
        let mut a: LazyBinomialHeap<i32> = (0..8).collect();
        a.extract_min();
        let roots_a = a.root_count();

        let mut b: LazyBinomialHeap<i32> = [-3, 40, 2].into_iter().collect();
        a.merge(&mut b);

        assert_eq!(a.root_count(), roots_a + 3);
        assert_eq!(a.len(), 10);
        assert_eq!(a.minimum(), Some(&-3));
        assert!(b.is_empty());
        assert_eq!(b.root_count(), 0);
        a.assert_forest_valid();
        b.assert_forest_valid();
    }

    #[test]
    fn test_merge_into_empty() {
        let mut empty = LazyBinomialHeap::new();
        let mut full: LazyBinomialHeap<i32> = [5, 1, 9].into_iter().collect();
        empty.merge(&mut full);
        empty.assert_forest_valid();
        assert_eq!(empty.minimum(), Some(&1));
        assert_eq!(empty.len(), 3);

        full.insert(4);
        full.assert_forest_valid();
        assert_eq!(full.len(), 1);
    }

    #[test]
    fn test_many_singleton_merges() {
        let mut heap = LazyBinomialHeap::new();
        for key in (0..1000).rev() {
            let mut single = LazyBinomialHeap::new();
            single.insert(key);
            heap.merge(&mut single);
        }
        assert_eq!(heap.root_count(), 1000);
        assert_eq!(heap.extract_min(), Some(0));
        heap.assert_consolidated();
        assert_eq!(heap.root_count(), 999usize.count_ones() as usize);
    }

    #[test]
    fn test_bucket_count() {
        assert_eq!(LazyBinomialHeap::<i32>::bucket_count(0), 1);
        assert_eq!(LazyBinomialHeap::<i32>::bucket_count(1), 1);
        assert_eq!(LazyBinomialHeap::<i32>::bucket_count(2), 2);
        assert_eq!(LazyBinomialHeap::<i32>::bucket_count(3), 3);
        assert_eq!(LazyBinomialHeap::<i32>::bucket_count(4), 3);
        assert_eq!(LazyBinomialHeap::<i32>::bucket_count(5), 4);
        assert_eq!(LazyBinomialHeap::<i32>::bucket_count(1024), 11);
        assert_eq!(LazyBinomialHeap::<i32>::bucket_count(1025), 12);
    }

    #[test]
    fn test_breadth_first_iteration() {
        let mut heap: LazyBinomialHeap<i32> = (1..=5).collect();
        assert_eq!(heap.extract_min(), Some(1));
        // Buckets: [2,3,4,5] at degree 0. Pops 5,4 -> 4{5}; pops 3,2 -> 2{3};
        // degree 1: pops 2{3}, 4{5} -> 2{4{5},3}
        assert_eq!(heap.root_degrees(), vec![2]);
        assert_eq!(heap.iter().copied().collect::<Vec<_>>(), vec![2, 4, 3, 5]);

        heap.insert(0);
        assert_eq!(heap.iter().copied().collect::<Vec<_>>(), vec![2, 0, 4, 3, 5]);
        assert_eq!(heap.iter().len(), 5);

        // Restartable
        let iter = heap.iter();
        assert_eq!(iter.clone().count(), iter.count());
    }

    /// Key ordered only by `rank`
    #[derive(Debug, Clone, Copy)]
    struct Tagged {
        rank: i32,
        origin: char,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.rank == other.rank
        }
    }

    impl Eq for Tagged {}

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> Ordering {
            self.rank.cmp(&other.rank)
        }
    }

    #[test]
    fn test_link_tie_break_keeps_first_on_top() {
        let mut heap = LazyBinomialHeap::new();
        heap.insert(Tagged { rank: 0, origin: 'm' });
        heap.insert(Tagged { rank: 7, origin: 'a' });
        heap.insert(Tagged { rank: 7, origin: 'b' });

        assert_eq!(heap.extract_min().map(|t| t.origin), Some('m'));
        // Bucket 0 holds [a, b]; b is popped first and stays the root
        let order: String = heap.iter().map(|t| t.origin).collect();
        assert_eq!(order, "ba");
        heap.assert_forest_valid();
    }

    #[test]
    fn test_duplicates_survive_consolidation() {
        let mut heap: LazyBinomialHeap<i32> = [3, 3, 3, 1, 3, 3].into_iter().collect();
        assert_eq!(heap.extract_min(), Some(1));
        heap.assert_forest_valid();
        assert_eq!(heap.into_sorted_vec(), vec![3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_deep_forest_drop() {
        let mut heap: LazyBinomialHeap<String> = (0..4096).map(|i| format!("{i:05}")).collect();
        heap.extract_min();
        heap.assert_consolidated();
        // remaining nodes are freed by Drop without recursion
    }
}
