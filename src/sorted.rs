//! Sorted Linked Heap implementation
//!
//! A doubly-linked list kept in non-decreasing key order after every
//! operation. The minimum is always the head, so extraction is trivial and
//! the work moves into insertion and merging.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity |
//! |---------------|------------|
//! | `insert`      | O(n)       |
//! | `minimum`     | O(1)       |
//! | `extract_min` | O(1)       |
//! | `merge`       | O(n + m)   |
//!
//! # Algorithm Overview
//!
//! `merge` is the two-pointer merge step of merge sort, performed in place:
//! nodes of the other list are relinked into ours, nothing is allocated and no
//! key is moved. `insert` wraps the key in a one-node heap and merges it.
//!
//! **Tie-break**: a node from the other list is spliced in front of the first
//! of our nodes whose key is not strictly smaller, so among equal keys the
//! merged-in ones come first.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::MergeableHeap;
//! use mergeable_heaps::sorted::SortedLinkedHeap;
//!
//! let mut heap = SortedLinkedHeap::new();
//! heap.insert(10);
//! heap.insert(5);
//! heap.insert(15);
//!
//! assert_eq!(heap.iter().copied().collect::<Vec<_>>(), vec![5, 10, 15]);
//! assert_eq!(heap.extract_min(), Some(5));
//! ```

use crate::traits::MergeableHeap;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

type Link<K> = Option<NonNull<Node<K>>>;

struct Node<K> {
    key: K,
    next: Link<K>,
    prev: Link<K>,
}

/// Mergeable heap over a sorted doubly-linked list
pub struct SortedLinkedHeap<K> {
    /// Smallest key; the list is non-decreasing from here
    head: Link<K>,
    len: usize,
    _marker: PhantomData<Box<Node<K>>>,
}

unsafe impl<K: Send> Send for SortedLinkedHeap<K> {}
unsafe impl<K: Sync> Sync for SortedLinkedHeap<K> {}

impl<K> Drop for SortedLinkedHeap<K> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            current = node.next;
        }
    }
}

impl<K: Ord> MergeableHeap<K> for SortedLinkedHeap<K> {
    type Iter<'a>
        = Iter<'a, K>
    where
        Self: 'a,
        K: 'a;

    fn new() -> Self {
        Self {
            head: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    /// Inserts by merging a single-node heap
    ///
    /// **Time Complexity**: O(n)
    fn insert(&mut self, key: K) {
        let mut single = Self::singleton(key);
        self.merge(&mut single);
    }

    fn minimum(&self) -> Option<&K> {
        self.head.map(|head| unsafe { &(*head.as_ptr()).key })
    }

    /// Pops the head node
    ///
    /// **Time Complexity**: O(1)
    fn extract_min(&mut self) -> Option<K> {
        let head = self.head?;
        // SAFETY: head is owned by this list and is detached before the Box is
        // rebuilt.
        let node = unsafe { Box::from_raw(head.as_ptr()) };

        self.head = node.next;
        if let Some(next) = self.head {
            unsafe { (*next.as_ptr()).prev = None };
        }

        self.len -= 1;
        Some(node.key)
    }

    /// Merges `other`'s sorted list into ours by relinking nodes
    ///
    /// **Time Complexity**: O(n + m)
    ///
    /// **Algorithm**:
    /// 1. Walk both lists with one cursor each, tracking the last node placed
    /// 2. While our key is strictly smaller, advance our cursor
    /// 3. Otherwise splice their node in front of our cursor
    /// 4. When our list runs out, hang their remaining suffix off the last
    ///    node in one step; when theirs runs out we are done
    fn merge(&mut self, other: &mut Self) {
        let Some(their_head) = other.head.take() else {
            return;
        };
        self.len += mem::take(&mut other.len);

        if self.head.is_none() {
            self.head = Some(their_head);
            return;
        }

        let mut prev: Link<K> = None;
        let mut ours = self.head;
        let mut theirs = Some(their_head);

        unsafe {
            while let (Some(our_node), Some(their_node)) = (ours, theirs) {
                if (*our_node.as_ptr()).key < (*their_node.as_ptr()).key {
                    prev = ours;
                    ours = (*our_node.as_ptr()).next;
                    continue;
                }

                let their_next = (*their_node.as_ptr()).next;
                match prev {
                    Some(prev) => (*prev.as_ptr()).next = theirs,
                    None => self.head = theirs,
                }
                (*their_node.as_ptr()).prev = prev;
                (*their_node.as_ptr()).next = ours;
                (*our_node.as_ptr()).prev = theirs;

                prev = theirs;
                theirs = their_next;
            }

            if let (Some(last), Some(rest)) = (prev, theirs) {
                (*last.as_ptr()).next = Some(rest);
                (*rest.as_ptr()).prev = Some(last);
            }
        }
    }

    fn iter(&self) -> Iter<'_, K> {
        Iter {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }
}

impl<K: Ord> SortedLinkedHeap<K> {
    fn singleton(key: K) -> Self {
        let node = NonNull::from(Box::leak(Box::new(Node {
            key,
            next: None,
            prev: None,
        })));
        Self {
            head: Some(node),
            len: 1,
            _marker: PhantomData,
        }
    }
}

impl<K: Ord> Default for SortedLinkedHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for SortedLinkedHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for SortedLinkedHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for SortedLinkedHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the keys of a [`SortedLinkedHeap`], smallest first
pub struct Iter<'a, K> {
    next: Link<K>,
    remaining: usize,
    _marker: PhantomData<&'a K>,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            next: self.next,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let node = self.next?;
        unsafe {
            self.next = (*node.as_ptr()).next;
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
