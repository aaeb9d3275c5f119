//! Unsorted Linked Heap implementation
//!
//! An unordered doubly-linked list with a cached pointer to the minimum node.
//! Order is never maintained, so the cost of a heap lives in extraction.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity |
//! |---------------|------------|
//! | `insert`      | O(1)       |
//! | `minimum`     | O(1)       |
//! | `extract_min` | O(n)       |
//! | `merge`       | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::MergeableHeap;
//! use mergeable_heaps::unsorted::UnsortedLinkedHeap;
//!
//! let mut heap = UnsortedLinkedHeap::new();
//! heap.insert(10);
//! heap.insert(5);
//! heap.insert(15);
//!
//! assert_eq!(heap.minimum(), Some(&5));
//! // Diagnostic traversal keeps insertion order
//! assert_eq!(heap.iter().copied().collect::<Vec<_>>(), vec![10, 5, 15]);
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

/// Mergeable heap over an unsorted doubly-linked list
///
/// `head`/`tail` own the list; `min` is a non-owning pointer into it.
pub struct UnsortedLinkedHeap<K> {
    head: Link<K>,
    tail: Link<K>,
    /// Node holding the smallest key, None iff the list is empty
    min: Link<K>,
    len: usize,
    _marker: PhantomData<Box<Node<K>>>,
}

// The heap exclusively owns its nodes, just like `std::collections::LinkedList`.
unsafe impl<K: Send> Send for UnsortedLinkedHeap<K> {}
unsafe impl<K: Sync> Sync for UnsortedLinkedHeap<K> {}

impl<K> Drop for UnsortedLinkedHeap<K> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            // SAFETY: every node reachable from head was leaked from a Box by
            // `insert` and is freed exactly once here.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            current = node.next;
        }
        self.tail = None;
        self.min = None;
    }
}

impl<K: Ord> MergeableHeap<K> for UnsortedLinkedHeap<K> {
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

    /// Appends the key at the tail
    ///
    /// **Time Complexity**: O(1)
    fn insert(&mut self, key: K) {
        let node = NonNull::from(Box::leak(Box::new(Node {
            key,
            next: None,
            prev: self.tail,
        })));

        unsafe {
            match self.tail {
                Some(tail) => (*tail.as_ptr()).next = Some(node),
                None => self.head = Some(node),
            }
            self.tail = Some(node);

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
        // SAFETY: `min` points into the list owned by `self`, which cannot be
        // mutated while the returned borrow is alive.
        self.min.map(|min| unsafe { &(*min.as_ptr()).key })
    }

    /// Removes and returns the minimum key
    ///
    /// **Time Complexity**: O(n)
    ///
    /// Unlinking the cached minimum is O(1) thanks to the `prev` back-link.
    /// The new minimum has to be found by rescanning the whole list.
    fn extract_min(&mut self) -> Option<K> {
        let min = self.min.take()?;

        // SAFETY: `min` is a live node of this list; after unlinking it nothing
        // else refers to it, so reclaiming the Box is sound.
        let node = unsafe {
            self.unlink(min);
            Box::from_raw(min.as_ptr())
        };

        self.len -= 1;
        self.min = self.scan_min();
        Some(node.key)
    }

    /// Splices `other`'s list onto our tail
    ///
    /// **Time Complexity**: O(1). An empty `other` is a no-op.
    fn merge(&mut self, other: &mut Self) {
        let (Some(other_head), Some(other_tail), Some(other_min)) =
            (other.head.take(), other.tail.take(), other.min.take())
        else {
            return;
        };

        unsafe {
            match (self.tail, self.min) {
                (Some(tail), Some(min)) => {
                    (*tail.as_ptr()).next = Some(other_head);
                    (*other_head.as_ptr()).prev = Some(tail);
                    if (*other_min.as_ptr()).key < (*min.as_ptr()).key {
                        self.min = Some(other_min);
                    }
                }
                _ => {
                    self.head = Some(other_head);
                    self.min = Some(other_min);
                }
            }
        }

        self.tail = Some(other_tail);
        self.len += mem::take(&mut other.len);
    }

    fn iter(&self) -> Iter<'_, K> {
        Iter {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }
}

impl<K: Ord> UnsortedLinkedHeap<K> {
    /// Detaches `node` from the list, fixing up its neighbours and head/tail
    ///
    /// # Safety
    /// `node` must be a live node of this list.
    unsafe fn unlink(&mut self, node: NonNull<Node<K>>) {
        let next = (*node.as_ptr()).next.take();
        let prev = (*node.as_ptr()).prev.take();

        match prev {
            Some(prev) => (*prev.as_ptr()).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => (*next.as_ptr()).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Finds the node with the smallest key by walking the whole list
    ///
    /// The first of several equal minimums wins.
    fn scan_min(&self) -> Link<K> {
        let mut best = self.head?;
        let mut current = unsafe { (*best.as_ptr()).next };
        while let Some(node) = current {
            unsafe {
                if (*node.as_ptr()).key < (*best.as_ptr()).key {
                    best = node;
                }
                current = (*node.as_ptr()).next;
            }
        }
        Some(best)
    }
}

impl<K: Ord> Default for UnsortedLinkedHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for UnsortedLinkedHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for UnsortedLinkedHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for UnsortedLinkedHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the keys of an [`UnsortedLinkedHeap`] in list order
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
        // SAFETY: the iterator borrows the heap for 'a, so every node stays alive
        // and unmodified for that long.
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
