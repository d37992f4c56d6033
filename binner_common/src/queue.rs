// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fixed-capacity FIFO ring queue.
//!
//! [`BinQueue`] never grows: pushing onto a full queue or popping from an empty one is a
//! contract violation and panics. The binning manager always drains its queues before they
//! overflow, so hitting one of these assertions indicates a bug in the caller.
//!
//! Elements can also be addressed directly through the [`Slot`] handle returned by
//! [`BinQueue::push`]. A slot identifies one particular push rather than a storage position,
//! which keeps it unambiguous after the queue wraps around: once the element has been popped,
//! skipped, reset away or overwritten, [`BinQueue::get`] returns `None` for it.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::ops::{Index, IndexMut};

/// A handle to an element pushed onto a [`BinQueue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    seq: u64,
}

/// A fixed-capacity FIFO queue holding up to `N` elements.
pub struct BinQueue<T, const N: usize> {
    items: Vec<T>,
    /// Sequence number of the element at the head of the queue.
    head: u64,
    /// Sequence number the next pushed element will get.
    tail: u64,
}

impl<T, const N: usize> BinQueue<T, N> {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        assert!(N > 0, "a bin queue needs a capacity of at least one element");

        Self {
            items: Vec::with_capacity(N),
            head: 0,
            tail: 0,
        }
    }

    /// Logically remove all elements.
    ///
    /// Stored elements aren't dropped eagerly, they are overwritten by subsequent pushes.
    /// All previously returned slots become stale.
    pub fn reset(&mut self) {
        self.head = self.tail;
    }

    /// Append an element at the tail of the queue and return its slot.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full.
    pub fn push(&mut self, item: T) -> Slot {
        assert!(!self.is_full(), "pushed onto a full bin queue (capacity {N})");

        let slot = Slot { seq: self.tail };
        let idx = Self::position(slot.seq);
        if idx == self.items.len() {
            self.items.push(item);
        } else {
            self.items[idx] = item;
        }
        self.tail += 1;

        slot
    }

    /// Remove the element at the head of the queue and return a copy of it.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn pop(&mut self) -> T
    where
        T: Clone,
    {
        assert!(!self.is_empty(), "popped from an empty bin queue");

        let idx = Self::position(self.head);
        self.head += 1;

        self.items[idx].clone()
    }

    /// Return the element at the head of the queue without removing it.
    pub fn peek_next(&self) -> Option<&T> {
        self.get(Slot { seq: self.head })
    }

    /// Remove the element at the head of the queue.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn skip_next(&mut self) {
        assert!(!self.is_empty(), "skipped an element of an empty bin queue");

        self.head += 1;
    }

    /// The number of elements currently in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        // Never larger than `N`.
        (self.tail - self.head) as usize
    }

    /// Whether no further element can be pushed.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Whether the queue holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// The maximum number of elements the queue can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether `slot` refers to an element that is still in the queue.
    #[inline]
    pub fn is_live(&self, slot: Slot) -> bool {
        (self.head..self.tail).contains(&slot.seq)
    }

    /// The slot of the most recently pushed element, if it is still in the queue.
    pub fn last_slot(&self) -> Option<Slot> {
        (!self.is_empty()).then(|| Slot { seq: self.tail - 1 })
    }

    /// Return the element for `slot`, or `None` if it is no longer in the queue.
    pub fn get(&self, slot: Slot) -> Option<&T> {
        self.is_live(slot).then(|| &self.items[Self::position(slot.seq)])
    }

    /// Return the element for `slot` mutably, or `None` if it is no longer in the queue.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        if self.is_live(slot) {
            Some(&mut self.items[Self::position(slot.seq)])
        } else {
            None
        }
    }

    /// The position of `slot` in the queue's storage.
    ///
    /// This is the physical slot number (`0..N`), not the distance from the head of the queue.
    /// Different pushes end up with the same index once the queue wraps around, so the result
    /// is only meaningful while [`is_live`](BinQueue::is_live) holds for `slot`.
    pub fn index_of(&self, slot: Slot) -> usize {
        Self::position(slot.seq)
    }

    #[inline]
    fn position(seq: u64) -> usize {
        // Truncation is fine, the remainder is always smaller than `N`.
        (seq % N as u64) as usize
    }

    /// Iterate over the elements of the queue, from head to tail.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        (self.head..self.tail).map(move |seq| &self.items[Self::position(seq)])
    }

    /// Iterate over the slots of the queue's elements, from head to tail.
    pub fn iter_slots(&self) -> impl DoubleEndedIterator<Item = Slot> {
        (self.head..self.tail).map(|seq| Slot { seq })
    }
}

impl<T, const N: usize> Default for BinQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Index<Slot> for BinQueue<T, N> {
    type Output = T;

    fn index(&self, slot: Slot) -> &T {
        match self.get(slot) {
            Some(item) => item,
            None => panic!("{slot:?} is no longer in the bin queue"),
        }
    }
}

impl<T, const N: usize> IndexMut<Slot> for BinQueue<T, N> {
    fn index_mut(&mut self, slot: Slot) -> &mut T {
        match self.get_mut(slot) {
            Some(item) => item,
            None => panic!("{slot:?} is no longer in the bin queue"),
        }
    }
}

impl<T, const N: usize> Debug for BinQueue<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BinQueue")
            .field("len", &self.len())
            .field("capacity", &N)
            .finish_non_exhaustive()
    }
}
