// This file is part of fixed-vec.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Iterator support for [`FixedVec`](crate::FixedVec).
//!
//! All three iterators share one cursor shape: a base storage pointer plus a
//! `front`/`back` index pair with `back` exclusive. [`Iter`] and [`IterMut`]
//! are the shared and exclusive borrowing variants over the same layout,
//! differing only in what the dereference yields; [`IntoIter`] owns the
//! storage outright and yields by value, releasing the block when dropped.
//!
//! Every iterator is double-ended, exact-size, and fused, with O(1) `nth` /
//! `nth_back`. Reverse traversal is `.rev()` on the forward cursor — there is
//! no separate reverse representation.

// Crate imports
use crate::{
    strategy::{Allocator, Global},
    vec::FixedVec,
};

// Core imports
use core::{
    iter::FusedIterator,
    marker::PhantomData,
    mem::ManuallyDrop,
    ptr::{self, NonNull},
};

// Cursor invariants shared by all three iterator types:
// - `front <= back <= original len`.
// - Slots in `[front, back)` are live and unyielded.
// - `base.add(i)` is in-bounds for every `i < back` (dangling-but-aligned
//   base with `back == 0` is fine, as are ZST elements).

/// Borrowing iterator returned by [`FixedVec::iter`].
pub struct Iter<'a, T> {
    base: NonNull<T>,
    front: usize,
    back: usize, // exclusive
    _marker: PhantomData<&'a T>,
}

/// Mutably borrowing iterator returned by [`FixedVec::iter_mut`].
pub struct IterMut<'a, T> {
    base: NonNull<T>,
    front: usize,
    back: usize, // exclusive
    _marker: PhantomData<&'a mut T>,
}

/// Owned iterator returned by `FixedVec::into_iter()`.
///
/// Takes over the vector's storage. Yields elements by value from front to
/// back (or back to front via [`DoubleEndedIterator`]); on drop, destroys
/// whatever was not yielded and releases the block, exactly once.
pub struct IntoIter<T, A: Allocator = Global> {
    buf: NonNull<T>,
    cap: usize, // original length, for deallocation
    front: usize,
    back: usize, // exclusive
    alloc: A,
}

// SAFETY: the iterators hold borrowed (or owned) access to `T` through a raw
// pointer; thread-safety is exactly that of the corresponding reference type.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slice: &'a [T]) -> Self {
        Self {
            base: NonNull::from(slice).cast::<T>(),
            front: 0,
            back: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Views the remaining (unyielded) elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: `[front, back)` are live elements borrowed for 'a.
        unsafe {
            core::slice::from_raw_parts(self.base.as_ptr().add(self.front), self.back - self.front)
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base,
            front: self.front,
            back: self.back,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(slice: &'a mut [T]) -> Self {
        let back = slice.len();
        Self {
            base: NonNull::from(slice).cast::<T>(),
            front: 0,
            back,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front < self.back {
            let i = self.front;
            self.front += 1;
            // SAFETY: `i < back <= len`; the slot is live for 'a.
            Some(unsafe { &*self.base.as_ptr().add(i) })
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.back - self.front;
        (rem, Some(rem))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        let rem = self.back - self.front;
        if n >= rem {
            self.front = self.back;
            return None;
        }
        let i = self.front + n; // safe: n < rem == back - front
        self.front = i + 1;
        // SAFETY: `i < back`.
        Some(unsafe { &*self.base.as_ptr().add(i) })
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: `back` was decremented from a value `> front`, so it
            // indexes a live slot.
            Some(unsafe { &*self.base.as_ptr().add(self.back) })
        } else {
            None
        }
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        let rem = self.back - self.front;
        if n >= rem {
            self.front = self.back;
            None
        } else {
            self.back -= n + 1;
            // SAFETY: `back >= front` still holds; the slot is live.
            Some(unsafe { &*self.base.as_ptr().add(self.back) })
        }
    }
}
impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.front < self.back {
            let i = self.front;
            self.front += 1;
            // SAFETY: `i < back`; each slot is yielded at most once, so the
            // exclusive borrows never alias.
            Some(unsafe { &mut *self.base.as_ptr().add(i) })
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.back - self.front;
        (rem, Some(rem))
    }

    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        let rem = self.back - self.front;
        if n >= rem {
            self.front = self.back;
            return None;
        }
        let i = self.front + n;
        self.front = i + 1;
        // SAFETY: as in `next`; skipped slots are never yielded again.
        Some(unsafe { &mut *self.base.as_ptr().add(i) })
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: as in `next`.
            Some(unsafe { &mut *self.base.as_ptr().add(self.back) })
        } else {
            None
        }
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
        let rem = self.back - self.front;
        if n >= rem {
            self.front = self.back;
            None
        } else {
            self.back -= n + 1;
            // SAFETY: as in `next`.
            Some(unsafe { &mut *self.base.as_ptr().add(self.back) })
        }
    }
}
impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front < self.back {
            let i = self.front;
            self.front += 1;
            // SAFETY: `i` indexes a live, unyielded slot; after the read the
            // slot is logically vacated and never touched again.
            Some(unsafe { ptr::read(self.buf.as_ptr().add(i)) })
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.back - self.front;
        (rem, Some(rem))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        // Skipped elements must still be dropped; walking `next` keeps the
        // cursor invariant simple.
        for _ in 0..n {
            self.next()?;
        }
        self.next()
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: as in `next`.
            Some(unsafe { ptr::read(self.buf.as_ptr().add(self.back)) })
        } else {
            None
        }
    }

    fn nth_back(&mut self, n: usize) -> Option<T> {
        for _ in 0..n {
            self.next_back()?;
        }
        self.next_back()
    }
}
impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        for i in self.front..self.back {
            // SAFETY: slots in `[front, back)` are live and unyielded; each
            // is destroyed exactly once.
            unsafe { self.alloc.destroy(self.buf.as_ptr().add(i)) };
        }
        // SAFETY: the block was allocated for `cap` elements by `alloc` (it
        // was taken over from the originating `FixedVec`) and nothing in it
        // is live anymore.
        unsafe { self.alloc.deallocate(self.buf, self.cap) };
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a FixedVec<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<'a, T, A: Allocator> IntoIterator for &'a mut FixedVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
impl<T, A: Allocator> IntoIterator for FixedVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    /// Hands the storage (and the deallocation obligation) to the iterator.
    fn into_iter(self) -> IntoIter<T, A> {
        let v = ManuallyDrop::new(self);
        // SAFETY: `v` is never dropped; the strategy is moved out exactly
        // once and every other field is `Copy`.
        let alloc = unsafe { ptr::read(&v.alloc) };
        IntoIter {
            buf: v.ptr,
            cap: v.len,
            front: 0,
            back: v.len,
            alloc,
        }
    }
}
