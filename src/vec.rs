// This file is part of fixed-vec.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `FixedVec` type and its inherent API.
//!
//! `FixedVec<T, A>` is a heap-allocated sequence whose length is fixed at
//! construction. It owns one contiguous block obtained from its allocation
//! strategy, holds exactly `len` live elements in it, and releases both
//! exactly once when dropped. Methods mirror slice semantics wherever they
//! make sense; anything that would change the length does not exist.

mod new;

// Crate imports
use crate::{
    error::Error,
    iter::{Iter, IterMut},
    strategy::{Allocator, Global},
};

// Core imports
use core::{
    borrow::{Borrow, BorrowMut},
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Deref, DerefMut},
    ptr::NonNull,
    slice,
};

/// A heap-allocated vector with a fixed length and a pluggable allocation
/// strategy.
///
/// `FixedVec<T, A>` allocates storage for exactly `len` elements through its
/// strategy `A` at construction and keeps that block, untouched, for its
/// whole lifetime:
///
/// - the length is chosen at runtime, once; there is no way to change it;
/// - elements live contiguously, so the full slice API is available through
///   [`Deref`] and [`as_slice`](FixedVec::as_slice);
/// - [`Clone`] deep-copies every element into a fresh block; moving the
///   vector transfers ownership of the block without copying elements;
/// - dropping destroys each element in index order, then releases the block.
///
/// # Layout and invariants
///
/// Internally, `FixedVec<T, A>` maintains:
///
/// - `ptr`, the canonical storage pointer (`NonNull<T>`): the start of a live
///   allocation of exactly `len` elements whenever `len > 0` and `T` is not
///   zero-sized, and a dangling-but-aligned pointer otherwise;
/// - `len`, immutable after construction;
/// - `alloc`, the strategy instance that produced (and will release) the
///   block.
///
/// Exactly `len` elements are initialized at every externally observable
/// moment. Construction that fails partway through destroys the prefix it
/// built and releases the block before surfacing the failure.
///
/// # Construction variants
///
/// | variant | constructor |
/// |---|---|
/// | empty | [`new`](FixedVec::new), [`new_in`](FixedVec::new_in), [`Default`] |
/// | `len` copies of a value | [`from_elem`](FixedVec::from_elem) / [`from_elem_in`](FixedVec::from_elem_in) |
/// | `len` default values | [`from_default`](FixedVec::from_default) / [`from_default_in`](FixedVec::from_default_in) |
/// | first `len` items of an iterator | [`from_iter_exact`](FixedVec::from_iter_exact) / [`from_iter_exact_in`](FixedVec::from_iter_exact_in) |
/// | clone of a slice | [`from_slice`](FixedVec::from_slice) / [`from_slice_in`](FixedVec::from_slice_in) |
/// | deep copy | [`Clone`], [`try_clone`](FixedVec::try_clone), [`try_clone_in`](FixedVec::try_clone_in) |
/// | move into another strategy | [`migrate_in`](FixedVec::migrate_in) |
/// | by-value sequences | `From<[T; N]>`, `From<Vec<T>>`, `FromIterator` |
///
/// # Assignment policy
///
/// Plain assignment is a move and transfers the allocation. `clone_from`
/// reuses the existing block (element-wise `clone_from`) when the lengths
/// already match, and otherwise replaces the allocation wholesale — "fixed
/// size" means fixed at any given time, not fixed forever across
/// assignments.
///
/// # Examples
///
/// ```rust
/// use fixed_vec::FixedVec;
///
/// let mut v = FixedVec::from_elem(4, 1u32).unwrap();
/// v[2] = 9;
/// assert_eq!(v.as_slice(), &[1, 1, 9, 1]);
///
/// let total: u32 = v.iter().sum();
/// assert_eq!(total, 12);
///
/// // Deep copy: the clone owns its own block.
/// let mut c = v.clone();
/// c[0] = 100;
/// assert_eq!(v[0], 1);
/// ```
pub struct FixedVec<T, A: Allocator = Global> {
    // Invariants:
    // - `len` never changes after construction.
    // - When `len > 0` and `T` is not zero-sized, `ptr` is the start of a
    //   live allocation of exactly `len` elements obtained from `alloc`.
    // - Otherwise `ptr` is dangling (aligned, non-null) and no block exists.
    // - Elements `[0, len)` are initialized at all times.
    pub(crate) ptr: NonNull<T>,
    pub(crate) len: usize,
    pub(crate) alloc: A,
    pub(crate) _marker: PhantomData<T>,
}

// SAFETY: `FixedVec` owns its elements and strategy; sending or sharing it is
// exactly as safe as sending or sharing `T` and `A`.
unsafe impl<T: Send, A: Allocator + Send> Send for FixedVec<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for FixedVec<T, A> {}

impl<T, A: Allocator> FixedVec<T, A> {
    /// Returns the fixed element count.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if `len == 0`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the allocation strategy.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the raw storage pointer.
    ///
    /// Dangling (but aligned and non-null) when the vector is empty or `T`
    /// is zero-sized.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns the raw storage pointer, mutably.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Views the whole vector as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: By invariant, `ptr` is valid for reads of `len` initialized
        // elements (dangling-but-aligned is fine for `len == 0` and ZSTs).
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Views the whole vector as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: Same as `as_slice`; `&mut self` gives exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Returns `Some(&T)` if `i < len`, otherwise `None`.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.as_slice().get(i)
    }

    /// Returns `Some(&mut T)` if `i < len`, otherwise `None`.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(i)
    }

    /// Checked access: returns [`Error::OutOfBounds`] when `i >= len`.
    #[inline]
    pub fn at(&self, i: usize) -> Result<&T, Error> {
        self.as_slice().get(i).ok_or(Error::OutOfBounds)
    }

    /// Checked mutable access: returns [`Error::OutOfBounds`] when `i >= len`.
    #[inline]
    pub fn at_mut(&mut self, i: usize) -> Result<&mut T, Error> {
        self.as_mut_slice().get_mut(i).ok_or(Error::OutOfBounds)
    }

    /// Returns the first element, if any.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element, if any.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the first element mutably, if any.
    #[inline]
    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element mutably, if any.
    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Borrowing iterator over the elements in index order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slice())
    }

    /// Mutably borrowing iterator over the elements in index order.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.as_mut_slice())
    }

    /// Overwrites every element with a clone of `value`.
    ///
    /// Elements are assigned, never reconstructed; the length is unchanged
    /// and no allocation takes place.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for slot in self.as_mut_slice() {
            slot.clone_from(&value);
        }
    }
}

impl<T, A: Allocator> Drop for FixedVec<T, A> {
    fn drop(&mut self) {
        for i in 0..self.len {
            // SAFETY: every slot in `[0, len)` holds a live element and each
            // is destroyed exactly once, in index order.
            unsafe { self.alloc.destroy(self.ptr.as_ptr().add(i)) };
        }
        // SAFETY: `ptr`/`len` came from `self.alloc.allocate` at construction
        // and no element is live anymore.
        unsafe { self.alloc.deallocate(self.ptr, self.len) };
    }
}

impl<T: Clone, A: Allocator> Clone for FixedVec<T, A> {
    /// Deep copy: allocates a fresh block through a clone of the strategy and
    /// clone-constructs every element.
    ///
    /// # Panics
    ///
    /// Panics if the strategy cannot provide storage. Use
    /// [`try_clone`](FixedVec::try_clone) for a fallible variant.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(v) => v,
            Err(err) => panic!("fixed-vec: clone failed: {err}"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if self.len == source.len {
            // Equal lengths: reuse the existing block, assign element-wise.
            for (dst, src) in self.as_mut_slice().iter_mut().zip(source.as_slice()) {
                dst.clone_from(src);
            }
        } else {
            *self = source.clone();
        }
    }
}

impl<T, A: Allocator + Default> Default for FixedVec<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for FixedVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedVec")
            .field("len", &self.len)
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for FixedVec<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: Eq, A: Allocator> Eq for FixedVec<T, A> {}
impl<T: Ord, A: Allocator> Ord for FixedVec<T, A> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}
impl<T: PartialOrd, A: Allocator> PartialOrd for FixedVec<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}
impl<T: Hash, A: Allocator> Hash for FixedVec<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T, A: Allocator> Deref for FixedVec<T, A> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}
impl<T, A: Allocator> DerefMut for FixedVec<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for FixedVec<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T, A: Allocator> AsMut<[T]> for FixedVec<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

// Borrow ergonomics (treat as a slice)
impl<T, A: Allocator> Borrow<[T]> for FixedVec<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T, A: Allocator> BorrowMut<[T]> for FixedVec<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
