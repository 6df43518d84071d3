// This file is part of fixed-vec.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construction of [`FixedVec`]: the fallible constructors, the build guard
//! that gives them the strong failure guarantee, and the infallible `From` /
//! `FromIterator` conversions.

// Crate imports
use crate::{
    error::Error,
    strategy::{Allocator, Global},
    vec::FixedVec,
};

// Core imports
use core::{
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ptr::{self, NonNull},
};

// External imports - alloc
use alloc::vec::Vec;

/// Owns a partially built block during construction.
///
/// If construction stops early — a producer error or a panicking element
/// constructor — the guard's `Drop` destroys the `init` elements built so far
/// (in reverse construction order) and releases the block, so no failure can
/// leak storage or skip destructors. A completed build forgets the guard.
struct BuildGuard<'a, T, A: Allocator> {
    ptr: NonNull<T>,
    len: usize,
    init: usize,
    alloc: &'a A,
}

impl<T, A: Allocator> Drop for BuildGuard<'_, T, A> {
    fn drop(&mut self) {
        for i in (0..self.init).rev() {
            // SAFETY: slots `[0, init)` were constructed and not yet handed
            // to a `FixedVec`; each is destroyed exactly once.
            unsafe { self.alloc.destroy(self.ptr.as_ptr().add(i)) };
        }
        // SAFETY: the block came from `self.alloc.allocate::<T>(self.len)`
        // and no element in it is live anymore.
        unsafe { self.alloc.deallocate(self.ptr, self.len) };
    }
}

/// Allocates for `len` elements and constructs each one from `produce`,
/// in index order, with the strong failure guarantee.
fn build_in<T, A: Allocator>(
    len: usize,
    alloc: A,
    mut produce: impl FnMut(usize) -> Result<T, Error>,
) -> Result<FixedVec<T, A>, Error> {
    let ptr = alloc.allocate::<T>(len)?;
    let mut guard = BuildGuard {
        ptr,
        len,
        init: 0,
        alloc: &alloc,
    };
    while guard.init < len {
        let value = produce(guard.init)?;
        // SAFETY: `init < len`, so the slot is within the block and has not
        // been constructed yet.
        unsafe { alloc.construct(ptr.as_ptr().add(guard.init), value) };
        guard.init += 1;
    }
    mem::forget(guard);
    Ok(FixedVec {
        ptr,
        len,
        alloc,
        _marker: PhantomData,
    })
}

/// Unwraps results from constructors that only fail on allocation, for use in
/// infallible trait impls. Mirrors what `std` collections do on OOM.
fn infallible<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(v) => v,
        Err(err) => panic!("fixed-vec: {err}"),
    }
}

impl<T, A: Allocator> FixedVec<T, A> {
    /// Constructs an empty vector using `alloc`. Does not allocate.
    #[inline]
    pub fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Constructs a vector of `len` clones of `value` using `alloc`.
    pub fn from_elem_in(len: usize, value: T, alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        build_in(len, alloc, |_| Ok(value.clone()))
    }

    /// Constructs a vector of `len` default values using `alloc`.
    pub fn from_default_in(len: usize, alloc: A) -> Result<Self, Error>
    where
        T: Default,
    {
        build_in(len, alloc, |_| Ok(T::default()))
    }

    /// Constructs a vector from the first `len` items of `iter`, using
    /// `alloc`.
    ///
    /// Exactly `len` items are consumed; surplus items are left in the
    /// iterator untouched. Returns [`Error::IterTooShort`] (destroying
    /// whatever was already built) if the iterator ends early.
    pub fn from_iter_exact_in<I>(len: usize, iter: I, alloc: A) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        build_in(len, alloc, |_| iter.next().ok_or(Error::IterTooShort))
    }

    /// Constructs a vector by cloning every element of `src`, using `alloc`.
    pub fn from_slice_in(src: &[T], alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        build_in(src.len(), alloc, |i| Ok(src[i].clone()))
    }

    /// Fallible deep copy using a clone of this vector's own strategy.
    pub fn try_clone(&self) -> Result<Self, Error>
    where
        T: Clone,
    {
        self.try_clone_in(self.alloc.clone())
    }

    /// Fallible deep copy into storage provided by an explicit strategy.
    pub fn try_clone_in<B: Allocator>(&self, alloc: B) -> Result<FixedVec<T, B>, Error>
    where
        T: Clone,
    {
        FixedVec::from_slice_in(self.as_slice(), alloc)
    }

    /// Moves every element into fresh storage obtained from `alloc`,
    /// consuming `self`.
    ///
    /// This is the "move with a replacement strategy" construction: elements
    /// are relocated one by one (no clones), the old block is released
    /// without running destructors, and the old strategy is dropped. On
    /// allocation failure the original vector is dropped normally and
    /// [`Error::AllocFailed`] is returned.
    pub fn migrate_in<B: Allocator>(self, alloc: B) -> Result<FixedVec<T, B>, Error> {
        let dst = alloc.allocate::<T>(self.len)?;
        let src = ManuallyDrop::new(self);
        for i in 0..src.len {
            // SAFETY: each source slot is read exactly once and the source
            // block is released below without destroying elements, so
            // ownership of every value moves to the new block.
            unsafe {
                let value = ptr::read(src.ptr.as_ptr().add(i));
                alloc.construct(dst.as_ptr().add(i), value);
            }
        }
        // SAFETY: `src` is never dropped, so its strategy is moved out
        // exactly once here.
        let old_alloc = unsafe { ptr::read(&src.alloc) };
        // SAFETY: the block came from `old_alloc` and its elements have all
        // been moved out.
        unsafe { old_alloc.deallocate(src.ptr, src.len) };
        Ok(FixedVec {
            ptr: dst,
            len: src.len,
            alloc,
            _marker: PhantomData,
        })
    }
}

impl<T> FixedVec<T, Global> {
    /// Constructs an empty vector. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            alloc: Global,
            _marker: PhantomData,
        }
    }

    /// Constructs a vector of `len` clones of `value`.
    ///
    /// ```
    /// use fixed_vec::FixedVec;
    ///
    /// let v = FixedVec::from_elem(3, "x").unwrap();
    /// assert_eq!(v.as_slice(), &["x", "x", "x"]);
    /// ```
    pub fn from_elem(len: usize, value: T) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, Global)
    }

    /// Constructs a vector of `len` default values.
    pub fn from_default(len: usize) -> Result<Self, Error>
    where
        T: Default,
    {
        Self::from_default_in(len, Global)
    }

    /// Constructs a vector from the first `len` items of `iter`.
    ///
    /// See [`from_iter_exact_in`](FixedVec::from_iter_exact_in).
    pub fn from_iter_exact<I>(len: usize, iter: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_iter_exact_in(len, iter, Global)
    }

    /// Constructs a vector by cloning every element of `src`.
    pub fn from_slice(src: &[T]) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_slice_in(src, Global)
    }
}

impl<T, const N: usize> From<[T; N]> for FixedVec<T, Global> {
    /// Moves the array's elements into a heap block of length `N`.
    ///
    /// # Panics
    ///
    /// Panics on allocation failure.
    fn from(src: [T; N]) -> Self {
        infallible(Self::from_iter_exact(N, src))
    }
}

impl<T> From<Vec<T>> for FixedVec<T, Global> {
    /// Moves the `Vec`'s elements; the resulting length is `src.len()`.
    ///
    /// # Panics
    ///
    /// Panics on allocation failure.
    fn from(src: Vec<T>) -> Self {
        let len = src.len();
        infallible(Self::from_iter_exact(len, src))
    }
}

impl<T> FromIterator<T> for FixedVec<T, Global> {
    /// Collects the whole iterator; the resulting length is the number of
    /// items yielded.
    ///
    /// # Panics
    ///
    /// Panics on allocation failure.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        // Stage through a Vec: the final length is unknown until the
        // iterator ends, and FixedVec storage is sized exactly once.
        let staged: Vec<T> = iter.into_iter().collect();
        staged.into()
    }
}
