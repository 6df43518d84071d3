// This file is part of fixed-vec.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Allocation strategies for [`FixedVec`](crate::FixedVec).
//!
//! The container never calls the global allocator directly. It talks to an
//! [`Allocator`] — a four-primitive interface (`allocate`, `deallocate`,
//! `construct`, `destroy`) — so the memory source can be swapped without
//! touching container logic. [`Global`] is the default strategy and routes
//! requests to the global allocator.

// Crate imports
use crate::error::Error;

// Core imports
use core::{
    alloc::Layout,
    ptr::{self, NonNull},
};

// External imports - alloc
use alloc::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};

/// A pluggable allocation strategy.
///
/// Implementors supply raw storage for a run of `T` values and tear it down
/// again. Element lifetimes are managed through [`construct`](Self::construct)
/// and [`destroy`](Self::destroy), which have sensible defaults
/// (`ptr::write` / `ptr::drop_in_place`) that most strategies keep.
///
/// The `Clone` supertrait exists because containers hand out copies of their
/// strategy (and cloning a container clones its strategy along with it), so
/// strategies should be cheap handles — a unit struct, an `Arc`, a reference
/// to an arena.
///
/// # Safety
///
/// Implementations must uphold:
///
/// - A successful `allocate::<T>(len)` returns a pointer that is aligned for
///   `T` and valid for reads and writes of `len * size_of::<T>()` bytes, and
///   that stays valid until passed to `deallocate` on a clone-equivalent
///   strategy instance.
/// - When `len == 0` or `T` is zero-sized, `allocate` must still succeed
///   (returning a dangling, aligned pointer is the expected implementation).
/// - `construct` must leave `*slot` initialized; `destroy` must drop the
///   value in place without freeing storage.
pub unsafe trait Allocator: Clone {
    /// Obtains storage for exactly `len` values of `T`.
    fn allocate<T>(&self, len: usize) -> Result<NonNull<T>, Error>;

    /// Releases storage previously obtained from [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate::<T>(len)` on this strategy
    /// (or a clone of it) with the same `len`, and must not be used afterward.
    /// No elements may still be live in the block.
    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, len: usize);

    /// Initializes the slot at `slot` with `value`.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes, aligned, and must not currently hold
    /// a live `T` (the old value, if any, is not dropped).
    #[inline]
    unsafe fn construct<T>(&self, slot: *mut T, value: T) {
        // SAFETY: forwarded preconditions.
        unsafe { ptr::write(slot, value) }
    }

    /// Drops the value at `slot` in place. Storage is untouched.
    ///
    /// # Safety
    ///
    /// `slot` must point to a live `T` that is destroyed at most once.
    #[inline]
    unsafe fn destroy<T>(&self, slot: *mut T) {
        // SAFETY: forwarded preconditions.
        unsafe { ptr::drop_in_place(slot) }
    }
}

/// The default allocation strategy: the global allocator.
///
/// Zero-sized requests (a zero length, or a zero-sized element type) do not
/// touch the global allocator at all; they yield a dangling, aligned pointer
/// which [`deallocate`](Allocator::deallocate) recognizes and ignores.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

unsafe impl Allocator for Global {
    fn allocate<T>(&self, len: usize) -> Result<NonNull<T>, Error> {
        let layout = Layout::array::<T>(len).map_err(|_| Error::AllocFailed)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: `layout` has non-zero size.
        let raw = unsafe { raw_alloc(layout) };
        NonNull::new(raw.cast::<T>()).ok_or(Error::AllocFailed)
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, len: usize) {
        // `allocate` already succeeded for this layout, so the computation
        // cannot fail here.
        let Ok(layout) = Layout::array::<T>(len) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }
        // SAFETY: per the trait contract, `ptr` came from `allocate::<T>(len)`
        // on this strategy with this non-zero layout.
        unsafe { raw_dealloc(ptr.as_ptr().cast::<u8>(), layout) }
    }
}
