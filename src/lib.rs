// This file is part of fixed-vec.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # `fixed-vec`
//!
//! A `no_std` + `alloc`, heap-allocated, fixed-length vector with pluggable
//! allocation strategies.
//!
//! The core type, [`FixedVec<T, A>`], stores exactly `len` elements in one
//! contiguous heap block. The length is decided once, at construction, and
//! never changes afterward: no push, no pop, no reallocation. What remains is
//! a slice-like container with value semantics (deep [`Clone`], ownership
//! transfer on move) and explicit control over where its memory comes from.
//!
//! ## When to use this crate
//!
//! This crate may be useful when:
//!
//! - The element count is known at construction time but not at compile time
//!   (otherwise prefer `[T; N]` or an inline fixed-capacity vector).
//! - You want the size of the container to be an invariant, not a variable:
//!   APIs that accept a `FixedVec` can rely on `len()` never moving.
//! - You need to route allocation through a custom strategy (arena, counting
//!   allocator in tests, ...) on stable Rust.
//!
//! It is not a growable buffer. If you need `push`/`pop`, use `Vec` or a
//! capacity-tracked container instead.
//!
//! ## Allocation strategies
//!
//! Memory management is abstracted behind the [`Allocator`] trait, a
//! four-primitive interface: `allocate`, `deallocate`, `construct`, and
//! `destroy`. The container only ever talks to this interface, so swapping
//! the memory source never touches container logic. The default strategy,
//! [`Global`], uses the global allocator.
//!
//! Allocation happens exactly once per container lifetime (at construction)
//! and deallocation exactly once (at drop, or handed off to [`IntoIter`]).
//! Size-preserving operations such as [`FixedVec::fill`] and indexed writes
//! never allocate.
//!
//! ## Failure model
//!
//! - Fallible constructors ([`FixedVec::from_elem`], [`FixedVec::from_default`],
//!   [`FixedVec::from_iter_exact`], [`FixedVec::from_slice`], and their `_in`
//!   variants) return [`Error::AllocFailed`] when the strategy cannot provide
//!   storage, and [`Error::IterTooShort`] when an input iterator runs dry.
//!   On any mid-construction failure — including a panicking `Clone` or
//!   `Default` — the already-constructed prefix is destroyed and the block
//!   released before the failure escapes.
//! - Checked access via [`FixedVec::at`] / [`FixedVec::at_mut`] returns
//!   [`Error::OutOfBounds`]; [`FixedVec::get`] / [`FixedVec::get_mut`] return
//!   `Option`. Indexing (`v[i]`, `v[a..b]`) panics on out-of-bounds, exactly
//!   like slices.
//! - Infallible trait impls (`Clone`, `From`, `FromIterator`) panic on
//!   allocation failure, like the `std` collections.
//!
//! ## Features
//!
//! - `serde`
//!   - Enables `Serialize` / `Deserialize` for `FixedVec<T>`.
//!   - Serializes as a plain sequence; deserializes from any sequence, with
//!     the resulting length fixed to the sequence length.
//!
//! ## Example
//!
//! ```rust
//! use fixed_vec::FixedVec;
//!
//! let mut v = FixedVec::from_elem(3, 0i32).unwrap();
//! assert_eq!(v.len(), 3);
//!
//! v.fill(7);
//! v[1] = 8;
//! assert_eq!(v.as_slice(), &[7, 8, 7]);
//!
//! let w: FixedVec<i32> = [1, 2, 3].into();
//! let rev: Vec<i32> = w.iter().rev().copied().collect();
//! assert_eq!(rev, [3, 2, 1]);
//! ```
//!
//! See [`FixedVec`] for detailed semantics, including the construction
//! variants, iteration, and the assignment policy.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

// Modules
mod error;
mod index;
mod iter;
#[cfg(feature = "serde")]
mod serde;
mod strategy;
mod vec;

// Public exports (crate API surface)
pub use error::Error;
pub use iter::{IntoIter, Iter, IterMut};
pub use strategy::{Allocator, Global};
pub use vec::FixedVec;
