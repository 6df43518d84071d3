// This file is part of fixed-vec.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle coverage: every construction path must construct and destroy
//! each element exactly once and release its block exactly once, on success,
//! on error, and under unwinding.
//!
//! Two instruments make this observable: `Probe`, an element type that
//! tallies constructions and drops (and can be told to panic partway through
//! cloning), and `CountingAlloc`, a strategy that tallies allocate/deallocate
//! pairs while delegating to [`Global`].

use std::mem::size_of;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr::NonNull;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fixed_vec::{Allocator, Error, FixedVec, Global};

#[derive(Debug, Default)]
struct Tally {
    constructed: AtomicUsize,
    dropped: AtomicUsize,
    // Total constructions allowed before Clone panics; None = unlimited.
    clone_budget: Option<usize>,
}

impl Tally {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_clone_budget(budget: usize) -> Arc<Self> {
        Arc::new(Tally {
            clone_budget: Some(budget),
            ..Self::default()
        })
    }

    fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }

    fn assert_balanced(&self) {
        assert_eq!(
            self.constructed(),
            self.dropped(),
            "constructions and drops out of balance"
        );
    }
}

#[derive(Debug)]
struct Probe {
    value: usize,
    tally: Arc<Tally>,
}

impl Probe {
    fn new(value: usize, tally: &Arc<Tally>) -> Self {
        tally.constructed.fetch_add(1, Ordering::SeqCst);
        Probe {
            value,
            tally: Arc::clone(tally),
        }
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        if let Some(budget) = self.tally.clone_budget {
            if self.tally.constructed() >= budget {
                panic!("probe construction budget exhausted");
            }
        }
        Probe::new(self.value, &self.tally)
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.tally.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

#[derive(Clone, Default, Debug)]
struct CountingAlloc {
    stats: Arc<AllocStats>,
}

#[derive(Default, Debug)]
struct AllocStats {
    allocs: AtomicUsize,
    deallocs: AtomicUsize,
}

impl CountingAlloc {
    fn allocs(&self) -> usize {
        self.stats.allocs.load(Ordering::SeqCst)
    }

    fn deallocs(&self) -> usize {
        self.stats.deallocs.load(Ordering::SeqCst)
    }
}

// SAFETY: delegates storage management to `Global`; only the bookkeeping is
// added, and clones share it through the `Arc`.
unsafe impl Allocator for CountingAlloc {
    fn allocate<T>(&self, len: usize) -> Result<NonNull<T>, Error> {
        let ptr = Global.allocate::<T>(len)?;
        // Zero-sized requests are dangling pointers, not allocations.
        if len > 0 && size_of::<T>() > 0 {
            self.stats.allocs.fetch_add(1, Ordering::SeqCst);
        }
        Ok(ptr)
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, len: usize) {
        if len > 0 && size_of::<T>() > 0 {
            self.stats.deallocs.fetch_add(1, Ordering::SeqCst);
        }
        unsafe { Global.deallocate(ptr, len) }
    }
}

#[test]
fn every_element_constructed_and_dropped_exactly_once() {
    let tally = Tally::new();
    {
        let v = FixedVec::from_elem(5, Probe::new(7, &tally)).unwrap();
        assert_eq!(v.len(), 5);
        // Original plus five clones.
        assert_eq!(tally.constructed(), 6);
        assert_eq!(tally.dropped(), 1); // the moved-in original
    }
    tally.assert_balanced();
    assert_eq!(tally.dropped(), 6);
}

#[test]
fn panicking_clone_mid_build_destroys_prefix_and_block() {
    let tally = Tally::with_clone_budget(4); // original + 3 clones, then panic
    let alloc = CountingAlloc::default();

    let result = catch_unwind(AssertUnwindSafe(|| {
        FixedVec::from_elem_in(8, Probe::new(1, &tally), alloc.clone())
    }));
    assert!(result.is_err(), "the fourth clone should have panicked");

    // The three constructed elements and the original were all dropped
    // during unwinding, and the half-built block was released.
    tally.assert_balanced();
    assert_eq!(alloc.allocs(), 1);
    assert_eq!(alloc.deallocs(), 1);
}

#[test]
fn short_iterator_destroys_prefix_and_block() {
    let tally = Tally::new();
    let alloc = CountingAlloc::default();

    let items: Vec<Probe> = (0..3).map(|i| Probe::new(i, &tally)).collect();
    let err = FixedVec::from_iter_exact_in(5, items, alloc.clone()).unwrap_err();
    assert_eq!(err, Error::IterTooShort);

    tally.assert_balanced();
    assert_eq!(alloc.allocs(), 1);
    assert_eq!(alloc.deallocs(), 1);
}

#[test]
fn one_alloc_one_dealloc_per_container_lifetime() {
    let alloc = CountingAlloc::default();
    {
        let mut v = FixedVec::from_elem_in(16, 0u32, alloc.clone()).unwrap();
        assert_eq!(alloc.allocs(), 1);

        // Size-preserving operations never touch the strategy.
        v.fill(3);
        v[4] = 9;
        let _sum: u32 = v.iter().sum();
        assert_eq!(alloc.allocs(), 1);
        assert_eq!(alloc.deallocs(), 0);
    }
    assert_eq!(alloc.allocs(), 1);
    assert_eq!(alloc.deallocs(), 1);
}

#[test]
fn empty_and_zst_containers_never_allocate() {
    let alloc = CountingAlloc::default();

    let empty: FixedVec<u64, _> = FixedVec::new_in(alloc.clone());
    drop(empty);

    let empty2 = FixedVec::from_elem_in(0, 1u64, alloc.clone()).unwrap();
    drop(empty2);

    let zst = FixedVec::from_elem_in(100, (), alloc.clone()).unwrap();
    assert_eq!(zst.len(), 100);
    drop(zst);

    assert_eq!(alloc.allocs(), 0);
    assert_eq!(alloc.deallocs(), 0);
}

#[test]
fn clone_allocates_a_fresh_block() {
    let alloc = CountingAlloc::default();
    let v = FixedVec::from_elem_in(4, 1i32, alloc.clone()).unwrap();
    assert_eq!(alloc.allocs(), 1);

    let c = v.try_clone().unwrap();
    assert_eq!(alloc.allocs(), 2);
    assert_ne!(v.as_ptr(), c.as_ptr());

    drop(v);
    drop(c);
    assert_eq!(alloc.deallocs(), 2);
}

#[test]
fn into_iter_inherits_the_deallocation_obligation() {
    let tally = Tally::new();
    let alloc = CountingAlloc::default();

    let v = FixedVec::from_elem_in(4, Probe::new(0, &tally), alloc.clone()).unwrap();
    let mut it = v.into_iter();
    let first = it.next().unwrap();
    assert_eq!(alloc.deallocs(), 0);

    drop(it); // destroys the three unyielded elements, releases the block
    assert_eq!(alloc.allocs(), 1);
    assert_eq!(alloc.deallocs(), 1);

    drop(first);
    tally.assert_balanced();
}

#[test]
fn migrate_in_moves_without_extra_constructions() {
    let tally = Tally::new();
    let source_alloc = CountingAlloc::default();
    let target_alloc = CountingAlloc::default();

    let v = FixedVec::from_iter_exact_in(
        3,
        (0..3).map(|i| Probe::new(i, &tally)),
        source_alloc.clone(),
    )
    .unwrap();
    let constructed_before = tally.constructed();

    let w = v.migrate_in(target_alloc.clone()).unwrap();
    assert_eq!(w.len(), 3);
    assert_eq!(w[1].value, 1);

    // Migration relocates: no new constructions, no drops, and the old
    // block was released while the new strategy allocated once.
    assert_eq!(tally.constructed(), constructed_before);
    assert_eq!(tally.dropped(), 0);
    assert_eq!(source_alloc.allocs(), 1);
    assert_eq!(source_alloc.deallocs(), 1);
    assert_eq!(target_alloc.allocs(), 1);
    assert_eq!(target_alloc.deallocs(), 0);

    drop(w);
    tally.assert_balanced();
    assert_eq!(target_alloc.deallocs(), 1);
}

#[test]
fn fill_assigns_instead_of_reconstructing() {
    let tally = Tally::new();
    let mut v = FixedVec::from_elem(3, Probe::new(1, &tally)).unwrap();

    let before = tally.constructed();
    v.fill(Probe::new(2, &tally));
    // One fresh value plus one clone per slot; every displaced old value
    // was dropped by assignment, nothing was constructed in place.
    assert_eq!(tally.constructed(), before + 1 + 3);
    assert!(v.iter().all(|p| p.value == 2));

    drop(v);
    tally.assert_balanced();
}

#[test]
fn clone_from_with_equal_lengths_reuses_the_block() {
    let alloc = CountingAlloc::default();
    let mut dst = FixedVec::from_elem_in(3, 0i32, alloc.clone()).unwrap();
    let src = FixedVec::from_elem_in(3, 9i32, alloc.clone()).unwrap();
    assert_eq!(alloc.allocs(), 2);

    dst.clone_from(&src);
    assert_eq!(dst.as_slice(), &[9, 9, 9]);
    assert_eq!(alloc.allocs(), 2); // no new block
}
