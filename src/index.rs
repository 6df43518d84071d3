// This file is part of fixed-vec.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Indexing support for [`FixedVec`](crate::FixedVec).
//!
//! This module provides `Index` and `IndexMut` impls that mirror slice behavior:
//! - panics on out-of-bounds;
//! - supports all standard range forms, including inclusive ranges.
//!
//! For checked access use [`FixedVec::at`](crate::FixedVec::at) or
//! [`FixedVec::get`](crate::FixedVec::get).

// Crate imports
use crate::{strategy::Allocator, vec::FixedVec};

// Core imports
use core::ops::{
    Index, IndexMut, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive,
};

impl<T, A: Allocator> Index<usize> for FixedVec<T, A> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        &self.as_slice()[i]
    }
}

// Read-only ranges
impl<T, A: Allocator> Index<Range<usize>> for FixedVec<T, A> {
    type Output = [T];
    fn index(&self, r: Range<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, A: Allocator> Index<RangeFrom<usize>> for FixedVec<T, A> {
    type Output = [T];
    fn index(&self, r: RangeFrom<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, A: Allocator> Index<RangeTo<usize>> for FixedVec<T, A> {
    type Output = [T];
    fn index(&self, r: RangeTo<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, A: Allocator> Index<RangeToInclusive<usize>> for FixedVec<T, A> {
    type Output = [T];
    fn index(&self, r: RangeToInclusive<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, A: Allocator> Index<RangeInclusive<usize>> for FixedVec<T, A> {
    type Output = [T];
    fn index(&self, r: RangeInclusive<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, A: Allocator> Index<RangeFull> for FixedVec<T, A> {
    type Output = [T];
    fn index(&self, _: RangeFull) -> &Self::Output {
        self.as_slice()
    }
}

// Mutable ranges
impl<T, A: Allocator> IndexMut<usize> for FixedVec<T, A> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[i]
    }
}
impl<T, A: Allocator> IndexMut<Range<usize>> for FixedVec<T, A> {
    fn index_mut(&mut self, r: Range<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, A: Allocator> IndexMut<RangeFrom<usize>> for FixedVec<T, A> {
    fn index_mut(&mut self, r: RangeFrom<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, A: Allocator> IndexMut<RangeTo<usize>> for FixedVec<T, A> {
    fn index_mut(&mut self, r: RangeTo<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, A: Allocator> IndexMut<RangeToInclusive<usize>> for FixedVec<T, A> {
    fn index_mut(&mut self, r: RangeToInclusive<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, A: Allocator> IndexMut<RangeInclusive<usize>> for FixedVec<T, A> {
    fn index_mut(&mut self, r: RangeInclusive<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, A: Allocator> IndexMut<RangeFull> for FixedVec<T, A> {
    fn index_mut(&mut self, _: RangeFull) -> &mut Self::Output {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use super::FixedVec;

    #[test]
    fn test_indexing_and_ranges_full_suite() {
        let mut v: FixedVec<i32> = [0, 1, 2, 3, 4].into();

        assert_eq!(v[0], 0);
        assert_eq!(&v[1..3], &[1, 2]);
        assert_eq!(&v[2..], &[2, 3, 4]);
        assert_eq!(&v[..3], &[0, 1, 2]);
        assert_eq!(&v[..=2], &[0, 1, 2]);
        assert_eq!(&v[1..=3], &[1, 2, 3]);
        assert_eq!(&v[..], &[0, 1, 2, 3, 4]);

        v[1..3].copy_from_slice(&[10, 20]);
        assert_eq!(v.as_slice(), &[0, 10, 20, 3, 4]);
    }

    #[test]
    #[should_panic]
    fn test_oob_panics() {
        let v: FixedVec<i32> = FixedVec::new();
        let _ = v[0];
    }

    #[test]
    #[should_panic]
    fn test_index_at_len_panics() {
        let v: FixedVec<i32> = [1, 2, 3].into();
        let _ = v[3];
    }

    #[test]
    fn test_empty_ranges_work() {
        let v: FixedVec<i32> = [1, 2, 3].into();
        assert_eq!(&v[1..1], &[] as &[i32]);
        assert_eq!(&v[..0], &[] as &[i32]);
        assert_eq!(&v[3..3], &[] as &[i32]);
    }

    #[test]
    #[should_panic]
    #[allow(clippy::reversed_empty_ranges)]
    fn test_inverted_range_panics() {
        let v: FixedVec<i32> = [1, 2, 3].into();
        let _ = &v[2..1];
    }

    #[test]
    #[should_panic]
    fn inclusive_upper_oob_panics() {
        let v: FixedVec<i32> = [1, 2, 3].into();
        let _ = &v[..=3]; // out-of-bounds: upper bound == len
    }

    #[test]
    fn test_index_mut_single_element() {
        let mut v: FixedVec<i32> = [1, 2, 3, 4].into();
        v[1] = 10;
        v[3] = 40;
        assert_eq!(v.as_slice(), &[1, 10, 3, 40]);
    }

    #[test]
    fn test_index_mut_ranges() {
        let mut v: FixedVec<i32> = [1, 2, 3, 4, 5].into();
        {
            let tail: &mut [i32] = &mut v[2..];
            tail.copy_from_slice(&[30, 40, 50]);
        }
        {
            let head: &mut [i32] = &mut v[..2];
            head.copy_from_slice(&[10, 20]);
        }
        assert_eq!(v.as_slice(), &[10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_mut_inclusive_range() {
        let mut v: FixedVec<i32> = [0, 1, 2, 3].into();
        v[1..=2].copy_from_slice(&[9, 8]);
        assert_eq!(v.as_slice(), &[0, 9, 8, 3]);
    }

    #[test]
    fn test_index_mut_range_full() {
        let mut v: FixedVec<i32> = [1, 2, 3].into();
        {
            let all: &mut [i32] = &mut v[..];
            all.copy_from_slice(&[7, 8, 9]);
        }
        assert_eq!(v.as_slice(), &[7, 8, 9]);
    }
}
