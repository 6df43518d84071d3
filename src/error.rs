// This file is part of fixed-vec.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for `FixedVec`.
//!
//! These errors represent allocation, bounds, and input-length conditions.
//! They are `Copy` and implement `core::error::Error`.

// Core imports
use core::{error::Error as CoreError, fmt};

/// Errors returned by operations on [`FixedVec`](crate::FixedVec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The allocation strategy could not provide storage for the requested
    /// length (or the layout computation overflowed).
    AllocFailed,
    /// An index was outside `[0, len)`.
    ///
    /// Returned by [`FixedVec::at`](crate::FixedVec::at) and
    /// [`FixedVec::at_mut`](crate::FixedVec::at_mut).
    OutOfBounds,
    /// An input iterator ended before yielding the requested number of
    /// elements.
    ///
    /// Returned by [`FixedVec::from_iter_exact`](crate::FixedVec::from_iter_exact).
    IterTooShort,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocFailed => f.write_str("allocation failed"),
            Self::OutOfBounds => f.write_str("index out of bounds"),
            Self::IterTooShort => f.write_str("iterator yielded too few elements"),
        }
    }
}

impl CoreError for Error {}

#[cfg(test)]
mod tests {
    // Imports
    use crate::Error;
    use core::error::Error as CoreError;

    fn takes_error(e: &dyn CoreError) -> String {
        e.to_string()
    }

    #[test]
    fn test_error_is_core_error() {
        let s = takes_error(&Error::OutOfBounds);
        assert!(s.contains("out of bounds"));
    }

    #[test]
    fn test_error_display_messages() {
        assert_eq!(Error::AllocFailed.to_string(), "allocation failed");
        assert_eq!(Error::OutOfBounds.to_string(), "index out of bounds");
        assert_eq!(
            Error::IterTooShort.to_string(),
            "iterator yielded too few elements"
        );
    }
}
