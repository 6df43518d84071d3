// This file is part of fixed-vec.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `serde` support for [`FixedVec`](crate::FixedVec).
//!
//! - **Serialize**: as a sequence of elements (length `len`), for any
//!   allocation strategy.
//! - **Deserialize**: from any sequence; the resulting vector's length is
//!   fixed to the sequence length. Implemented for the default
//!   [`Global`](crate::Global) strategy (the deserializer has no way to
//!   supply a custom one).

// Crate imports
use crate::{strategy::Allocator, vec::FixedVec};

// Core imports
use core::fmt;

// External imports - alloc
use alloc::vec::Vec;

// External imports - serde
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

impl<T: Serialize, A: Allocator> Serialize for FixedVec<T, A> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use ser::SerializeSeq;
        let sl = self.as_slice();
        let mut seq = s.serialize_seq(Some(sl.len()))?;
        for item in sl {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct VecVisitor<T>(core::marker::PhantomData<T>);

impl<'de, T: Deserialize<'de>> de::Visitor<'de> for VecVisitor<T> {
    type Value = FixedVec<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of elements")
    }

    fn visit_seq<S: de::SeqAccess<'de>>(self, mut s: S) -> Result<Self::Value, S::Error> {
        // Stage through a Vec: the final length is only known once the
        // sequence ends, and FixedVec storage is sized exactly once.
        let mut staged = Vec::with_capacity(s.size_hint().unwrap_or(0));
        while let Some(elem) = s.next_element::<T>()? {
            staged.push(elem);
        }
        Ok(FixedVec::from(staged))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FixedVec<T> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_seq(VecVisitor::<T>(core::marker::PhantomData))
    }
}
