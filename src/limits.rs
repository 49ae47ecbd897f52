// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Capability descriptor for the 128-bit types, as plain data.

use crate::{I128, U128};

/// Width, signedness and range of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits<T> {
    pub bits: u32,
    pub signed: bool,
    pub min: T,
    pub max: T,
    /// Number of value (non-sign) bits.
    pub digits: u32,
    /// Decimal digits that always round-trip: `floor(digits * log10(2))`.
    pub digits10: u32,
}

/// Types that publish a [`Limits`] descriptor.
pub trait Bounded: Sized + 'static {
    const LIMITS: Limits<Self>;

    #[inline]
    fn min_value() -> Self {
        Self::LIMITS.min
    }

    #[inline]
    fn max_value() -> Self {
        Self::LIMITS.max
    }
}

impl U128 {
    pub const LIMITS: Limits<U128> = Limits {
        bits: U128::BITS,
        signed: false,
        min: U128::MIN,
        max: U128::MAX,
        digits: 128,
        digits10: 38,
    };
}

impl I128 {
    pub const LIMITS: Limits<I128> = Limits {
        bits: I128::BITS,
        signed: true,
        min: I128::MIN,
        max: I128::MAX,
        digits: 127,
        digits10: 38,
    };
}

impl Bounded for U128 {
    const LIMITS: Limits<Self> = U128::LIMITS;
}

impl Bounded for I128 {
    const LIMITS: Limits<Self> = I128::LIMITS;
}
