// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Bit engine: rotations, single-bit access, bit fields, byte and bit
//! reversal, set-bit search and PDEP/PEXT over the full 128-bit width.
//!
//! Bit positions are 0-based from the least significant bit of the low limb.
//! Operations that take a position or a field report
//! [`ArithmeticError::InvalidInput`] when it does not lie inside `0..128`.

use crate::{ArithmeticError, SafeResult, I128, U128};

/// `len` low bits set. `len` must be at most 128.
#[inline]
const fn low_mask(len: u32) -> U128 {
    if len >= 128 {
        U128::MAX
    } else {
        U128::ONE.wrapping_shl(len).wrapping_sub(U128::ONE)
    }
}

#[inline]
const fn check_field(start: u32, len: u32) -> SafeResult<()> {
    match start.checked_add(len) {
        Some(end) if end <= 128 => Ok(()),
        _ => Err(ArithmeticError::InvalidInput),
    }
}

#[inline]
const fn check_position(pos: u32) -> SafeResult<()> {
    if pos < 128 {
        Ok(())
    } else {
        Err(ArithmeticError::InvalidInput)
    }
}

impl U128 {
    // --- counting ---

    #[inline]
    pub const fn count_ones(self) -> u32 {
        self.high().count_ones() + self.low().count_ones()
    }

    #[inline]
    pub const fn count_zeros(self) -> u32 {
        128 - self.count_ones()
    }

    #[inline]
    pub const fn leading_zeros(self) -> u32 {
        if self.high() != 0 {
            self.high().leading_zeros()
        } else {
            64 + self.low().leading_zeros()
        }
    }

    #[inline]
    pub const fn trailing_zeros(self) -> u32 {
        if self.low() != 0 {
            self.low().trailing_zeros()
        } else {
            64 + self.high().trailing_zeros()
        }
    }

    #[inline]
    pub const fn leading_ones(self) -> u32 {
        self.bit_not().leading_zeros()
    }

    #[inline]
    pub const fn trailing_ones(self) -> u32 {
        self.bit_not().trailing_zeros()
    }

    /// Number of bits needed to represent the value; `0` for zero.
    #[inline]
    pub const fn bit_width(self) -> u32 {
        128 - self.leading_zeros()
    }

    #[inline]
    pub const fn is_power_of_two(self) -> bool {
        self.count_ones() == 1
    }

    /// Largest power of two not above the value; zero for zero.
    #[inline]
    pub const fn bit_floor(self) -> Self {
        if self.is_zero() {
            Self::ZERO
        } else {
            Self::ONE.wrapping_shl(self.bit_width() - 1)
        }
    }

    /// Smallest power of two not below the value. Values above `2^127`
    /// have no such power in range.
    pub const fn bit_ceil(self) -> SafeResult<Self> {
        if self.const_cmp(Self::ONE).is_le() {
            return Ok(Self::ONE);
        }
        let width = self.wrapping_sub(Self::ONE).bit_width();
        if width >= 128 {
            Err(ArithmeticError::Overflow)
        } else {
            Ok(Self::ONE.wrapping_shl(width))
        }
    }

    /// Index of the least significant set bit, `None` for zero.
    #[inline]
    pub const fn find_first_set(self) -> Option<u32> {
        if self.is_zero() {
            None
        } else {
            Some(self.trailing_zeros())
        }
    }

    /// Index of the most significant set bit, `None` for zero.
    #[inline]
    pub const fn find_last_set(self) -> Option<u32> {
        if self.is_zero() {
            None
        } else {
            Some(127 - self.leading_zeros())
        }
    }

    // --- rotation ---

    /// Rotates left by `n mod 128` bits.
    #[inline]
    pub const fn rotate_left(self, n: u32) -> Self {
        let n = n % 128;
        if n == 0 {
            return self;
        }
        self.wrapping_shl(n).bit_or(self.wrapping_shr(128 - n))
    }

    /// Rotates right by `n mod 128` bits.
    #[inline]
    pub const fn rotate_right(self, n: u32) -> Self {
        let n = n % 128;
        if n == 0 {
            return self;
        }
        self.wrapping_shr(n).bit_or(self.wrapping_shl(128 - n))
    }

    // --- single bits ---

    #[inline]
    const fn bit_unchecked(self, pos: u32) -> bool {
        if pos < 64 {
            (self.low() >> pos) & 1 == 1
        } else {
            (self.high() >> (pos - 64)) & 1 == 1
        }
    }

    pub const fn get_bit(self, pos: u32) -> SafeResult<bool> {
        match check_position(pos) {
            Ok(()) => Ok(self.bit_unchecked(pos)),
            Err(e) => Err(e),
        }
    }

    pub const fn set_bit(self, pos: u32) -> SafeResult<Self> {
        match check_position(pos) {
            Ok(()) => Ok(self.bit_or(Self::ONE.wrapping_shl(pos))),
            Err(e) => Err(e),
        }
    }

    pub const fn clear_bit(self, pos: u32) -> SafeResult<Self> {
        match check_position(pos) {
            Ok(()) => Ok(self.bit_and(Self::ONE.wrapping_shl(pos).bit_not())),
            Err(e) => Err(e),
        }
    }

    pub const fn flip_bit(self, pos: u32) -> SafeResult<Self> {
        match check_position(pos) {
            Ok(()) => Ok(self.bit_xor(Self::ONE.wrapping_shl(pos))),
            Err(e) => Err(e),
        }
    }

    // --- bit fields ---

    /// Bits `[start, start + len)` moved down to position 0.
    pub const fn extract_bits(self, start: u32, len: u32) -> SafeResult<Self> {
        if let Err(e) = check_field(start, len) {
            return Err(e);
        }
        if len == 0 {
            return Ok(Self::ZERO);
        }
        Ok(self.wrapping_shr(start).bit_and(low_mask(len)))
    }

    /// Replaces bits `[start, start + len)` with the low `len` bits of `bits`.
    pub const fn insert_bits(self, bits: Self, start: u32, len: u32) -> SafeResult<Self> {
        if let Err(e) = check_field(start, len) {
            return Err(e);
        }
        if len == 0 {
            return Ok(self);
        }
        let field = low_mask(len).wrapping_shl(start);
        Ok(self.bit_and(field.bit_not()).bit_or(bits.wrapping_shl(start).bit_and(field)))
    }

    // --- reversal ---

    /// Reverses the 16 bytes.
    #[inline]
    pub const fn swap_bytes(self) -> Self {
        Self::from_parts(self.low().swap_bytes(), self.high().swap_bytes())
    }

    /// Reverses all 128 bit positions.
    #[inline]
    pub const fn reverse_bits(self) -> Self {
        Self::from_parts(self.low().reverse_bits(), self.high().reverse_bits())
    }

    // --- gather / scatter ---

    /// Scatters the low bits of `self` to the set positions of `mask`,
    /// walking the mask from its least significant set bit upward.
    pub const fn parallel_deposit(self, mask: Self) -> Self {
        let mut result = Self::ZERO;
        let mut remaining = mask;
        let mut k = 0;
        while let Some(pos) = remaining.find_first_set() {
            if self.bit_unchecked(k) {
                result = result.bit_or(Self::ONE.wrapping_shl(pos));
            }
            // clear the lowest set bit
            remaining = remaining.bit_and(remaining.wrapping_sub(Self::ONE));
            k += 1;
        }
        result
    }

    /// Gathers the bits of `self` at the set positions of `mask` into the
    /// low bits of the result, lowest mask bit first.
    pub const fn parallel_extract(self, mask: Self) -> Self {
        let mut result = Self::ZERO;
        let mut remaining = mask;
        let mut k = 0;
        while let Some(pos) = remaining.find_first_set() {
            if self.bit_unchecked(pos) {
                result = result.bit_or(Self::ONE.wrapping_shl(k));
            }
            remaining = remaining.bit_and(remaining.wrapping_sub(Self::ONE));
            k += 1;
        }
        result
    }
}

/// Signed values share the unsigned bit engine; only the interpretation of
/// the result differs.
impl I128 {
    #[inline]
    pub const fn count_ones(self) -> u32 {
        self.to_unsigned().count_ones()
    }

    #[inline]
    pub const fn count_zeros(self) -> u32 {
        self.to_unsigned().count_zeros()
    }

    #[inline]
    pub const fn leading_zeros(self) -> u32 {
        self.to_unsigned().leading_zeros()
    }

    #[inline]
    pub const fn trailing_zeros(self) -> u32 {
        self.to_unsigned().trailing_zeros()
    }

    #[inline]
    pub const fn find_first_set(self) -> Option<u32> {
        self.to_unsigned().find_first_set()
    }

    #[inline]
    pub const fn find_last_set(self) -> Option<u32> {
        self.to_unsigned().find_last_set()
    }

    #[inline]
    pub const fn rotate_left(self, n: u32) -> Self {
        Self::from_unsigned(self.to_unsigned().rotate_left(n))
    }

    #[inline]
    pub const fn rotate_right(self, n: u32) -> Self {
        Self::from_unsigned(self.to_unsigned().rotate_right(n))
    }

    pub const fn get_bit(self, pos: u32) -> SafeResult<bool> {
        self.to_unsigned().get_bit(pos)
    }

    pub fn set_bit(self, pos: u32) -> SafeResult<Self> {
        self.to_unsigned().set_bit(pos).map(Self::from_unsigned)
    }

    pub fn clear_bit(self, pos: u32) -> SafeResult<Self> {
        self.to_unsigned().clear_bit(pos).map(Self::from_unsigned)
    }

    pub fn flip_bit(self, pos: u32) -> SafeResult<Self> {
        self.to_unsigned().flip_bit(pos).map(Self::from_unsigned)
    }

    /// Field bits are returned zero-extended.
    pub fn extract_bits(self, start: u32, len: u32) -> SafeResult<Self> {
        self.to_unsigned().extract_bits(start, len).map(Self::from_unsigned)
    }

    pub fn insert_bits(self, bits: Self, start: u32, len: u32) -> SafeResult<Self> {
        self.to_unsigned()
            .insert_bits(bits.to_unsigned(), start, len)
            .map(Self::from_unsigned)
    }

    #[inline]
    pub const fn swap_bytes(self) -> Self {
        Self::from_unsigned(self.to_unsigned().swap_bytes())
    }

    #[inline]
    pub const fn reverse_bits(self) -> Self {
        Self::from_unsigned(self.to_unsigned().reverse_bits())
    }
}
