// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Signed 128-bit integer: a two's-complement view over [`U128`] storage.

use core::cmp::Ordering;

use crate::macros::{impl_binary_ops, impl_not_op, impl_shift_ops};
use crate::{ArithmeticError, SafeResult, U128};

const SIGN_BIT: u64 = 1 << 63;

/// Signed 128-bit integer. Bit 63 of the high limb is the sign bit.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct I128(U128);

impl I128 {
    /// Width in bits.
    pub const BITS: u32 = 128;
    pub const ZERO: Self = Self(U128::ZERO);
    pub const ONE: Self = Self(U128::ONE);
    pub const MINUS_ONE: Self = Self(U128::MAX);
    /// `-2^127`
    pub const MIN: Self = Self::from_parts(SIGN_BIT, 0);
    /// `2^127 - 1`
    pub const MAX: Self = Self::from_parts(!SIGN_BIT, u64::MAX);

    /// Builds a value from the raw two's-complement limbs.
    #[inline]
    pub const fn from_parts(high: u64, low: u64) -> Self {
        Self(U128::from_parts(high, low))
    }

    #[inline]
    pub const fn from_i64(value: i64) -> Self {
        // sign-extend into the high limb
        let high = if value < 0 { u64::MAX } else { 0 };
        Self::from_parts(high, value as u64)
    }

    #[inline]
    pub const fn from_i128(value: i128) -> Self {
        Self(U128::from_u128(value as u128))
    }

    #[inline]
    pub const fn to_i128(self) -> i128 {
        self.0.to_u128() as i128
    }

    /// Reinterprets the bits as unsigned.
    #[inline]
    pub const fn to_unsigned(self) -> U128 {
        self.0
    }

    /// Reinterprets unsigned bits as two's complement.
    #[inline]
    pub const fn from_unsigned(value: U128) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn high(self) -> u64 {
        self.0.high()
    }

    #[inline]
    pub const fn low(self) -> u64 {
        self.0.low()
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0.high() & SIGN_BIT != 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// `-1`, `0` or `1`.
    #[inline]
    pub const fn signum(self) -> Self {
        if self.is_negative() {
            Self::MINUS_ONE
        } else if self.is_zero() {
            Self::ZERO
        } else {
            Self::ONE
        }
    }

    /// Signed ordering usable in `const` contexts: sign first, then the bits.
    #[inline]
    pub const fn const_cmp(self, other: Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // same sign: two's-complement bits order like the values
            _ => self.0.const_cmp(other.0),
        }
    }

    // --- bitwise ---

    #[inline]
    pub const fn bit_and(self, rhs: Self) -> Self {
        Self(self.0.bit_and(rhs.0))
    }

    #[inline]
    pub const fn bit_or(self, rhs: Self) -> Self {
        Self(self.0.bit_or(rhs.0))
    }

    #[inline]
    pub const fn bit_xor(self, rhs: Self) -> Self {
        Self(self.0.bit_xor(rhs.0))
    }

    #[inline]
    pub const fn bit_not(self) -> Self {
        Self(self.0.bit_not())
    }

    // --- negation / absolute value ---

    /// Two's-complement negation, `!x + 1`. `MIN` maps to itself.
    #[inline]
    pub const fn wrapping_neg(self) -> Self {
        Self(self.0.bit_not().wrapping_add(U128::ONE))
    }

    #[inline]
    pub const fn overflowing_neg(self) -> (Self, bool) {
        (self.wrapping_neg(), self.is_min())
    }

    /// Magnitude as unsigned. Exact for every value, including `MIN`.
    #[inline]
    pub const fn unsigned_abs(self) -> U128 {
        if self.is_negative() {
            self.wrapping_neg().0
        } else {
            self.0
        }
    }

    #[inline]
    pub const fn wrapping_abs(self) -> Self {
        Self(self.unsigned_abs())
    }

    #[inline]
    pub const fn overflowing_abs(self) -> (Self, bool) {
        (self.wrapping_abs(), self.is_min())
    }

    #[inline]
    const fn is_min(self) -> bool {
        self.0.high() == SIGN_BIT && self.0.low() == 0
    }

    #[inline]
    const fn is_minus_one(self) -> bool {
        self.0.high() == u64::MAX && self.0.low() == u64::MAX
    }

    // --- addition / subtraction / multiplication ---

    #[inline]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }

    #[inline]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }

    /// Signed overflow happens when both operands share a sign and the
    /// result does not.
    #[inline]
    pub const fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let r = self.wrapping_add(rhs);
        let overflow = (self.high() ^ r.high()) & (rhs.high() ^ r.high()) & SIGN_BIT != 0;
        (r, overflow)
    }

    /// Signed overflow happens when the operands differ in sign and the
    /// result's sign differs from the minuend.
    #[inline]
    pub const fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let r = self.wrapping_sub(rhs);
        let overflow = (self.high() ^ rhs.high()) & (self.high() ^ r.high()) & SIGN_BIT != 0;
        (r, overflow)
    }

    /// The low 128 bits of a two's-complement product equal the unsigned
    /// product of the bit patterns.
    #[inline]
    pub const fn wrapping_mul(self, rhs: Self) -> Self {
        Self(self.0.wrapping_mul(rhs.0))
    }

    pub const fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
        let negative = self.is_negative() != rhs.is_negative();
        let (magnitude, high) = self.unsigned_abs().widening_mul(rhs.unsigned_abs());

        let overflow = if !high.is_zero() {
            true
        } else if negative {
            // -2^127 is the deepest reachable negative product
            matches!(magnitude.const_cmp(Self::MIN.0), Ordering::Greater)
        } else {
            matches!(magnitude.const_cmp(Self::MAX.0), Ordering::Greater)
        };

        (self.wrapping_mul(rhs), overflow)
    }

    // --- division ---

    /// Quotient truncated toward zero and remainder with the dividend's sign.
    /// `MIN / -1` wraps to `(MIN, 0)`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[track_caller]
    pub const fn div_rem(self, rhs: Self) -> (Self, Self) {
        if rhs.is_zero() {
            panic!("attempt to divide by zero");
        }
        if self.is_min() && rhs.is_minus_one() {
            return (Self::MIN, Self::ZERO);
        }

        let (q, r) = self.unsigned_abs().div_rem(rhs.unsigned_abs());
        let q = if self.is_negative() != rhs.is_negative() {
            Self(q).wrapping_neg()
        } else {
            Self(q)
        };
        let r = if self.is_negative() { Self(r).wrapping_neg() } else { Self(r) };
        (q, r)
    }

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[inline]
    #[track_caller]
    pub const fn wrapping_div(self, rhs: Self) -> Self {
        self.div_rem(rhs).0
    }

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[inline]
    #[track_caller]
    pub const fn wrapping_rem(self, rhs: Self) -> Self {
        self.div_rem(rhs).1
    }

    /// Flags `MIN / -1`, the single quotient that does not fit.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[inline]
    #[track_caller]
    pub const fn overflowing_div(self, rhs: Self) -> (Self, bool) {
        (self.wrapping_div(rhs), self.is_min() && rhs.is_minus_one())
    }

    // --- shifts ---

    /// Left shift. Shifting by 128 or more bits yields zero.
    #[inline]
    pub const fn wrapping_shl(self, n: u32) -> Self {
        Self(self.0.wrapping_shl(n))
    }

    /// Arithmetic right shift, filling with the sign bit. Shifting by 128 or
    /// more bits yields `0` or `-1`.
    #[inline]
    pub const fn wrapping_shr(self, n: u32) -> Self {
        if self.is_negative() {
            Self(self.0.bit_not().wrapping_shr(n).bit_not())
        } else {
            Self(self.0.wrapping_shr(n))
        }
    }

    /// Right shift that fills with zeros regardless of sign.
    #[inline]
    pub const fn logical_shift_right(self, n: u32) -> Self {
        Self(self.0.wrapping_shr(n))
    }

    pub const fn wrapping_pow(self, exp: u32) -> Self {
        Self(self.0.wrapping_pow(exp))
    }

    /// Halfway between `self` and `rhs`, rounded toward `self`. Never
    /// overflows: the distance is taken as an unsigned magnitude.
    pub const fn midpoint(self, rhs: Self) -> Self {
        if matches!(self.const_cmp(rhs), Ordering::Greater) {
            let half = self.0.wrapping_sub(rhs.0).wrapping_shr(1);
            Self(self.0.wrapping_sub(half))
        } else {
            let half = rhs.0.wrapping_sub(self.0).wrapping_shr(1);
            Self(self.0.wrapping_add(half))
        }
    }

    /// Greatest common divisor of the magnitudes. `gcd(MIN, 0)` is `2^127`,
    /// which is why the result is unsigned.
    #[inline]
    pub const fn gcd(self, other: Self) -> U128 {
        self.unsigned_abs().gcd(other.unsigned_abs())
    }

    /// Least common multiple of the magnitudes, modulo 2^128.
    #[inline]
    pub const fn wrapping_lcm(self, other: Self) -> U128 {
        self.unsigned_abs().wrapping_lcm(other.unsigned_abs())
    }

    /// Floor of the square root.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for negative values.
    pub fn isqrt(self) -> SafeResult<Self> {
        if self.is_negative() {
            return Err(ArithmeticError::InvalidInput);
        }
        Ok(Self(self.0.isqrt()))
    }

    // --- byte layout: the two's-complement bits in `U128` order ---

    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 16] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
        Self(U128::from_le_bytes(bytes))
    }

    #[inline]
    pub const fn to_be_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    #[inline]
    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self(U128::from_be_bytes(bytes))
    }
}

impl PartialOrd for I128 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for I128 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.const_cmp(*other)
    }
}

impl core::ops::Neg for I128 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.wrapping_neg()
    }
}

impl core::ops::Neg for &I128 {
    type Output = I128;

    #[inline]
    fn neg(self) -> I128 {
        self.wrapping_neg()
    }
}

impl_binary_ops!(I128 {
    Add::add, AddAssign::add_assign => wrapping_add;
    Sub::sub, SubAssign::sub_assign => wrapping_sub;
    Mul::mul, MulAssign::mul_assign => wrapping_mul;
    Div::div, DivAssign::div_assign => wrapping_div;
    Rem::rem, RemAssign::rem_assign => wrapping_rem;
    BitAnd::bitand, BitAndAssign::bitand_assign => bit_and;
    BitOr::bitor, BitOrAssign::bitor_assign => bit_or;
    BitXor::bitxor, BitXorAssign::bitxor_assign => bit_xor;
});

impl_shift_ops!(I128);
impl_not_op!(I128);

#[cfg(test)]
mod tests {
    use super::*;

    fn i(v: i128) -> I128 {
        I128::from_i128(v)
    }

    #[test]
    fn consts() {
        assert_eq!(I128::MIN.to_i128(), i128::MIN);
        assert_eq!(I128::MAX.to_i128(), i128::MAX);
        assert_eq!(I128::MINUS_ONE.to_i128(), -1);
        assert_eq!(I128::MIN.high(), 0x8000_0000_0000_0000);
        assert_eq!(I128::MIN.low(), 0);
    }

    #[test]
    fn sign_extension() {
        assert_eq!(I128::from_i64(-1), I128::MINUS_ONE);
        assert_eq!(I128::from_i64(-5).to_i128(), -5);
        assert_eq!(I128::from_i64(i64::MIN).to_i128(), i64::MIN as i128);
        assert_eq!(I128::from_i64(7).high(), 0);
    }

    #[test]
    fn predicates() {
        assert!(i(-3).is_negative());
        assert!(i(3).is_positive());
        assert!(!I128::ZERO.is_positive());
        assert!(!I128::ZERO.is_negative());
        assert_eq!(i(-9).signum(), I128::MINUS_ONE);
        assert_eq!(i(9).signum(), I128::ONE);
        assert_eq!(I128::ZERO.signum(), I128::ZERO);
    }

    #[test]
    fn negation() {
        assert_eq!(-i(5), i(-5));
        assert_eq!(-i(-5), i(5));
        assert_eq!(-I128::ZERO, I128::ZERO);
        assert_eq!(I128::MIN.wrapping_neg(), I128::MIN);
        assert!(I128::MIN.overflowing_neg().1);
        assert!(!I128::MAX.overflowing_neg().1);
    }

    #[test]
    fn abs_of_min() {
        assert_eq!(I128::MIN.unsigned_abs(), U128::from_parts(SIGN_BIT, 0));
        assert_eq!(I128::MIN.wrapping_abs(), I128::MIN);
        assert!(I128::MIN.overflowing_abs().1);
        assert_eq!(i(-42).wrapping_abs(), i(42));
    }

    #[test]
    fn add_sub_overflow_flags() {
        assert!(I128::MAX.overflowing_add(I128::ONE).1);
        assert!(I128::MIN.overflowing_add(I128::MINUS_ONE).1);
        assert!(!I128::MAX.overflowing_add(I128::MINUS_ONE).1);
        assert!(I128::MIN.overflowing_sub(I128::ONE).1);
        assert!(I128::MAX.overflowing_sub(I128::MINUS_ONE).1);
        assert!(!I128::ZERO.overflowing_sub(I128::MAX).1);
        assert_eq!(I128::MAX + I128::ONE, I128::MIN);
    }

    #[test]
    fn mul_overflow_flags() {
        let big = i(1 << 64);
        assert!(big.overflowing_mul(big).1);
        assert!(!i(-(1 << 63)).overflowing_mul(i(1 << 64)).1);
        // exactly MIN is representable
        let (r, o) = i(-(1 << 63)).overflowing_mul(i(1 << 64));
        assert!(!o);
        assert_eq!(r, I128::MIN);
        // but +2^127 is not
        assert!(i(1 << 63).overflowing_mul(i(1 << 64)).1);
        assert!(I128::MIN.overflowing_mul(I128::MINUS_ONE).1);
        assert_eq!((i(-7) * i(6)).to_i128(), -42);
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(i(-1) / i(2), I128::ZERO);
        assert_eq!(i(-7) / i(2), i(-3));
        assert_eq!(i(-7) % i(2), i(-1));
        assert_eq!(i(7) / i(-2), i(-3));
        assert_eq!(i(7) % i(-2), i(1));
        assert_eq!(i(-7) / i(-2), i(3));
        assert_eq!(i(-7) % i(-2), i(-1));
    }

    #[test]
    fn min_divided_by_minus_one_wraps() {
        assert_eq!(I128::MIN / I128::MINUS_ONE, I128::MIN);
        assert_eq!(I128::MIN % I128::MINUS_ONE, I128::ZERO);
        assert!(I128::MIN.overflowing_div(I128::MINUS_ONE).1);
        assert!(!I128::MIN.overflowing_div(I128::ONE).1);
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn division_by_zero_panics() {
        let _ = I128::MINUS_ONE / I128::ZERO;
    }

    #[test]
    fn arithmetic_shift_right_keeps_sign() {
        assert_eq!(i(-8) >> 1u32, i(-4));
        assert_eq!(i(-1) >> 127u32, i(-1));
        assert_eq!(i(-1) >> 128u32, i(-1));
        assert_eq!(i(5) >> 200u32, I128::ZERO);
        assert_eq!(I128::MIN >> 64u32, i(i64::MIN as i128));
        assert_eq!(i(-1).logical_shift_right(127), I128::ONE);
        assert_eq!(i(3) << 126u32, I128::MIN.bit_or(i(1 << 126)));
        assert_eq!(i(3) << 128u32, I128::ZERO);
    }

    #[test]
    fn signed_ordering() {
        let mut values = vec![i(3), I128::MIN, i(-1), I128::MAX, I128::ZERO, i(-2)];
        values.sort();
        let expected: Vec<_> = [i128::MIN, -2, -1, 0, 3, i128::MAX].iter().map(|v| i(*v)).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn midpoint_rounds_toward_first_argument() {
        assert_eq!(I128::MIN.midpoint(I128::MAX), I128::MINUS_ONE);
        assert_eq!(I128::MAX.midpoint(I128::MIN), I128::ZERO);
        assert_eq!(i(-3).midpoint(i(4)), i(0));
        assert_eq!(i(4).midpoint(i(-3)), i(1));
        assert_eq!(i(-7).midpoint(i(-7)), i(-7));
        assert_eq!(I128::MAX.midpoint(I128::MAX), I128::MAX);
    }

    #[test]
    fn gcd_lcm_use_magnitudes() {
        assert_eq!(i(-48).gcd(i(18)).to_u128(), 6);
        assert_eq!(i(-48).gcd(i(-18)).to_u128(), 6);
        assert_eq!(I128::MIN.gcd(I128::ZERO).to_u128(), 1u128 << 127);
        assert_eq!(i(-4).wrapping_lcm(i(6)).to_u128(), 12);
        assert_eq!(i(-4).wrapping_lcm(I128::ZERO), U128::ZERO);
    }

    #[test]
    fn isqrt_rejects_negatives() {
        assert_eq!(i(-1).isqrt(), Err(ArithmeticError::InvalidInput));
        assert_eq!(I128::MIN.isqrt(), Err(ArithmeticError::InvalidInput));
        assert_eq!(i(99).isqrt(), Ok(i(9)));
        assert_eq!(I128::ZERO.isqrt(), Ok(I128::ZERO));
        assert_eq!(I128::MAX.isqrt().map(I128::to_i128), Ok(13_043_817_825_332_782_212));
    }

    #[test]
    fn byte_layout_matches_native() {
        for v in [0i128, -1, -5, i128::MIN, i128::MAX, 0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10] {
            let x = i(v);
            assert_eq!(x.to_le_bytes(), v.to_le_bytes());
            assert_eq!(x.to_be_bytes(), v.to_be_bytes());
            assert_eq!(I128::from_le_bytes(v.to_le_bytes()), x);
            assert_eq!(I128::from_be_bytes(v.to_be_bytes()), x);
        }
    }

    #[test]
    fn pow_wraps() {
        assert_eq!(i(-3).wrapping_pow(3), i(-27));
        assert_eq!(i(2).wrapping_pow(127), I128::MIN);
    }
}
