// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Checked and saturating arithmetic.
//!
//! Three overflow policies are available and never mixed:
//!
//! - the operators and `wrapping_*` methods on [`U128`] / [`I128`] wrap
//!   modulo 2^128,
//! - [`SafeArithmetic`] reports [`ArithmeticError`] and produces no value,
//! - [`SaturatingArithmetic`] clamps to the nearest bound and never fails.
//!
//! # Examples
//!
//! ```rust
//! use limb128::{ArithmeticError, SafeArithmetic, SaturatingArithmetic, U128};
//!
//! assert_eq!(U128::MAX.safe_add(U128::ONE), Err(ArithmeticError::Overflow));
//! assert_eq!(U128::MAX.saturating_add(U128::ONE), U128::MAX);
//! assert_eq!(U128::MAX + U128::ONE, U128::ZERO);
//! ```

use crate::{ArithmeticError, SafeResult, I128, U128};

/// Arithmetic that reports overflow, underflow and undefined operations
/// instead of wrapping.
pub trait SafeArithmetic: Sized + Copy {
    fn safe_add(self, rhs: Self) -> SafeResult<Self>;
    fn safe_sub(self, rhs: Self) -> SafeResult<Self>;
    fn safe_mul(self, rhs: Self) -> SafeResult<Self>;
    /// `InvalidInput` on a zero divisor.
    fn safe_div(self, rhs: Self) -> SafeResult<Self>;
    /// `InvalidInput` on a zero divisor.
    fn safe_rem(self, rhs: Self) -> SafeResult<Self>;
    /// Same as [`safe_rem`](Self::safe_rem).
    #[inline]
    fn safe_mod(self, rhs: Self) -> SafeResult<Self> {
        self.safe_rem(rhs)
    }
    /// `InvalidInput` for shifts of 128 bits or more; reports bits that
    /// would be shifted out.
    fn safe_shl(self, n: u32) -> SafeResult<Self>;
    /// `InvalidInput` for shifts of 128 bits or more.
    fn safe_shr(self, n: u32) -> SafeResult<Self>;
    fn safe_neg(self) -> SafeResult<Self>;
    fn safe_abs(self) -> SafeResult<Self>;
}

/// Arithmetic that clamps to the type's bounds instead of wrapping.
pub trait SaturatingArithmetic: Sized + Copy {
    fn saturating_add(self, rhs: Self) -> Self;
    fn saturating_sub(self, rhs: Self) -> Self;
    fn saturating_mul(self, rhs: Self) -> Self;
    fn saturating_neg(self) -> Self;
    fn saturating_abs(self) -> Self;
}

/// Constrains `value` to `[lo, hi]`. When `lo > hi` the lower bound wins.
#[inline]
pub fn clamp<T: Ord>(value: T, lo: T, hi: T) -> T {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// `lo <= value <= hi`.
#[inline]
pub fn in_range<T: Ord>(value: &T, lo: &T, hi: &T) -> bool {
    value >= lo && value <= hi
}

impl SafeArithmetic for U128 {
    #[inline]
    fn safe_add(self, rhs: Self) -> SafeResult<Self> {
        match self.overflowing_add(rhs) {
            (r, false) => Ok(r),
            (_, true) => Err(ArithmeticError::Overflow),
        }
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> SafeResult<Self> {
        match self.overflowing_sub(rhs) {
            (r, false) => Ok(r),
            (_, true) => Err(ArithmeticError::Underflow),
        }
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> SafeResult<Self> {
        match self.overflowing_mul(rhs) {
            (r, false) => Ok(r),
            (_, true) => Err(ArithmeticError::Overflow),
        }
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> SafeResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::InvalidInput);
        }
        Ok(self.wrapping_div(rhs))
    }

    #[inline]
    fn safe_rem(self, rhs: Self) -> SafeResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::InvalidInput);
        }
        Ok(self.wrapping_rem(rhs))
    }

    fn safe_shl(self, n: u32) -> SafeResult<Self> {
        if n >= 128 {
            return Err(ArithmeticError::InvalidInput);
        }
        if n > 0 && !self.wrapping_shr(128 - n).is_zero() {
            return Err(ArithmeticError::Overflow);
        }
        Ok(self.wrapping_shl(n))
    }

    #[inline]
    fn safe_shr(self, n: u32) -> SafeResult<Self> {
        if n >= 128 {
            return Err(ArithmeticError::InvalidInput);
        }
        Ok(self.wrapping_shr(n))
    }

    /// Only zero has an unsigned negation.
    #[inline]
    fn safe_neg(self) -> SafeResult<Self> {
        if self.is_zero() {
            Ok(self)
        } else {
            Err(ArithmeticError::Underflow)
        }
    }

    #[inline]
    fn safe_abs(self) -> SafeResult<Self> {
        Ok(self)
    }
}

impl SaturatingArithmetic for U128 {
    #[inline]
    fn saturating_add(self, rhs: Self) -> Self {
        self.safe_add(rhs).unwrap_or(U128::MAX)
    }

    #[inline]
    fn saturating_sub(self, rhs: Self) -> Self {
        self.safe_sub(rhs).unwrap_or(U128::MIN)
    }

    #[inline]
    fn saturating_mul(self, rhs: Self) -> Self {
        self.safe_mul(rhs).unwrap_or(U128::MAX)
    }

    #[inline]
    fn saturating_neg(self) -> Self {
        U128::ZERO
    }

    #[inline]
    fn saturating_abs(self) -> Self {
        self
    }
}

/// Positive overflow saturates to `MAX`, negative to `MIN`.
#[inline]
fn saturate_i128(result: SafeResult<I128>) -> I128 {
    match result {
        Ok(v) => v,
        Err(ArithmeticError::Underflow) => I128::MIN,
        Err(_) => I128::MAX,
    }
}

/// Which bound a signed result crossed, given whether it should have been
/// negative.
#[inline]
fn signed_bound(negative: bool) -> ArithmeticError {
    if negative {
        ArithmeticError::Underflow
    } else {
        ArithmeticError::Overflow
    }
}

impl SafeArithmetic for I128 {
    fn safe_add(self, rhs: Self) -> SafeResult<Self> {
        match self.overflowing_add(rhs) {
            (r, false) => Ok(r),
            // overflow only happens when both operands share a sign
            (_, true) => Err(signed_bound(self.is_negative())),
        }
    }

    fn safe_sub(self, rhs: Self) -> SafeResult<Self> {
        match self.overflowing_sub(rhs) {
            (r, false) => Ok(r),
            // negative minus positive can only fall below MIN
            (_, true) => Err(signed_bound(self.is_negative())),
        }
    }

    fn safe_mul(self, rhs: Self) -> SafeResult<Self> {
        match self.overflowing_mul(rhs) {
            (r, false) => Ok(r),
            (_, true) => Err(signed_bound(self.is_negative() != rhs.is_negative())),
        }
    }

    fn safe_div(self, rhs: Self) -> SafeResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::InvalidInput);
        }
        match self.overflowing_div(rhs) {
            (q, false) => Ok(q),
            (_, true) => Err(ArithmeticError::Overflow),
        }
    }

    /// `MIN % -1` is exactly zero and succeeds.
    fn safe_rem(self, rhs: Self) -> SafeResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::InvalidInput);
        }
        Ok(self.wrapping_rem(rhs))
    }

    fn safe_shl(self, n: u32) -> SafeResult<Self> {
        if n >= 128 {
            return Err(ArithmeticError::InvalidInput);
        }
        let shifted = self.wrapping_shl(n);
        if shifted.wrapping_shr(n) != self {
            return Err(signed_bound(self.is_negative()));
        }
        Ok(shifted)
    }

    #[inline]
    fn safe_shr(self, n: u32) -> SafeResult<Self> {
        if n >= 128 {
            return Err(ArithmeticError::InvalidInput);
        }
        Ok(self.wrapping_shr(n))
    }

    #[inline]
    fn safe_neg(self) -> SafeResult<Self> {
        match self.overflowing_neg() {
            (r, false) => Ok(r),
            (_, true) => Err(ArithmeticError::Overflow),
        }
    }

    #[inline]
    fn safe_abs(self) -> SafeResult<Self> {
        match self.overflowing_abs() {
            (r, false) => Ok(r),
            (_, true) => Err(ArithmeticError::Overflow),
        }
    }
}

impl SaturatingArithmetic for I128 {
    #[inline]
    fn saturating_add(self, rhs: Self) -> Self {
        saturate_i128(self.safe_add(rhs))
    }

    #[inline]
    fn saturating_sub(self, rhs: Self) -> Self {
        saturate_i128(self.safe_sub(rhs))
    }

    #[inline]
    fn saturating_mul(self, rhs: Self) -> Self {
        saturate_i128(self.safe_mul(rhs))
    }

    #[inline]
    fn saturating_neg(self) -> Self {
        saturate_i128(self.safe_neg())
    }

    #[inline]
    fn saturating_abs(self) -> Self {
        saturate_i128(self.safe_abs())
    }
}
