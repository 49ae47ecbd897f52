// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Conversions between the 128-bit types, native integers and floats.
//!
//! Widening conversions are plain `From` impls. Everything that can lose
//! information goes through the cast family (`safe_cast`, `try_cast`,
//! `checked_cast`, `fits`), which tests the range before converting.

use crate::{ArithmeticError, SafeResult, I128, U128};

/// 2^64 as a float, exact in both `f32` and `f64`.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;
/// 2^127
const TWO_POW_127: f64 = TWO_POW_64 * 9_223_372_036_854_775_808.0;
/// 2^128
const TWO_POW_128: f64 = TWO_POW_64 * TWO_POW_64;

// --- widening ---

macro_rules! impl_from_unsigned {
    ( $( $t:ty ),* ) => {
        $(
            impl From<$t> for U128 {
                #[inline]
                fn from(v: $t) -> Self { U128::from_u64(v as u64) }
            }

            impl From<$t> for I128 {
                #[inline]
                fn from(v: $t) -> Self { I128::from_unsigned(U128::from_u64(v as u64)) }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ( $( $t:ty ),* ) => {
        $(
            impl From<$t> for I128 {
                #[inline]
                fn from(v: $t) -> Self { I128::from_i64(v as i64) }
            }

            impl TryFrom<$t> for U128 {
                type Error = ArithmeticError;

                #[inline]
                fn try_from(v: $t) -> Result<Self, Self::Error> {
                    if v < 0 {
                        return Err(ArithmeticError::Underflow);
                    }
                    Ok(U128::from_u64(v as u64))
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

impl From<u128> for U128 {
    #[inline]
    fn from(v: u128) -> Self {
        U128::from_u128(v)
    }
}

impl From<U128> for u128 {
    #[inline]
    fn from(v: U128) -> Self {
        v.to_u128()
    }
}

impl From<i128> for I128 {
    #[inline]
    fn from(v: i128) -> Self {
        I128::from_i128(v)
    }
}

impl From<I128> for i128 {
    #[inline]
    fn from(v: I128) -> Self {
        v.to_i128()
    }
}

impl TryFrom<I128> for U128 {
    type Error = ArithmeticError;

    fn try_from(v: I128) -> Result<Self, Self::Error> {
        v.safe_cast()
    }
}

impl TryFrom<U128> for I128 {
    type Error = ArithmeticError;

    fn try_from(v: U128) -> Result<Self, Self::Error> {
        v.safe_cast()
    }
}

// --- floats in ---

impl U128 {
    /// Truncates toward zero. NaN, infinities and values whose integer part
    /// lies outside `[0, 2^128)` are `InvalidInput`.
    pub fn safe_from_f64(value: f64) -> SafeResult<Self> {
        if !value.is_finite() {
            return Err(ArithmeticError::InvalidInput);
        }
        let t = value.trunc();
        if t < 0.0 || t >= TWO_POW_128 {
            return Err(ArithmeticError::InvalidInput);
        }
        // exact: t is an integer and the split is by a power of two
        let high = (t / TWO_POW_64).floor();
        let low = t - high * TWO_POW_64;
        Ok(U128::from_parts(high as u64, low as u64))
    }

    pub fn safe_from_f32(value: f32) -> SafeResult<Self> {
        Self::safe_from_f64(f64::from(value))
    }

    /// Nearest `f64`, ties to even, same as `u128 as f64`.
    pub fn to_f64(self) -> f64 {
        if self.high() == 0 {
            return self.low() as f64;
        }
        let (mantissa, scale) = self.sticky_mantissa();
        mantissa as f64 * f64::from_bits(u64::from(1023 + scale) << 52)
    }

    /// Nearest `f32`, ties to even. Values from `f32::MAX + 2^103` upward
    /// round to infinity, same as `u128 as f32`.
    pub fn to_f32(self) -> f32 {
        if self.high() == 0 {
            return self.low() as f32;
        }
        let (mantissa, scale) = self.sticky_mantissa();
        mantissa as f32 * f32::from_bits((127 + scale) << 23)
    }

    /// For a value with a non-zero high limb: the top 64 bits after
    /// normalizing, with bit 0 set if any lower bit was set, and the power of
    /// two that scales them back. Rounding the mantissa once then gives the
    /// correctly rounded float.
    const fn sticky_mantissa(self) -> (u64, u32) {
        let shift = self.leading_zeros();
        let normalized = self.wrapping_shl(shift);
        let sticky = (normalized.low() != 0) as u64;
        (normalized.high() | sticky, 64 - shift)
    }
}

impl I128 {
    /// Truncates toward zero. NaN, infinities and values whose integer part
    /// lies outside `[-2^127, 2^127)` are `InvalidInput`.
    pub fn safe_from_f64(value: f64) -> SafeResult<Self> {
        if !value.is_finite() {
            return Err(ArithmeticError::InvalidInput);
        }
        let t = value.trunc();
        if t < -TWO_POW_127 || t >= TWO_POW_127 {
            return Err(ArithmeticError::InvalidInput);
        }
        if t < 0.0 {
            let magnitude = U128::safe_from_f64(-t)?;
            Ok(I128::from_unsigned(magnitude).wrapping_neg())
        } else {
            U128::safe_from_f64(t).map(I128::from_unsigned)
        }
    }

    pub fn safe_from_f32(value: f32) -> SafeResult<Self> {
        Self::safe_from_f64(f64::from(value))
    }

    pub fn to_f64(self) -> f64 {
        let magnitude = self.unsigned_abs().to_f64();
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Always finite: `|I128| <= 2^127`.
    pub fn to_f32(self) -> f32 {
        let magnitude = self.unsigned_abs().to_f32();
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}

// --- cast family ---

/// Targets the 128-bit types can be narrowed or reinterpreted into.
pub trait CastFrom128: Sized {
    fn cast_from_u128(value: U128) -> SafeResult<Self>;
    fn cast_from_i128(value: I128) -> SafeResult<Self>;
}

macro_rules! impl_cast_unsigned {
    ( $( $t:ty ),* ) => {
        $(
            impl CastFrom128 for $t {
                fn cast_from_u128(value: U128) -> SafeResult<Self> {
                    if value.high() != 0 {
                        return Err(ArithmeticError::Overflow);
                    }
                    <$t>::try_from(value.low()).map_err(|_| ArithmeticError::Overflow)
                }

                fn cast_from_i128(value: I128) -> SafeResult<Self> {
                    if value.is_negative() {
                        return Err(ArithmeticError::Underflow);
                    }
                    Self::cast_from_u128(value.to_unsigned())
                }
            }
        )*
    };
}

macro_rules! impl_cast_signed {
    ( $( $t:ty ),* ) => {
        $(
            impl CastFrom128 for $t {
                fn cast_from_u128(value: U128) -> SafeResult<Self> {
                    if value.high() != 0 {
                        return Err(ArithmeticError::Overflow);
                    }
                    <$t>::try_from(value.low()).map_err(|_| ArithmeticError::Overflow)
                }

                fn cast_from_i128(value: I128) -> SafeResult<Self> {
                    // fits in i64 exactly when the high limb is the sign
                    // extension of the low limb
                    let extension = if (value.low() as i64) < 0 { u64::MAX } else { 0 };
                    if value.high() != extension {
                        return Err(if value.is_negative() {
                            ArithmeticError::Underflow
                        } else {
                            ArithmeticError::Overflow
                        });
                    }
                    let narrow = value.low() as i64;
                    <$t>::try_from(narrow).map_err(|_| {
                        if narrow < 0 { ArithmeticError::Underflow } else { ArithmeticError::Overflow }
                    })
                }
            }
        )*
    };
}

impl_cast_unsigned!(u8, u16, u32, u64, usize);
impl_cast_signed!(i8, i16, i32, i64, isize);

impl CastFrom128 for u128 {
    fn cast_from_u128(value: U128) -> SafeResult<Self> {
        Ok(value.to_u128())
    }

    fn cast_from_i128(value: I128) -> SafeResult<Self> {
        U128::cast_from_i128(value).map(U128::to_u128)
    }
}

impl CastFrom128 for i128 {
    fn cast_from_u128(value: U128) -> SafeResult<Self> {
        I128::cast_from_u128(value).map(I128::to_i128)
    }

    fn cast_from_i128(value: I128) -> SafeResult<Self> {
        Ok(value.to_i128())
    }
}

impl CastFrom128 for U128 {
    fn cast_from_u128(value: U128) -> SafeResult<Self> {
        Ok(value)
    }

    fn cast_from_i128(value: I128) -> SafeResult<Self> {
        if value.is_negative() {
            return Err(ArithmeticError::Underflow);
        }
        Ok(value.to_unsigned())
    }
}

impl CastFrom128 for I128 {
    fn cast_from_u128(value: U128) -> SafeResult<Self> {
        if I128::from_unsigned(value).is_negative() {
            return Err(ArithmeticError::Overflow);
        }
        Ok(I128::from_unsigned(value))
    }

    fn cast_from_i128(value: I128) -> SafeResult<Self> {
        Ok(value)
    }
}

impl CastFrom128 for f64 {
    fn cast_from_u128(value: U128) -> SafeResult<Self> {
        Ok(value.to_f64())
    }

    fn cast_from_i128(value: I128) -> SafeResult<Self> {
        Ok(value.to_f64())
    }
}

impl CastFrom128 for f32 {
    /// `U128` values that round to 2^128 exceed `f32::MAX`.
    fn cast_from_u128(value: U128) -> SafeResult<Self> {
        let v = value.to_f32();
        if v.is_finite() {
            Ok(v)
        } else {
            Err(ArithmeticError::Overflow)
        }
    }

    fn cast_from_i128(value: I128) -> SafeResult<Self> {
        Ok(value.to_f32())
    }
}

macro_rules! impl_cast_api {
    ( $name:ident, $via:ident ) => {
        impl $name {
            /// Converts into `T` if the value is representable there.
            #[inline]
            pub fn safe_cast<T: CastFrom128>(self) -> SafeResult<T> {
                T::$via(self)
            }

            #[inline]
            pub fn try_cast<T: CastFrom128>(self) -> Option<T> {
                T::$via(self).ok()
            }

            /// # Panics
            ///
            /// Panics if the value does not fit in `T`.
            #[track_caller]
            #[inline]
            pub fn checked_cast<T: CastFrom128>(self) -> T {
                match T::$via(self) {
                    Ok(v) => v,
                    Err(e) => panic!(
                        "checked_cast of {} into {}: {}",
                        self,
                        core::any::type_name::<T>(),
                        e
                    ),
                }
            }

            /// Whether the value fits in `T`, without converting.
            #[inline]
            pub fn fits<T: CastFrom128>(self) -> bool {
                T::$via(self).is_ok()
            }
        }
    };
}

impl_cast_api!(U128, cast_from_u128);
impl_cast_api!(I128, cast_from_i128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_from_primitives() {
        assert_eq!(U128::from(7u8), U128::from_u64(7));
        assert_eq!(U128::from(u64::MAX), U128::from_parts(0, u64::MAX));
        assert_eq!(I128::from(-1i8), I128::MINUS_ONE);
        assert_eq!(I128::from(i64::MIN).to_i128(), i64::MIN as i128);
        assert_eq!(I128::from(u64::MAX).to_i128(), u64::MAX as i128);
        assert_eq!(U128::try_from(-1i32), Err(ArithmeticError::Underflow));
        assert_eq!(U128::try_from(5isize), Ok(U128::from_u64(5)));
        assert_eq!(u128::from(U128::MAX), u128::MAX);
        assert_eq!(i128::from(I128::MIN), i128::MIN);
    }

    #[test]
    fn floats_truncate_toward_zero() {
        assert_eq!(U128::safe_from_f64(3.99), Ok(U128::from_u64(3)));
        assert_eq!(U128::safe_from_f64(-0.5), Ok(U128::ZERO));
        assert_eq!(I128::safe_from_f64(-3.99), Ok(I128::from(-3i8)));
        assert_eq!(U128::safe_from_f64(TWO_POW_64), Ok(U128::from_parts(1, 0)));
        assert_eq!(
            U128::safe_from_f64(1.5 * TWO_POW_64 * TWO_POW_64 / 2.0),
            Ok(U128::from_parts(3 << 62, 0))
        );
        assert_eq!(I128::safe_from_f64(-TWO_POW_127), Ok(I128::MIN));
        assert_eq!(U128::safe_from_f32(1.0e10), Ok(U128::from_u64(10_000_000_000)));
    }

    #[test]
    fn floats_out_of_range_are_invalid() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0, TWO_POW_128, 1e40] {
            assert_eq!(U128::safe_from_f64(v), Err(ArithmeticError::InvalidInput), "{v}");
        }
        for v in [f64::NAN, TWO_POW_127, -TWO_POW_128, f64::MAX] {
            assert_eq!(I128::safe_from_f64(v), Err(ArithmeticError::InvalidInput), "{v}");
        }
        assert_eq!(U128::safe_from_f32(f32::NAN), Err(ArithmeticError::InvalidInput));
    }

    #[test]
    fn to_float() {
        assert_eq!(U128::from_parts(1, 0).to_f64(), TWO_POW_64);
        assert_eq!(I128::MIN.to_f64(), -TWO_POW_127);
        assert_eq!(I128::from(-12i8).to_f64(), -12.0);
        assert_eq!(U128::MAX.safe_cast::<f32>(), Err(ArithmeticError::Overflow));
        assert_eq!(I128::MIN.safe_cast::<f32>(), Ok(-(TWO_POW_127 as f32)));
        assert_eq!(U128::MAX.safe_cast::<f64>(), Ok(TWO_POW_128));
    }

    #[test]
    fn float_conversion_rounds_once() {
        // just below the point where f32 rounds up to 2^128
        let v = u128::MAX - (1 << 103);
        assert_eq!(U128::from_u128(v).safe_cast::<f32>(), Ok(f32::MAX));
        assert_eq!(U128::from_u128(v + 1).safe_cast::<f32>(), Err(ArithmeticError::Overflow));

        // low-limb bits past the f64 mantissa still break the tie upward
        let v = (((1u128 << 53) + 1) << 64) | u64::MAX as u128;
        assert_eq!(U128::from_u128(v).to_f64(), v as f64);
        assert_eq!(I128::from_i128(-(v as i128 >> 1)).to_f64(), -(v as i128 >> 1) as f64);

        let v = (((1u128 << 24) + 1) << 64) | 1;
        assert_eq!(U128::from_u128(v).safe_cast::<f32>(), Ok(v as f32));
        assert_eq!(U128::from_u64(u64::MAX).to_f32(), u64::MAX as f32);
    }

    #[test]
    fn narrowing_unsigned_targets() {
        assert_eq!(U128::from_u64(255).safe_cast::<u8>(), Ok(255u8));
        assert_eq!(U128::from_u64(256).safe_cast::<u8>(), Err(ArithmeticError::Overflow));
        assert_eq!(U128::from_parts(1, 0).safe_cast::<u64>(), Err(ArithmeticError::Overflow));
        assert_eq!(I128::MINUS_ONE.safe_cast::<u32>(), Err(ArithmeticError::Underflow));
        assert_eq!(I128::from(40i8).safe_cast::<u16>(), Ok(40u16));
        assert_eq!(U128::MAX.try_cast::<u128>(), Some(u128::MAX));
    }

    #[test]
    fn narrowing_signed_targets() {
        assert_eq!(U128::from_u64(127).safe_cast::<i8>(), Ok(127i8));
        assert_eq!(U128::from_u64(128).safe_cast::<i8>(), Err(ArithmeticError::Overflow));
        assert_eq!(I128::from(-128i16).safe_cast::<i8>(), Ok(-128i8));
        assert_eq!(I128::from(-129i16).safe_cast::<i8>(), Err(ArithmeticError::Underflow));
        assert_eq!(I128::from(i64::MIN).safe_cast::<i64>(), Ok(i64::MIN));
        // low limb looks like a small negative, high limb is not its extension
        let tricky = I128::from_parts(0, u64::MAX);
        assert_eq!(tricky.safe_cast::<i64>(), Err(ArithmeticError::Overflow));
        assert_eq!(I128::MIN.safe_cast::<i64>(), Err(ArithmeticError::Underflow));
        assert_eq!(I128::MIN.safe_cast::<i128>(), Ok(i128::MIN));
        assert_eq!(U128::MAX.safe_cast::<i128>(), Err(ArithmeticError::Overflow));
    }

    #[test]
    fn cross_signedness() {
        assert_eq!(U128::try_from(I128::MAX), Ok(I128::MAX.to_unsigned()));
        assert_eq!(U128::try_from(I128::MINUS_ONE), Err(ArithmeticError::Underflow));
        assert_eq!(I128::try_from(U128::MAX), Err(ArithmeticError::Overflow));
        assert_eq!(I128::try_from(U128::from_u64(9)), Ok(I128::from(9u8)));
        assert!(I128::MAX.fits::<U128>());
        assert!(!U128::from_parts(1 << 63, 0).fits::<I128>());
    }

    #[test]
    fn checked_cast_returns_value() {
        assert_eq!(U128::from_u64(42).checked_cast::<u16>(), 42);
    }

    #[test]
    #[should_panic(expected = "arithmetic overflow")]
    fn checked_cast_panics_when_value_does_not_fit() {
        let _ = U128::MAX.checked_cast::<u64>();
    }
}
