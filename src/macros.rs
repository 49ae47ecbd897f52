// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Operator boilerplate shared by [`U128`](crate::U128) and [`I128`](crate::I128).
//!
//! Every operator forwards to an inherent method on the type, so the operator
//! forms and the named forms can never disagree. Arithmetic operators wrap;
//! `/` and `%` panic on a zero divisor.

/// Binary operators (by value and by reference) plus their `*Assign` forms.
macro_rules! impl_binary_ops {
    ( $name:ident { $( $tr:ident :: $m:ident, $atr:ident :: $am:ident => $via:ident; )* } ) => {
        $(
            impl core::ops::$tr for $name {
                type Output = Self;

                #[inline]
                #[track_caller]
                fn $m(self, rhs: Self) -> Self { self.$via(rhs) }
            }

            impl core::ops::$tr<&$name> for $name {
                type Output = $name;

                #[inline]
                #[track_caller]
                fn $m(self, rhs: &$name) -> $name { self.$via(*rhs) }
            }

            impl core::ops::$tr<$name> for &$name {
                type Output = $name;

                #[inline]
                #[track_caller]
                fn $m(self, rhs: $name) -> $name { (*self).$via(rhs) }
            }

            impl core::ops::$atr for $name {
                #[inline]
                #[track_caller]
                fn $am(&mut self, rhs: Self) { *self = (*self).$via(rhs); }
            }
        )*
    };
}

/// `<<` and `>>` by a `u32` or `usize` bit count. Counts of 128 or more are
/// handled by the inherent `wrapping_shl` / `wrapping_shr`, never masked.
macro_rules! impl_shift_ops {
    ( $name:ident ) => {
        $crate::macros::impl_shift_ops!(@rhs $name, u32, |n: u32| n);
        $crate::macros::impl_shift_ops!(@rhs $name, usize, |n: usize| u32::try_from(n).unwrap_or(u32::MAX));
    };
    ( @rhs $name:ident, $rhs:ty, $to_u32:expr ) => {
        impl core::ops::Shl<$rhs> for $name {
            type Output = Self;

            #[inline]
            fn shl(self, rhs: $rhs) -> Self { self.wrapping_shl(($to_u32)(rhs)) }
        }

        impl core::ops::ShlAssign<$rhs> for $name {
            #[inline]
            fn shl_assign(&mut self, rhs: $rhs) { *self = self.wrapping_shl(($to_u32)(rhs)); }
        }

        impl core::ops::Shr<$rhs> for $name {
            type Output = Self;

            #[inline]
            fn shr(self, rhs: $rhs) -> Self { self.wrapping_shr(($to_u32)(rhs)) }
        }

        impl core::ops::ShrAssign<$rhs> for $name {
            #[inline]
            fn shr_assign(&mut self, rhs: $rhs) { *self = self.wrapping_shr(($to_u32)(rhs)); }
        }
    };
}

/// `!x` forwarded to the inherent `bit_not`.
macro_rules! impl_not_op {
    ( $name:ident ) => {
        impl core::ops::Not for $name {
            type Output = Self;

            #[inline]
            fn not(self) -> Self { self.bit_not() }
        }

        impl core::ops::Not for &$name {
            type Output = $name;

            #[inline]
            fn not(self) -> $name { (*self).bit_not() }
        }
    };
}

pub(crate) use impl_binary_ops;
pub(crate) use impl_not_op;
pub(crate) use impl_shift_ops;
