// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Unsigned 128-bit integer stored as two 64-bit limbs.
//!
//! All carry, borrow and overflow logic is written against the `(high, low)`
//! limb pair. Native `u128` only appears in the interop constructors.

use core::cmp::Ordering;

use crate::macros::{impl_binary_ops, impl_not_op, impl_shift_ops};
use crate::I128;

const LOW_32: u64 = 0xffff_ffff;

/// Full 64x64 -> 128 bit product as `(low, high)`, built from 32-bit halves.
#[inline]
pub(crate) const fn mul_wide_u64(a: u64, b: u64) -> (u64, u64) {
    let (a0, a1) = (a & LOW_32, a >> 32);
    let (b0, b1) = (b & LOW_32, b >> 32);

    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;

    // at most 3 * (2^32 - 1), cannot overflow
    let mid = (p00 >> 32) + (p01 & LOW_32) + (p10 & LOW_32);

    let low = (p00 & LOW_32) | (mid << 32);
    let high = p11 + (p01 >> 32) + (p10 >> 32) + (mid >> 32);
    (low, high)
}

/// Unsigned 128-bit integer, `value = high * 2^64 + low`.
///
/// In memory the low limb comes first, matching the little-endian byte
/// layout used by [`U128::to_le_bytes`].
#[repr(C)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct U128 {
    low: u64,
    high: u64,
}

impl U128 {
    /// Width in bits.
    pub const BITS: u32 = 128;
    pub const ZERO: Self = Self::from_parts(0, 0);
    pub const ONE: Self = Self::from_parts(0, 1);
    pub const MIN: Self = Self::ZERO;
    pub const MAX: Self = Self::from_parts(u64::MAX, u64::MAX);

    /// Builds a value from its high and low limbs.
    #[inline]
    pub const fn from_parts(high: u64, low: u64) -> Self {
        Self { low, high }
    }

    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self::from_parts(0, value)
    }

    #[inline]
    pub const fn from_u128(value: u128) -> Self {
        Self::from_parts((value >> 64) as u64, value as u64)
    }

    #[inline]
    pub const fn to_u128(self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }

    /// Most significant limb.
    #[inline]
    pub const fn high(self) -> u64 {
        self.high
    }

    /// Least significant limb.
    #[inline]
    pub const fn low(self) -> u64 {
        self.low
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.high == 0 && self.low == 0
    }

    /// Ordering on `(high, low)`, usable in `const` contexts.
    #[inline]
    pub const fn const_cmp(self, other: Self) -> Ordering {
        if self.high < other.high {
            Ordering::Less
        } else if self.high > other.high {
            Ordering::Greater
        } else if self.low < other.low {
            Ordering::Less
        } else if self.low > other.low {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    // --- bitwise ---

    #[inline]
    pub const fn bit_and(self, rhs: Self) -> Self {
        Self::from_parts(self.high & rhs.high, self.low & rhs.low)
    }

    #[inline]
    pub const fn bit_or(self, rhs: Self) -> Self {
        Self::from_parts(self.high | rhs.high, self.low | rhs.low)
    }

    #[inline]
    pub const fn bit_xor(self, rhs: Self) -> Self {
        Self::from_parts(self.high ^ rhs.high, self.low ^ rhs.low)
    }

    #[inline]
    pub const fn bit_not(self) -> Self {
        Self::from_parts(!self.high, !self.low)
    }

    // --- addition / subtraction ---

    /// Addition returning the carry out of the high limb.
    #[inline]
    pub const fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let (low, carry) = self.low.overflowing_add(rhs.low);
        let (high, c1) = self.high.overflowing_add(rhs.high);
        let (high, c2) = high.overflowing_add(carry as u64);
        (Self::from_parts(high, low), c1 | c2)
    }

    /// Subtraction returning the borrow out of the high limb.
    #[inline]
    pub const fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let (low, borrow) = self.low.overflowing_sub(rhs.low);
        let (high, b1) = self.high.overflowing_sub(rhs.high);
        let (high, b2) = high.overflowing_sub(borrow as u64);
        (Self::from_parts(high, low), b1 | b2)
    }

    #[inline]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    #[inline]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    /// Two's-complement negation modulo 2^128.
    #[inline]
    pub const fn wrapping_neg(self) -> Self {
        Self::ZERO.wrapping_sub(self)
    }

    // --- multiplication ---

    /// Full 256-bit product as `(low, high)` halves.
    ///
    /// Sums the four 64x64 partial products column by column with explicit
    /// carries. `high` is zero exactly when the product fits in 128 bits.
    pub const fn widening_mul(self, rhs: Self) -> (Self, Self) {
        let (p00l, p00h) = mul_wide_u64(self.low, rhs.low);
        let (p01l, p01h) = mul_wide_u64(self.low, rhs.high);
        let (p10l, p10h) = mul_wide_u64(self.high, rhs.low);
        let (p11l, p11h) = mul_wide_u64(self.high, rhs.high);

        let r0 = p00l;

        let (t, c1) = p00h.overflowing_add(p01l);
        let (r1, c2) = t.overflowing_add(p10l);
        let carry1 = c1 as u64 + c2 as u64;

        let (t, c3) = p01h.overflowing_add(p10h);
        let (t, c4) = t.overflowing_add(p11l);
        let (r2, c5) = t.overflowing_add(carry1);
        let carry2 = c3 as u64 + c4 as u64 + c5 as u64;

        // the full product is below 2^256, so this column never carries out
        let r3 = p11h.wrapping_add(carry2);

        (Self::from_parts(r1, r0), Self::from_parts(r3, r2))
    }

    #[inline]
    pub const fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
        let (low, high) = self.widening_mul(rhs);
        (low, !high.is_zero())
    }

    /// Product modulo 2^128. Only the partial products that reach the low
    /// 128 bits are computed.
    #[inline]
    pub const fn wrapping_mul(self, rhs: Self) -> Self {
        let (low, high) = mul_wide_u64(self.low, rhs.low);
        let high = high
            .wrapping_add(self.low.wrapping_mul(rhs.high))
            .wrapping_add(self.high.wrapping_mul(rhs.low));
        Self::from_parts(high, low)
    }

    /// Multiplies by a single limb, returning the carried-out limb.
    #[inline]
    pub const fn overflowing_mul_u64(self, rhs: u64) -> (Self, u64) {
        let (l0, h0) = mul_wide_u64(self.low, rhs);
        let (l1, h1) = mul_wide_u64(self.high, rhs);
        let (mid, carry) = h0.overflowing_add(l1);
        (Self::from_parts(mid, l0), h1 + carry as u64)
    }

    // --- division ---

    /// Quotient and remainder by shift-subtract long division.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[track_caller]
    pub const fn div_rem(self, rhs: Self) -> (Self, Self) {
        if rhs.is_zero() {
            panic!("attempt to divide by zero");
        }
        if let Ordering::Less = self.const_cmp(rhs) {
            return (Self::ZERO, self);
        }
        if self.high == 0 {
            // both operands fit in one limb
            return (
                Self::from_u64(self.low / rhs.low),
                Self::from_u64(self.low % rhs.low),
            );
        }

        let shift = rhs.leading_zeros() - self.leading_zeros();
        let mut divisor = rhs.wrapping_shl(shift);
        let mut remainder = self;
        let mut quotient = Self::ZERO;
        let mut i = 0;
        while i <= shift {
            quotient = quotient.wrapping_shl(1);
            if !matches!(remainder.const_cmp(divisor), Ordering::Less) {
                remainder = remainder.wrapping_sub(divisor);
                quotient.low |= 1;
            }
            divisor = divisor.wrapping_shr(1);
            i += 1;
        }
        (quotient, remainder)
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

    // --- shifts ---

    /// Logical left shift. Shifting by 128 or more bits yields zero.
    #[inline]
    pub const fn wrapping_shl(self, n: u32) -> Self {
        if n >= 128 {
            Self::ZERO
        } else if n >= 64 {
            Self::from_parts(self.low << (n - 64), 0)
        } else if n == 0 {
            self
        } else {
            Self::from_parts((self.high << n) | (self.low >> (64 - n)), self.low << n)
        }
    }

    /// Logical right shift. Shifting by 128 or more bits yields zero.
    #[inline]
    pub const fn wrapping_shr(self, n: u32) -> Self {
        if n >= 128 {
            Self::ZERO
        } else if n >= 64 {
            Self::from_parts(0, self.high >> (n - 64))
        } else if n == 0 {
            self
        } else {
            Self::from_parts(self.high >> n, (self.low >> n) | (self.high << (64 - n)))
        }
    }

    // --- helpers built on the engine ---

    /// Wrapping exponentiation by squaring.
    pub const fn wrapping_pow(self, mut exp: u32) -> Self {
        let mut base = self;
        let mut acc = Self::ONE;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.wrapping_mul(base);
            }
            base = base.wrapping_mul(base);
            exp >>= 1;
        }
        acc
    }

    /// Exponentiation that reports whether any intermediate step overflowed.
    pub const fn overflowing_pow(self, mut exp: u32) -> (Self, bool) {
        let mut base = self;
        let mut acc = Self::ONE;
        let mut overflow = false;
        while exp > 0 {
            if exp & 1 == 1 {
                let (r, o) = acc.overflowing_mul(base);
                acc = r;
                overflow |= o;
            }
            exp >>= 1;
            if exp > 0 {
                let (r, o) = base.overflowing_mul(base);
                base = r;
                overflow |= o;
            }
        }
        (acc, overflow)
    }

    /// Floor of the square root, digit by digit.
    pub const fn isqrt(self) -> Self {
        let mut rem = self;
        let mut root = Self::ZERO;
        // highest power of four not above the value
        let mut bit = if self.is_zero() {
            Self::ZERO
        } else {
            Self::ONE.wrapping_shl((127 - self.leading_zeros()) & !1)
        };
        while !bit.is_zero() {
            let trial = root.wrapping_add(bit);
            if !matches!(rem.const_cmp(trial), Ordering::Less) {
                rem = rem.wrapping_sub(trial);
                root = root.wrapping_shr(1).wrapping_add(bit);
            } else {
                root = root.wrapping_shr(1);
            }
            bit = bit.wrapping_shr(2);
        }
        root
    }

    /// Greatest common divisor (binary algorithm). `gcd(0, 0) == 0`.
    pub const fn gcd(self, other: Self) -> Self {
        let (mut a, mut b) = (self, other);
        if a.is_zero() {
            return b;
        }
        if b.is_zero() {
            return a;
        }
        let common = {
            let t = a.bit_or(b);
            t.trailing_zeros()
        };
        a = a.wrapping_shr(a.trailing_zeros());
        loop {
            b = b.wrapping_shr(b.trailing_zeros());
            if let Ordering::Greater = a.const_cmp(b) {
                let t = a;
                a = b;
                b = t;
            }
            b = b.wrapping_sub(a);
            if b.is_zero() {
                break;
            }
        }
        a.wrapping_shl(common)
    }

    /// Least common multiple modulo 2^128. `lcm(x, 0) == 0`.
    pub const fn wrapping_lcm(self, other: Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::ZERO;
        }
        self.wrapping_div(self.gcd(other)).wrapping_mul(other)
    }

    /// `(self + rhs) / 2` rounded down, without the intermediate carry.
    #[inline]
    pub const fn midpoint(self, rhs: Self) -> Self {
        self.bit_and(rhs).wrapping_add(self.bit_xor(rhs).wrapping_shr(1))
    }

    /// Coefficients `(x, y)` with `self * x + other * y == gcd(self, other)`,
    /// from the extended Euclidean algorithm. `(0, 0)` when both are zero.
    ///
    /// `|x|` stays within `other / (2 * gcd)` and `|y|` within
    /// `self / (2 * gcd)` (or 1), so both fit in [`I128`]. The recurrences
    /// run modulo 2^128.
    pub const fn bezout_coeffs(self, other: Self) -> (I128, I128) {
        if self.is_zero() && other.is_zero() {
            return (I128::ZERO, I128::ZERO);
        }
        let (mut r0, mut r1) = (self, other);
        let (mut s0, mut s1) = (Self::ONE, Self::ZERO);
        let (mut t0, mut t1) = (Self::ZERO, Self::ONE);
        while !r1.is_zero() {
            let (q, r) = r0.div_rem(r1);
            r0 = r1;
            r1 = r;
            let s = s0.wrapping_sub(q.wrapping_mul(s1));
            s0 = s1;
            s1 = s;
            let t = t0.wrapping_sub(q.wrapping_mul(t1));
            t0 = t1;
            t1 = t;
        }
        (I128::from_unsigned(s0), I128::from_unsigned(t0))
    }

    // --- byte layout ---

    /// 16 bytes, least significant first (low limb, then high limb).
    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 16] {
        let low = self.low.to_le_bytes();
        let high = self.high.to_le_bytes();
        let mut out = [0u8; 16];
        let mut i = 0;
        while i < 8 {
            out[i] = low[i];
            out[i + 8] = high[i];
            i += 1;
        }
        out
    }

    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
        let mut low = [0u8; 8];
        let mut high = [0u8; 8];
        let mut i = 0;
        while i < 8 {
            low[i] = bytes[i];
            high[i] = bytes[i + 8];
            i += 1;
        }
        Self::from_parts(u64::from_le_bytes(high), u64::from_le_bytes(low))
    }

    #[inline]
    pub const fn to_be_bytes(self) -> [u8; 16] {
        self.swap_bytes().to_le_bytes()
    }

    #[inline]
    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self::from_le_bytes(bytes).swap_bytes()
    }

    /// Reads the first 16 bytes of `bytes` in little-endian order.
    pub fn try_from_le_slice(bytes: &[u8]) -> crate::SafeResult<Self> {
        let low: [u8; 8] = crate::utils::extract_from_raw_bytes(bytes, 0..8)?;
        let high: [u8; 8] = crate::utils::extract_from_raw_bytes(bytes, 8..16)?;
        Ok(Self::from_parts(u64::from_le_bytes(high), u64::from_le_bytes(low)))
    }
}

impl PartialOrd for U128 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U128 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        (self.high, self.low).cmp(&(other.high, other.low))
    }
}

impl_binary_ops!(U128 {
    Add::add, AddAssign::add_assign => wrapping_add;
    Sub::sub, SubAssign::sub_assign => wrapping_sub;
    Mul::mul, MulAssign::mul_assign => wrapping_mul;
    Div::div, DivAssign::div_assign => wrapping_div;
    Rem::rem, RemAssign::rem_assign => wrapping_rem;
    BitAnd::bitand, BitAndAssign::bitand_assign => bit_and;
    BitOr::bitor, BitOrAssign::bitor_assign => bit_or;
    BitXor::bitxor, BitXorAssign::bitxor_assign => bit_xor;
});

impl_shift_ops!(U128);
impl_not_op!(U128);
