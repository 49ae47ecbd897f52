// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Text rendering. Digits are produced a `u64` chunk at a time: one 128-bit
//! long division per chunk, native arithmetic inside it.

use core::fmt;

use crate::{I128, U128};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Largest power of `radix` that fits in a `u64`, with its exponent.
const fn chunk_for(radix: u64) -> (u64, u32) {
    let mut power = radix;
    let mut len = 1;
    while let Some(next) = power.checked_mul(radix) {
        power = next;
        len += 1;
    }
    (power, len)
}

/// Writes `value` in `radix` into the tail of `buf` and returns the digits.
/// 128 bytes is enough for base 2.
fn render(value: U128, radix: u32, upper: bool, buf: &mut [u8; 128]) -> Result<&str, fmt::Error> {
    let radix = u64::from(radix);
    let (chunk, chunk_len) = chunk_for(radix);
    let divisor = U128::from_u64(chunk);

    let mut pos = buf.len();
    let mut rest = value;
    loop {
        let (quotient, remainder) = rest.div_rem(divisor);
        let mut part = remainder.low();
        let mut written = 0;
        loop {
            pos -= 1;
            let digit = DIGITS[(part % radix) as usize];
            buf[pos] = if upper { digit.to_ascii_uppercase() } else { digit };
            part /= radix;
            written += 1;
            // inner chunks are zero-padded to full width
            if written == chunk_len || (part == 0 && quotient.is_zero()) {
                break;
            }
        }
        if quotient.is_zero() {
            break;
        }
        rest = quotient;
    }
    core::str::from_utf8(&buf[pos..]).map_err(|_| fmt::Error)
}

impl fmt::Display for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 128];
        f.pad_integral(true, "", render(*self, 10, false, &mut buf)?)
    }
}

impl fmt::Display for I128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 128];
        let digits = render(self.unsigned_abs(), 10, false, &mut buf)?;
        f.pad_integral(!self.is_negative(), "", digits)
    }
}

impl fmt::Debug for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Debug for I128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Radix formatting shows the raw bits, so negative `I128` values print
/// their two's-complement form like the native signed types do.
macro_rules! impl_radix_fmt {
    ( $name:ident, $to_bits:expr ) => {
        impl_radix_fmt!(@one $name, $to_bits, LowerHex, 16, false, "0x");
        impl_radix_fmt!(@one $name, $to_bits, UpperHex, 16, true, "0x");
        impl_radix_fmt!(@one $name, $to_bits, Octal, 8, false, "0o");
        impl_radix_fmt!(@one $name, $to_bits, Binary, 2, false, "0b");
    };
    (@one $name:ident, $to_bits:expr, $tr:ident, $radix:expr, $upper:expr, $prefix:expr) => {
        impl fmt::$tr for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut buf = [0u8; 128];
                let bits: U128 = ($to_bits)(*self);
                f.pad_integral(true, $prefix, render(bits, $radix, $upper, &mut buf)?)
            }
        }
    };
}

impl_radix_fmt!(U128, |v: U128| v);
impl_radix_fmt!(I128, I128::to_unsigned);
