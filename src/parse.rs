// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! String parsing with an explicit radix.
//!
//! Accepted shape: an optional sign, an optional `0x` / `0o` / `0b` prefix
//! when it matches the radix, then digits with optional `_` separators after
//! the first digit.

use core::str::FromStr;

use crate::{ArithmeticError, SafeArithmetic, SafeResult, I128, U128};

/// Splits off a leading sign. Returns `true` for negative.
fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn strip_radix_prefix(s: &str, radix: u32) -> &str {
    let prefix = match radix {
        16 => ["0x", "0X"],
        8 => ["0o", "0O"],
        2 => ["0b", "0B"],
        _ => return s,
    };
    prefix.iter().find_map(|p| s.strip_prefix(*p)).unwrap_or(s)
}

/// Parses an unsigned magnitude. Too many digits is `Overflow`.
fn parse_magnitude(digits: &str, radix: u32) -> SafeResult<U128> {
    if !(2..=36).contains(&radix) {
        return Err(ArithmeticError::InvalidInput);
    }
    let mut chars = digits.chars();
    let first = chars
        .next()
        .and_then(|c| c.to_digit(radix))
        .ok_or(ArithmeticError::InvalidInput)?;

    let base = U128::from_u64(u64::from(radix));
    let mut acc = U128::from_u64(u64::from(first));
    // a bad digit later in the string outranks an overflow seen earlier
    let mut overflowed = false;
    for c in chars {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(radix).ok_or(ArithmeticError::InvalidInput)?;
        if overflowed {
            continue;
        }
        match acc.safe_mul(base).and_then(|v| v.safe_add(U128::from_u64(u64::from(d)))) {
            Ok(v) => acc = v,
            Err(_) => overflowed = true,
        }
    }
    if overflowed {
        return Err(ArithmeticError::Overflow);
    }
    Ok(acc)
}

impl U128 {
    /// Parses `s` in the given radix (`2..=36`).
    ///
    /// A `-` sign is accepted only in front of zero; any other negative value
    /// is `Underflow`.
    pub fn parse_radix(s: &str, radix: u32) -> SafeResult<Self> {
        let (negative, rest) = split_sign(s);
        let magnitude = parse_magnitude(strip_radix_prefix(rest, radix), radix);
        match (negative, magnitude) {
            (false, m) => m,
            (true, Ok(m)) if m.is_zero() => Ok(m),
            (true, Ok(_)) | (true, Err(ArithmeticError::Overflow)) => Err(ArithmeticError::Underflow),
            (true, Err(e)) => Err(e),
        }
    }
}

impl I128 {
    /// Parses `s` in the given radix (`2..=36`). Values above `MAX` are
    /// `Overflow`, values below `MIN` are `Underflow`.
    pub fn parse_radix(s: &str, radix: u32) -> SafeResult<Self> {
        let (negative, rest) = split_sign(s);
        let magnitude = parse_magnitude(strip_radix_prefix(rest, radix), radix);
        if negative {
            let m = magnitude.map_err(|e| match e {
                ArithmeticError::Overflow => ArithmeticError::Underflow,
                e => e,
            })?;
            if m > I128::MIN.unsigned_abs() {
                return Err(ArithmeticError::Underflow);
            }
            Ok(I128::from_unsigned(m).wrapping_neg())
        } else {
            let m = magnitude?;
            if m > I128::MAX.to_unsigned() {
                return Err(ArithmeticError::Overflow);
            }
            Ok(I128::from_unsigned(m))
        }
    }
}

impl FromStr for U128 {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_radix(s, 10)
    }
}

impl FromStr for I128 {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_radix(s, 10)
    }
}
