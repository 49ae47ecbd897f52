// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests: the two-limb engine against native `u128` / `i128`
//! and a 256-bit oracle.

#[cfg(test)]
mod tests {
    use crate::*;
    use proptest::prelude::*;

    ::uint::construct_uint! {
        struct U256(4);
    }

    fn arb_u128() -> impl Strategy<Value = U128> {
        prop_oneof![
            any::<u128>(),
            any::<u64>().prop_map(u128::from),
            Just(0u128),
            Just(u128::MAX),
            Just(1u128 << 64),
        ]
        .prop_map(U128::from_u128)
    }

    fn arb_i128() -> impl Strategy<Value = I128> {
        prop_oneof![
            any::<i128>(),
            any::<i64>().prop_map(i128::from),
            Just(i128::MIN),
            Just(i128::MAX),
            Just(-1i128),
        ]
        .prop_map(I128::from_i128)
    }

    fn low_mask(len: u32) -> u128 {
        if len >= 128 { u128::MAX } else { (1u128 << len) - 1 }
    }

    // ========================================================================
    // Unsigned engine
    // ========================================================================

    proptest! {
        #[test]
        fn prop_add_sub_wrap(a in arb_u128(), b in arb_u128()) {
            let (x, y) = (a.to_u128(), b.to_u128());
            prop_assert_eq!((a + b).to_u128(), x.wrapping_add(y));
            prop_assert_eq!((a - b).to_u128(), x.wrapping_sub(y));
            prop_assert_eq!(a.overflowing_add(b).1, x.overflowing_add(y).1);
            prop_assert_eq!((a + b) - b, a);
        }

        #[test]
        fn prop_mul_matches_native(a in arb_u128(), b in arb_u128()) {
            let (x, y) = (a.to_u128(), b.to_u128());
            prop_assert_eq!(a.wrapping_mul(b).to_u128(), x.wrapping_mul(y));
            prop_assert_eq!(a.overflowing_mul(b).1, x.overflowing_mul(y).1);
        }

        #[test]
        fn prop_widening_mul_matches_u256(a in arb_u128(), b in arb_u128()) {
            let product = U256::from(a.to_u128()) * U256::from(b.to_u128());
            let (lo, hi) = a.widening_mul(b);
            prop_assert_eq!(lo.to_u128(), product.low_u128());
            prop_assert_eq!(hi.to_u128(), (product >> 128).low_u128());
        }

        #[test]
        fn prop_div_rem_matches_native(a in arb_u128(), b in arb_u128()) {
            prop_assume!(!b.is_zero());
            let (q, r) = a.div_rem(b);
            prop_assert_eq!(q.to_u128(), a.to_u128() / b.to_u128());
            prop_assert_eq!(r.to_u128(), a.to_u128() % b.to_u128());
            prop_assert!(r < b);
        }

        #[test]
        fn prop_shifts_match_native(a in arb_u128(), n in 0u32..160) {
            let x = a.to_u128();
            let left = x.checked_shl(n).unwrap_or(0);
            let right = x.checked_shr(n).unwrap_or(0);
            prop_assert_eq!((a << n).to_u128(), left);
            prop_assert_eq!((a >> n).to_u128(), right);
        }

        #[test]
        fn prop_ordering_matches_native(a in arb_u128(), b in arb_u128()) {
            prop_assert_eq!(a.cmp(&b), a.to_u128().cmp(&b.to_u128()));
        }
    }

    // ========================================================================
    // Signed engine
    // ========================================================================

    proptest! {
        #[test]
        fn prop_signed_arith_matches_native(a in arb_i128(), b in arb_i128()) {
            let (x, y) = (a.to_i128(), b.to_i128());
            prop_assert_eq!((a + b).to_i128(), x.wrapping_add(y));
            prop_assert_eq!((a - b).to_i128(), x.wrapping_sub(y));
            prop_assert_eq!((a * b).to_i128(), x.wrapping_mul(y));
            prop_assert_eq!(a.overflowing_mul(b).1, x.overflowing_mul(y).1);
            prop_assert_eq!(a.overflowing_sub(b).1, x.overflowing_sub(y).1);
        }

        #[test]
        fn prop_signed_div_matches_native(a in arb_i128(), b in arb_i128()) {
            prop_assume!(!b.is_zero());
            let (x, y) = (a.to_i128(), b.to_i128());
            prop_assert_eq!(a.wrapping_div(b).to_i128(), x.wrapping_div(y));
            prop_assert_eq!(a.wrapping_rem(b).to_i128(), x.wrapping_rem(y));
        }

        #[test]
        fn prop_signed_safe_matches_checked(a in arb_i128(), b in arb_i128()) {
            let (x, y) = (a.to_i128(), b.to_i128());
            prop_assert_eq!(a.safe_add(b).ok().map(I128::to_i128), x.checked_add(y));
            prop_assert_eq!(a.safe_sub(b).ok().map(I128::to_i128), x.checked_sub(y));
            prop_assert_eq!(a.safe_mul(b).ok().map(I128::to_i128), x.checked_mul(y));
            prop_assert_eq!(a.safe_div(b).ok().map(I128::to_i128), x.checked_div(y));
        }

        #[test]
        fn prop_arithmetic_shift_matches_native(a in arb_i128(), n in 0u32..128) {
            prop_assert_eq!((a >> n).to_i128(), a.to_i128() >> n);
            prop_assert_eq!((a << n).to_i128(), a.to_i128() << n);
        }

        #[test]
        fn prop_signed_ordering(a in arb_i128(), b in arb_i128()) {
            prop_assert_eq!(a.cmp(&b), a.to_i128().cmp(&b.to_i128()));
        }
    }

    // ========================================================================
    // Safety layer
    // ========================================================================

    proptest! {
        #[test]
        fn prop_unsigned_safe_matches_checked(a in arb_u128(), b in arb_u128()) {
            let (x, y) = (a.to_u128(), b.to_u128());
            prop_assert_eq!(a.safe_add(b).ok().map(U128::to_u128), x.checked_add(y));
            prop_assert_eq!(a.safe_sub(b).ok().map(U128::to_u128), x.checked_sub(y));
            prop_assert_eq!(a.safe_mul(b).ok().map(U128::to_u128), x.checked_mul(y));
            prop_assert_eq!(a.safe_rem(b).ok().map(U128::to_u128), x.checked_rem(y));
            prop_assert_eq!(a.saturating_mul(b).to_u128(), x.saturating_mul(y));
            prop_assert_eq!(a.saturating_sub(b).to_u128(), x.saturating_sub(y));
        }

        #[test]
        fn prop_signed_saturating_matches_native(a in arb_i128(), b in arb_i128()) {
            let (x, y) = (a.to_i128(), b.to_i128());
            prop_assert_eq!(a.saturating_add(b).to_i128(), x.saturating_add(y));
            prop_assert_eq!(a.saturating_sub(b).to_i128(), x.saturating_sub(y));
            prop_assert_eq!(a.saturating_mul(b).to_i128(), x.saturating_mul(y));
        }

        #[test]
        fn prop_clamp_stays_in_range(v in arb_i128(), a in arb_i128(), b in arb_i128()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let c = clamp(v, lo, hi);
            prop_assert!(in_range(&c, &lo, &hi));
            prop_assert_eq!(c == v, in_range(&v, &lo, &hi));
        }
    }

    // ========================================================================
    // Bit engine
    // ========================================================================

    proptest! {
        #[test]
        fn prop_rotate_round_trip(a in arb_u128(), n in 0u32..300) {
            prop_assert_eq!(a.rotate_left(n).rotate_right(n), a);
            prop_assert_eq!(a.rotate_left(n).to_u128(), a.to_u128().rotate_left(n));
        }

        #[test]
        fn prop_bit_counts_match_native(a in arb_u128()) {
            let x = a.to_u128();
            prop_assert_eq!(a.count_ones(), x.count_ones());
            prop_assert_eq!(a.leading_zeros(), x.leading_zeros());
            prop_assert_eq!(a.trailing_zeros(), x.trailing_zeros());
            prop_assert_eq!(a.swap_bytes().to_u128(), x.swap_bytes());
            prop_assert_eq!(a.reverse_bits().to_u128(), x.reverse_bits());
            prop_assert_eq!(a.swap_bytes().swap_bytes(), a);
        }

        #[test]
        fn prop_find_set_bits(a in arb_u128()) {
            let x = a.to_u128();
            let first = (x != 0).then(|| x.trailing_zeros());
            let last = (x != 0).then(|| 127 - x.leading_zeros());
            prop_assert_eq!(a.find_first_set(), first);
            prop_assert_eq!(a.find_last_set(), last);
        }

        #[test]
        fn prop_pdep_pext_round_trip(a in arb_u128(), mask in arb_u128()) {
            let deposited = a.parallel_deposit(mask);
            prop_assert_eq!(deposited.bit_and(mask.bit_not()), U128::ZERO);
            let expected = a.to_u128() & low_mask(mask.count_ones());
            prop_assert_eq!(deposited.parallel_extract(mask).to_u128(), expected);
        }

        #[test]
        fn prop_insert_extract_round_trip(
            a in arb_u128(),
            bits in arb_u128(),
            start in 0u32..128,
            len in 0u32..=128,
        ) {
            prop_assume!(start + len <= 128);
            let inserted = a.insert_bits(bits, start, len).unwrap();
            let field = inserted.extract_bits(start, len).unwrap();
            prop_assert_eq!(field.to_u128(), bits.to_u128() & low_mask(len));
            // bits outside the field are untouched
            let outside = !(low_mask(len).checked_shl(start).unwrap_or(0));
            prop_assert_eq!(inserted.to_u128() & outside, a.to_u128() & outside);
        }
    }

    // ========================================================================
    // Number theory helpers
    // ========================================================================

    fn euclid_gcd(mut a: u128, mut b: u128) -> u128 {
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a
    }

    proptest! {
        #[test]
        fn prop_midpoint_matches_wide_sum(a in arb_u128(), b in arb_u128()) {
            let sum = U256::from(a.to_u128()) + U256::from(b.to_u128());
            prop_assert_eq!(a.midpoint(b).to_u128(), (sum >> 1).low_u128());
        }

        #[test]
        fn prop_signed_midpoint_leans_toward_first(a in arb_i128(), b in arb_i128()) {
            let (x, y, m) = (a.to_i128(), b.to_i128(), a.midpoint(b).to_i128());
            prop_assert!(m >= x.min(y) && m <= x.max(y));
            let near = m.abs_diff(x);
            let far = m.abs_diff(y);
            prop_assert_eq!(near + far, x.abs_diff(y));
            prop_assert!(far - near <= 1);
        }

        #[test]
        fn prop_gcd_matches_euclid(a in arb_i128(), b in arb_i128()) {
            let (x, y) = (a.to_i128().unsigned_abs(), b.to_i128().unsigned_abs());
            prop_assert_eq!(a.gcd(b).to_u128(), euclid_gcd(x, y));
            prop_assert_eq!(a.unsigned_abs().gcd(b.unsigned_abs()).to_u128(), euclid_gcd(x, y));
        }

        #[test]
        fn prop_bezout_identity(a in arb_u128(), b in arb_u128()) {
            let (x, y) = a.bezout_coeffs(b);
            let g = a.gcd(b);
            let lhs = a.wrapping_mul(x.to_unsigned()).wrapping_add(b.wrapping_mul(y.to_unsigned()));
            prop_assert_eq!(lhs, g);
            if !g.is_zero() {
                let bound_x = (b.to_u128() / g.to_u128()).max(1);
                let bound_y = (a.to_u128() / g.to_u128()).max(1);
                prop_assert!(x.to_i128().unsigned_abs() <= bound_x);
                prop_assert!(y.to_i128().unsigned_abs() <= bound_y);
            }
        }

        #[test]
        fn prop_signed_isqrt_brackets_value(a in arb_i128()) {
            match a.isqrt() {
                Ok(r) => {
                    let (r, v) = (r.to_i128() as u128, a.to_i128() as u128);
                    prop_assert!(r * r <= v);
                    prop_assert!((r + 1).checked_mul(r + 1).map_or(true, |s| s > v));
                }
                Err(e) => {
                    prop_assert!(a.is_negative());
                    prop_assert_eq!(e, ArithmeticError::InvalidInput);
                }
            }
        }
    }

    // ========================================================================
    // Text and conversions
    // ========================================================================

    proptest! {
        #[test]
        fn prop_format_parse_round_trip(a in arb_u128()) {
            prop_assert_eq!(a.to_string(), a.to_u128().to_string());
            prop_assert_eq!(U128::parse_radix(&a.to_string(), 10), Ok(a));
            prop_assert_eq!(U128::parse_radix(&format!("{a:x}"), 16), Ok(a));
            prop_assert_eq!(U128::parse_radix(&format!("{a:#o}"), 8), Ok(a));
            prop_assert_eq!(U128::parse_radix(&format!("{a:#b}"), 2), Ok(a));
        }

        #[test]
        fn prop_signed_format_parse_round_trip(a in arb_i128()) {
            prop_assert_eq!(a.to_string(), a.to_i128().to_string());
            prop_assert_eq!(a.to_string().parse::<I128>(), Ok(a));
        }

        #[test]
        fn prop_byte_round_trip(a in arb_u128()) {
            prop_assert_eq!(a.to_le_bytes(), a.to_u128().to_le_bytes());
            prop_assert_eq!(a.to_be_bytes(), a.to_u128().to_be_bytes());
            prop_assert_eq!(U128::try_from_le_slice(&a.to_le_bytes()), Ok(a));
        }

        #[test]
        fn prop_float_casts_match_native(a in arb_u128(), b in arb_i128()) {
            let x = a.to_u128();
            prop_assert_eq!(a.to_f64(), x as f64);
            let native = x as f32;
            if native.is_finite() {
                prop_assert_eq!(a.safe_cast::<f32>(), Ok(native));
            } else {
                prop_assert_eq!(a.safe_cast::<f32>(), Err(ArithmeticError::Overflow));
            }

            let y = b.to_i128();
            prop_assert_eq!(b.to_f64(), y as f64);
            prop_assert_eq!(b.safe_cast::<f32>(), Ok(y as f32));
        }

        #[test]
        fn prop_float_ties_round_once(mantissa in any::<u64>(), low in 1u64..=u64::MAX) {
            // high limb exactly halfway between two floats; the low limb breaks the tie
            let tie64 = (1 << 63) | (mantissa << 11 >> 1) & !0x7ff | (1 << 10);
            let x = (u128::from(tie64) << 64) | u128::from(low);
            prop_assert_eq!(U128::from_u128(x).to_f64(), x as f64);

            let tie32 = (1 << 63) | (mantissa << 40 >> 1) & !((1 << 40) - 1) | (1 << 39);
            let y = (u128::from(tie32) << 64) | u128::from(low);
            prop_assert_eq!(U128::from_u128(y).to_f32(), y as f32);
            prop_assert_eq!(U128::from_u128(y >> 1).to_f32(), (y >> 1) as f32);
        }

        #[test]
        fn prop_narrowing_casts_match_try_from(a in arb_i128()) {
            let x = a.to_i128();
            prop_assert_eq!(a.try_cast::<i64>(), i64::try_from(x).ok());
            prop_assert_eq!(a.try_cast::<u32>(), u32::try_from(x).ok());
            prop_assert_eq!(a.try_cast::<u128>(), u128::try_from(x).ok());
        }
    }
}
