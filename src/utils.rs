// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::{ArithmeticError, SafeResult};

/// Reads a fixed-size value out of `bytes[range]`. A range that is out of
/// bounds or the wrong length for `T` is `InvalidInput`.
#[inline]
pub(crate) fn extract_from_raw_bytes<T>(bytes: &[u8], range: std::ops::Range<usize>) -> SafeResult<T>
where
    T: Sized + for<'a> TryFrom<&'a [u8]>,
{
    bytes
        .get(range)
        .and_then(|slice| T::try_from(slice).ok())
        .ok_or(ArithmeticError::InvalidInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_bounds() {
        let bytes = [1u8, 2, 3, 4, 5];
        let v: [u8; 2] = extract_from_raw_bytes(&bytes, 1..3).unwrap();
        assert_eq!(v, [2, 3]);
    }

    #[test]
    fn rejects_out_of_bounds() {
        let bytes = [1u8, 2, 3];
        let v: SafeResult<[u8; 4]> = extract_from_raw_bytes(&bytes, 0..4);
        assert_eq!(v, Err(ArithmeticError::InvalidInput));
    }
}
