// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Why a checked operation refused to produce a value.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ArithmeticError {
    /// The mathematical result is above the largest representable value.
    #[error("arithmetic overflow")]
    Overflow,
    /// The mathematical result is below the smallest representable value.
    #[error("arithmetic underflow")]
    Underflow,
    /// The operands do not describe a defined result: division by zero,
    /// a bit index or shift outside `0..128`, a NaN or infinite float,
    /// or malformed text.
    #[error("invalid input")]
    InvalidInput,
}

/// Outcome of a checked operation. `Ok` is the success status.
pub type SafeResult<T> = Result<T, ArithmeticError>;

/// Flat tag for callers that branch on the outcome without the payload.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Status {
    Success,
    Overflow,
    Underflow,
    InvalidInput,
}

impl Status {
    pub fn of<T>(result: &SafeResult<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(e) => (*e).into(),
        }
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

impl From<ArithmeticError> for Status {
    fn from(e: ArithmeticError) -> Self {
        match e {
            ArithmeticError::Overflow => Status::Overflow,
            ArithmeticError::Underflow => Status::Underflow,
            ArithmeticError::InvalidInput => Status::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tracks_outcome() {
        let ok: SafeResult<u8> = Ok(3);
        let ovf: SafeResult<u8> = Err(ArithmeticError::Overflow);
        let bad: SafeResult<u8> = Err(ArithmeticError::InvalidInput);

        assert_eq!(Status::of(&ok), Status::Success);
        assert!(Status::of(&ok).is_success());
        assert_eq!(Status::of(&ovf), Status::Overflow);
        assert_eq!(Status::of(&bad), Status::InvalidInput);
    }

    #[test]
    fn messages() {
        assert_eq!(ArithmeticError::Overflow.to_string(), "arithmetic overflow");
        assert_eq!(ArithmeticError::Underflow.to_string(), "arithmetic underflow");
        assert_eq!(ArithmeticError::InvalidInput.to_string(), "invalid input");
    }
}
