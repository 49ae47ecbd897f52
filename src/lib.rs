// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! 128-bit signed and unsigned integers built from two `u64` limbs.
//!
//! [`U128`] and [`I128`] behave like the native wide integers: operators
//! wrap, division by zero panics. On top of that engine sit the checked
//! [`SafeArithmetic`] and clamping [`SaturatingArithmetic`] layers, a bit
//! engine, range-checked casts and [`Atomic128`] for sharing a value between
//! threads.
//!
//! ```
//! use limb128::{ArithmeticError, SafeArithmetic, U128};
//!
//! let a = U128::from_parts(1, 0);
//! assert_eq!(a.wrapping_mul(a), U128::ZERO);
//! assert_eq!(a.safe_mul(a), Err(ArithmeticError::Overflow));
//! assert_eq!("18446744073709551616".parse::<U128>(), Ok(a));
//! ```

mod macros;

pub mod atomic;
mod bits;
pub mod convert;
pub mod error;
mod fmt;
mod int;
pub mod limits;
mod parse;
pub mod safe;
mod serialize;
mod uint;
mod utils;

mod property_tests;

pub use atomic::{Atomic128, AtomicI128, AtomicU128, Word128};
pub use convert::CastFrom128;
pub use error::{ArithmeticError, SafeResult, Status};
pub use int::I128;
pub use limits::{Bounded, Limits};
pub use safe::{clamp, in_range, SafeArithmetic, SaturatingArithmetic};
pub use uint::U128;
