// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Shared 128-bit cells.
//!
//! [`Atomic128`] owns one value and the synchronization primitive of its
//! strategy `S`. The strategy is a type parameter and cannot change for the
//! lifetime of the cell. Every operation is linearizable and a reader never
//! sees the two limbs from different writes.
//!
//! ```
//! use limb128::{atomic::RwLocked, Atomic128, U128};
//!
//! let counter: Atomic128<U128, RwLocked> = Atomic128::new(U128::ZERO);
//! std::thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for _ in 0..100 {
//!                 counter.increment();
//!             }
//!         });
//!     }
//! });
//! assert_eq!(counter.load(), U128::from_u64(400));
//! ```

mod lock_free;
mod mutex;
mod rw_lock;
mod spin;

use core::fmt;
use core::marker::PhantomData;

use crate::{ArithmeticError, SafeResult, I128, U128};

pub use lock_free::LockFree;
pub use mutex::Mutexed;
pub use rw_lock::RwLocked;
pub use spin::SpinLocked;

/// Value types that can live in an [`Atomic128`]. Addition, subtraction,
/// multiplication and the bitwise operations act on the raw bits; ordering
/// and division use the type's own semantics.
pub trait Word128: Copy + Ord + Send + Sync + 'static {
    fn to_bits(self) -> U128;
    fn from_bits(bits: U128) -> Self;
    fn wrapping_div(self, rhs: Self) -> Self;
    fn wrapping_rem(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    fn is_zero(self) -> bool;
}

macro_rules! impl_word128 {
    ( $name:ident, $to:expr, $from:expr ) => {
        impl Word128 for $name {
            #[inline]
            fn to_bits(self) -> U128 {
                ($to)(self)
            }

            #[inline]
            fn from_bits(bits: U128) -> Self {
                ($from)(bits)
            }

            #[inline]
            fn wrapping_div(self, rhs: Self) -> Self {
                $name::wrapping_div(self, rhs)
            }

            #[inline]
            fn wrapping_rem(self, rhs: Self) -> Self {
                $name::wrapping_rem(self, rhs)
            }

            #[inline]
            fn wrapping_neg(self) -> Self {
                $name::wrapping_neg(self)
            }

            #[inline]
            fn is_zero(self) -> bool {
                $name::is_zero(self)
            }
        }
    };
}

impl_word128!(U128, |v: U128| v, |b: U128| b);
impl_word128!(I128, I128::to_unsigned, I128::from_unsigned);

/// How an [`Atomic128`] synchronizes access to its bits.
pub trait Strategy: Send + Sync + Sized {
    /// Short name used in diagnostics.
    const NAME: &'static str;

    fn new(value: U128) -> Self;
    fn load(&self) -> U128;
    fn store(&self, value: U128);
    fn swap(&self, value: U128) -> U128;

    /// Replaces the value with `new` if it equals `current`. Returns the
    /// previous value, `Ok` on success and `Err` on mismatch.
    fn compare_exchange(&self, current: U128, new: U128) -> Result<U128, U128>;

    /// Applies `f` as one linearizable step. `f` may run more than once on
    /// strategies that retry. Returns the previous value, `Err` if `f`
    /// returned `None`.
    fn update<F>(&self, f: F) -> Result<U128, U128>
    where
        F: FnMut(U128) -> Option<U128>;

    fn is_lock_free(&self) -> bool;
    fn into_inner(self) -> U128;
}

/// A 128-bit value shared between threads.
pub struct Atomic128<T: Word128, S: Strategy = LockFree> {
    inner: S,
    _marker: PhantomData<fn() -> T>,
}

/// Unsigned cell on the default strategy.
pub type AtomicU128 = Atomic128<U128>;
/// Signed cell on the default strategy.
pub type AtomicI128 = Atomic128<I128>;

impl<T: Word128, S: Strategy> Atomic128<T, S> {
    pub fn new(value: T) -> Self {
        let inner = S::new(value.to_bits());
        tracing::trace!(
            strategy = S::NAME,
            lock_free = inner.is_lock_free(),
            "created 128-bit atomic cell"
        );
        Self { inner, _marker: PhantomData }
    }

    /// Whether operations on this cell avoid locks on the current platform.
    #[inline]
    pub fn is_lock_free(&self) -> bool {
        self.inner.is_lock_free()
    }

    #[inline]
    pub fn strategy_name(&self) -> &'static str {
        S::NAME
    }

    #[inline]
    pub fn into_inner(self) -> T {
        T::from_bits(self.inner.into_inner())
    }

    #[inline]
    pub fn load(&self) -> T {
        T::from_bits(self.inner.load())
    }

    #[inline]
    pub fn store(&self, value: T) {
        self.inner.store(value.to_bits())
    }

    #[inline]
    pub fn swap(&self, value: T) -> T {
        T::from_bits(self.inner.swap(value.to_bits()))
    }

    /// Stores `new` if the current value is `current`.
    ///
    /// # Errors
    ///
    /// Returns the actual value if it differs from `current`.
    pub fn compare_exchange(&self, current: T, new: T) -> Result<T, T> {
        self.inner
            .compare_exchange(current.to_bits(), new.to_bits())
            .map(T::from_bits)
            .map_err(T::from_bits)
    }

    /// Applies `f` atomically and returns the previous value. Leaves the
    /// cell untouched and returns `Err(previous)` when `f` returns `None`.
    pub fn fetch_update<F>(&self, mut f: F) -> Result<T, T>
    where
        F: FnMut(T) -> Option<T>,
    {
        self.inner
            .update(|bits| f(T::from_bits(bits)).map(T::to_bits))
            .map(T::from_bits)
            .map_err(T::from_bits)
    }

    /// Applies `f` atomically and returns the new value.
    pub fn update<F>(&self, mut f: F) -> T
    where
        F: FnMut(T) -> T,
    {
        // the last run of the closure is the one that was committed
        let mut next = U128::ZERO;
        match self.inner.update(|bits| {
            next = f(T::from_bits(bits)).to_bits();
            Some(next)
        }) {
            Ok(_) | Err(_) => T::from_bits(next),
        }
    }

    fn fetch_bits<F>(&self, f: F) -> T
    where
        F: Fn(U128) -> U128,
    {
        match self.inner.update(|bits| Some(f(bits))) {
            Ok(prev) | Err(prev) => T::from_bits(prev),
        }
    }

    /// Wrapping add; returns the previous value.
    pub fn fetch_add(&self, value: T) -> T {
        let rhs = value.to_bits();
        self.fetch_bits(|bits| bits.wrapping_add(rhs))
    }

    pub fn fetch_sub(&self, value: T) -> T {
        let rhs = value.to_bits();
        self.fetch_bits(|bits| bits.wrapping_sub(rhs))
    }

    /// Wrapping multiply. The low 128 bits of a product are the same for
    /// signed and unsigned operands.
    pub fn fetch_mul(&self, value: T) -> T {
        let rhs = value.to_bits();
        self.fetch_bits(|bits| bits.wrapping_mul(rhs))
    }

    pub fn fetch_and(&self, value: T) -> T {
        let rhs = value.to_bits();
        self.fetch_bits(|bits| bits.bit_and(rhs))
    }

    pub fn fetch_or(&self, value: T) -> T {
        let rhs = value.to_bits();
        self.fetch_bits(|bits| bits.bit_or(rhs))
    }

    pub fn fetch_xor(&self, value: T) -> T {
        let rhs = value.to_bits();
        self.fetch_bits(|bits| bits.bit_xor(rhs))
    }

    pub fn fetch_max(&self, value: T) -> T {
        self.fetch_bits(|bits| T::from_bits(bits).max(value).to_bits())
    }

    pub fn fetch_min(&self, value: T) -> T {
        self.fetch_bits(|bits| T::from_bits(bits).min(value).to_bits())
    }

    pub fn fetch_neg(&self) -> T {
        self.fetch_bits(|bits| T::from_bits(bits).wrapping_neg().to_bits())
    }

    /// Divides in place and returns the previous value. Signed `MIN / -1`
    /// wraps to `MIN`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero divisor; the cell is not modified.
    pub fn fetch_div(&self, divisor: T) -> SafeResult<T> {
        if divisor.is_zero() {
            tracing::debug!(strategy = S::NAME, "fetch_div rejected a zero divisor");
            return Err(ArithmeticError::InvalidInput);
        }
        Ok(self.fetch_bits(|bits| T::from_bits(bits).wrapping_div(divisor).to_bits()))
    }

    /// Remainder in place, returning the previous value.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero divisor; the cell is not modified.
    pub fn fetch_rem(&self, divisor: T) -> SafeResult<T> {
        if divisor.is_zero() {
            tracing::debug!(strategy = S::NAME, "fetch_rem rejected a zero divisor");
            return Err(ArithmeticError::InvalidInput);
        }
        Ok(self.fetch_bits(|bits| T::from_bits(bits).wrapping_rem(divisor).to_bits()))
    }

    /// Adds one and returns the new value.
    pub fn increment(&self) -> T {
        self.update(|v| T::from_bits(v.to_bits().wrapping_add(U128::ONE)))
    }

    /// Subtracts one and returns the new value.
    pub fn decrement(&self) -> T {
        self.update(|v| T::from_bits(v.to_bits().wrapping_sub(U128::ONE)))
    }
}

impl<T: Word128 + Default, S: Strategy> Default for Atomic128<T, S> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Word128, S: Strategy> From<T> for Atomic128<T, S> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Word128 + fmt::Debug, S: Strategy> fmt::Debug for Atomic128<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atomic128")
            .field("value", &self.load())
            .field("strategy", &S::NAME)
            .finish()
    }
}
