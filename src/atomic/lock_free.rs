// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use core::sync::atomic::Ordering;

use portable_atomic::AtomicU128;

use super::Strategy;
use crate::U128;

/// Native 128-bit atomics (`CMPXCHG16B`, LSE, ...).
///
/// On targets without them `portable_atomic` falls back to a lock, and
/// [`Strategy::is_lock_free`] reports `false`.
#[derive(Debug)]
pub struct LockFree(AtomicU128);

impl Strategy for LockFree {
    const NAME: &'static str = "lock-free";

    fn new(value: U128) -> Self {
        if !AtomicU128::is_lock_free() {
            tracing::debug!("128-bit atomics are not lock-free on this target, using fallback");
        }
        Self(AtomicU128::new(value.to_u128()))
    }

    #[inline]
    fn load(&self) -> U128 {
        U128::from_u128(self.0.load(Ordering::Acquire))
    }

    #[inline]
    fn store(&self, value: U128) {
        self.0.store(value.to_u128(), Ordering::Release)
    }

    #[inline]
    fn swap(&self, value: U128) -> U128 {
        U128::from_u128(self.0.swap(value.to_u128(), Ordering::AcqRel))
    }

    fn compare_exchange(&self, current: U128, new: U128) -> Result<U128, U128> {
        self.0
            .compare_exchange(current.to_u128(), new.to_u128(), Ordering::AcqRel, Ordering::Acquire)
            .map(U128::from_u128)
            .map_err(U128::from_u128)
    }

    fn update<F>(&self, mut f: F) -> Result<U128, U128>
    where
        F: FnMut(U128) -> Option<U128>,
    {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                f(U128::from_u128(raw)).map(U128::to_u128)
            })
            .map(U128::from_u128)
            .map_err(U128::from_u128)
    }

    fn is_lock_free(&self) -> bool {
        AtomicU128::is_lock_free()
    }

    fn into_inner(self) -> U128 {
        U128::from_u128(self.0.into_inner())
    }
}
