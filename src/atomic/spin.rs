// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::Strategy;
use crate::U128;

/// Test-and-test-and-set spinlock.
///
/// The limbs are plain `AtomicU64`s touched with `Relaxed` ordering; only the
/// holder of `locked` reads or writes them, and the Acquire/Release pair on
/// the flag orders those accesses between holders.
///
/// There is no fairness and no backoff beyond [`core::hint::spin_loop`]: a
/// thread may spin indefinitely while others keep winning the lock. Suited
/// to short critical sections with little contention.
#[derive(Default)]
pub struct SpinLocked {
    locked: AtomicBool,
    high: AtomicU64,
    low: AtomicU64,
}

struct SpinGuard<'a> {
    lock: &'a SpinLocked,
}

impl SpinLocked {
    fn lock(&self) -> SpinGuard<'_> {
        loop {
            if self
                .locked
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return SpinGuard { lock: self };
            }
            while self.locked.load(Ordering::Relaxed) {
                core::hint::spin_loop();
            }
        }
    }
}

impl SpinGuard<'_> {
    #[inline]
    fn get(&self) -> U128 {
        U128::from_parts(
            self.lock.high.load(Ordering::Relaxed),
            self.lock.low.load(Ordering::Relaxed),
        )
    }

    #[inline]
    fn set(&self, value: U128) {
        self.lock.high.store(value.high(), Ordering::Relaxed);
        self.lock.low.store(value.low(), Ordering::Relaxed);
    }
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

impl core::fmt::Debug for SpinLocked {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpinLocked").field("value", &self.load()).finish()
    }
}

impl Strategy for SpinLocked {
    const NAME: &'static str = "spinlock";

    fn new(value: U128) -> Self {
        Self {
            locked: AtomicBool::new(false),
            high: AtomicU64::new(value.high()),
            low: AtomicU64::new(value.low()),
        }
    }

    #[inline]
    fn load(&self) -> U128 {
        self.lock().get()
    }

    #[inline]
    fn store(&self, value: U128) {
        self.lock().set(value);
    }

    #[inline]
    fn swap(&self, value: U128) -> U128 {
        let guard = self.lock();
        let prev = guard.get();
        guard.set(value);
        prev
    }

    fn compare_exchange(&self, current: U128, new: U128) -> Result<U128, U128> {
        let guard = self.lock();
        let prev = guard.get();
        if prev != current {
            return Err(prev);
        }
        guard.set(new);
        Ok(prev)
    }

    fn update<F>(&self, mut f: F) -> Result<U128, U128>
    where
        F: FnMut(U128) -> Option<U128>,
    {
        let guard = self.lock();
        let prev = guard.get();
        let next = f(prev).ok_or(prev)?;
        guard.set(next);
        Ok(prev)
    }

    fn is_lock_free(&self) -> bool {
        false
    }

    fn into_inner(self) -> U128 {
        U128::from_parts(self.high.into_inner(), self.low.into_inner())
    }
}
