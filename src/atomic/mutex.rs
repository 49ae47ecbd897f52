// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use parking_lot::Mutex;

use super::Strategy;
use crate::U128;

/// A single exclusive lock around the value.
#[derive(Debug, Default)]
pub struct Mutexed(Mutex<U128>);

impl Strategy for Mutexed {
    const NAME: &'static str = "mutex";

    fn new(value: U128) -> Self {
        Self(Mutex::new(value))
    }

    #[inline]
    fn load(&self) -> U128 {
        *self.0.lock()
    }

    #[inline]
    fn store(&self, value: U128) {
        *self.0.lock() = value;
    }

    #[inline]
    fn swap(&self, value: U128) -> U128 {
        core::mem::replace(&mut *self.0.lock(), value)
    }

    fn compare_exchange(&self, current: U128, new: U128) -> Result<U128, U128> {
        let mut guard = self.0.lock();
        let prev = *guard;
        if prev != current {
            return Err(prev);
        }
        *guard = new;
        Ok(prev)
    }

    fn update<F>(&self, mut f: F) -> Result<U128, U128>
    where
        F: FnMut(U128) -> Option<U128>,
    {
        let mut guard = self.0.lock();
        let prev = *guard;
        let next = f(prev).ok_or(prev)?;
        *guard = next;
        Ok(prev)
    }

    fn is_lock_free(&self) -> bool {
        false
    }

    fn into_inner(self) -> U128 {
        self.0.into_inner()
    }
}
