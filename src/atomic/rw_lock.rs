// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use parking_lot::RwLock;

use super::Strategy;
use crate::U128;

/// Reader-writer lock: loads share the lock, every write is exclusive.
#[derive(Debug, Default)]
pub struct RwLocked(RwLock<U128>);

impl Strategy for RwLocked {
    const NAME: &'static str = "rw-lock";

    fn new(value: U128) -> Self {
        Self(RwLock::new(value))
    }

    #[inline]
    fn load(&self) -> U128 {
        *self.0.read()
    }

    #[inline]
    fn store(&self, value: U128) {
        *self.0.write() = value;
    }

    #[inline]
    fn swap(&self, value: U128) -> U128 {
        core::mem::replace(&mut *self.0.write(), value)
    }

    fn compare_exchange(&self, current: U128, new: U128) -> Result<U128, U128> {
        let mut guard = self.0.write();
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
        let mut guard = self.0.write();
        let prev = *guard;
        match f(prev) {
            Some(next) => {
                *guard = next;
                Ok(prev)
            }
            None => Err(prev),
        }
    }

    fn is_lock_free(&self) -> bool {
        false
    }

    fn into_inner(self) -> U128 {
        self.0.into_inner()
    }
}
