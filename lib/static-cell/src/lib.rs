// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single-borrow cell for use in `static`s.
//!
//! `StaticCell` hands out exclusive access to its contents one borrower at a
//! time, checked at runtime. It is the mutable-state primitive behind the
//! `ringbuf!` macro, where the ring buffer lives in a `static` and entries
//! are recorded from whatever context happens to be running.

#![cfg_attr(not(test), no_std)]

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

/// A container that can be used in a `static` and grants `&mut` access to
/// its contents to one caller at a time.
///
/// Unlike `RefCell` there is no shared-borrow mode; every access is
/// exclusive. Attempting to borrow while a [`StaticRef`] is live panics.
#[derive(Default)]
pub struct StaticCell<T> {
    borrowed: AtomicBool,
    cell: UnsafeCell<T>,
}

impl<T> StaticCell<T> {
    pub const fn new(contents: T) -> Self {
        Self {
            borrowed: AtomicBool::new(false),
            cell: UnsafeCell::new(contents),
        }
    }

    /// Claims exclusive access to the contents of `self`, panicking if a
    /// previous claim is still outstanding.
    pub fn borrow_mut(&self) -> StaticRef<'_, T> {
        let taken = self.borrowed.swap(true, Ordering::Acquire);
        if taken {
            panic!();
        }
        // Safety: the swap above means we're the only path that observed
        // `borrowed` going false -> true, so no other `&mut` exists.
        StaticRef {
            contents: unsafe { &mut *self.cell.get() },
            borrowed: &self.borrowed,
        }
    }
}

unsafe impl<T> Sync for StaticCell<T> where for<'a> &'a mut T: Send {}

/// Exclusive reference to the contents of a [`StaticCell`]; releases the
/// cell on drop.
pub struct StaticRef<'a, T> {
    contents: &'a mut T,
    borrowed: &'a AtomicBool,
}

impl<T> Drop for StaticRef<'_, T> {
    fn drop(&mut self) {
        self.borrowed.store(false, Ordering::Release);
    }
}

impl<T> core::ops::Deref for StaticRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.contents
    }
}

impl<T> core::ops::DerefMut for StaticRef<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.contents
    }
}
