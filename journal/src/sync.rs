//! Locking and wait/wakeup primitives.
//!
//! The teaching kernel's own version of this module
//! (`kernel/src/sync/spin_lock.rs`) wraps a busy-spinning `RawSpinLock`
//! that disables interrupts and parks on the process table via
//! `proc::sleep`/`proc::wakeup`. That wiring belongs to the VM/scheduler
//! subsystem spec §1 places out of scope. This module keeps the same
//! shape — a `SpinLock<T>` implementing [`mutex_api::Mutex`] so it plugs
//! into `block_io::BlockIoCache` exactly as the teacher's does, plus a
//! broadcast [`CondVar`] with the same `wait`/`notify` shape as the
//! teacher's `SpinLockCondVar` — backed by `std::sync::{Mutex, Condvar}`
//! so the journal and pipe are testable with real OS threads.
//!
//! Per spec §9's redesign flag, every distinct wait condition gets its
//! own [`CondVar`] value rather than a shared raw-pointer "channel":
//! wakers always broadcast (`notify_all`) and sleepers always re-check
//! their predicate in a loop.

use std::ops::{Deref, DerefMut};
use std::sync::{self, Condvar as StdCondVar};
use std::time::Duration;

use mutex_api::Mutex;

/// A mutual-exclusion lock protecting `T`.
pub struct SpinLock<T> {
    inner: sync::Mutex<T>,
}

impl<T> SpinLock<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: sync::Mutex::new(value),
        }
    }

    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        SpinLockGuard {
            guard: self.inner.lock().unwrap_or_else(sync::PoisonError::into_inner),
        }
    }
}

impl<T> Mutex for SpinLock<T> {
    type Data = T;
    type Guard<'a>
        = SpinLockGuard<'a, T>
    where
        T: 'a;

    fn new(data: Self::Data) -> Self {
        Self::new(data)
    }

    fn lock(&self) -> Self::Guard<'_> {
        self.lock()
    }
}

pub struct SpinLockGuard<'a, T> {
    guard: sync::MutexGuard<'a, T>,
}

impl<T> Deref for SpinLockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T> DerefMut for SpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

/// A broadcast condition variable.
///
/// Each distinct wait condition in this crate (pool full, slot not next
/// to install, pipe empty, pipe full) owns one of these. `wait` always
/// re-checks its caller's predicate after waking — `notify` wakes every
/// sleeper, never just one, matching the wait-channel primitive's
/// broadcast semantics from spec §5.
pub struct CondVar {
    inner: StdCondVar,
}

impl CondVar {
    pub const fn new() -> Self {
        Self {
            inner: StdCondVar::new(),
        }
    }

    /// Atomically releases `guard`'s lock and blocks the caller until
    /// [`CondVar::notify`] is called, then reacquires the lock before
    /// returning.
    ///
    /// The caller must re-check its own predicate in a loop: a wakeup is
    /// not a guarantee the predicate now holds, only that it might.
    pub fn wait<'a, T>(&self, guard: SpinLockGuard<'a, T>) -> SpinLockGuard<'a, T> {
        let guard = self
            .inner
            .wait(guard.guard)
            .unwrap_or_else(sync::PoisonError::into_inner);
        SpinLockGuard { guard }
    }

    /// Like [`CondVar::wait`], but returns after `timeout` even without a
    /// notification.
    ///
    /// Used where a waiter also needs to poll a condition this
    /// `CondVar` is never notified about directly — e.g. a blocked pipe
    /// operation rechecking whether its task was killed. The timeout is
    /// a bound on cancellation latency, not the primary wakeup path:
    /// an actual state change still notifies directly.
    pub fn wait_timeout<'a, T>(&self, guard: SpinLockGuard<'a, T>, timeout: Duration) -> SpinLockGuard<'a, T> {
        let (guard, _timed_out) = self
            .inner
            .wait_timeout(guard.guard, timeout)
            .unwrap_or_else(sync::PoisonError::into_inner);
        SpinLockGuard { guard }
    }

    /// Wakes every task currently waiting on this condition variable.
    pub fn notify(&self) {
        self.inner.notify_all();
    }
}

impl Default for CondVar {
    fn default() -> Self {
        Self::new()
    }
}
