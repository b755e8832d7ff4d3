//! A minimal stand-in for the task/process a blocked pipe operation
//! belongs to.
//!
//! The teaching kernel checks `Proc::killed()` after every wakeup in its
//! pipe read/write loops (`kernel/src/file/pipe.rs`) to let a signalled
//! process unwind out of a blocking syscall. The process table that
//! flag lives on is out of scope here (spec §1), so this crate takes an
//! explicit, independently-cancellable handle instead: exactly the
//! cooperative-cancellation half of `Proc::killed()`, with the
//! scheduling and signal-delivery machinery around it left out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cancellation flag shared between whoever is blocked in
/// [`crate::pipe::Pipe::write`]/[`crate::pipe::Pipe::read`] and whoever
/// decides that task should stop waiting.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    killed: Arc<AtomicBool>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the task as killed. Any blocking pipe call it is parked in
    /// will observe this on its next wakeup check and return
    /// [`crate::error::Error::Killed`].
    pub fn kill(&self) {
        self.killed.store(true, Ordering::Release);
    }

    pub fn killed(&self) -> bool {
        self.killed.load(Ordering::Acquire)
    }
}
