//! Minimal diagnostic logging.
//!
//! The teaching kernel has no external logging crate: it calls its own
//! `println!` ad hoc at a handful of decision points
//! (`kernel/src/fs.rs:400` `"out of blocks"`, `kernel/src/fs.rs:513`
//! `"no inodes"`), serialized through one lock so concurrent printers
//! don't interleave (`kernel/src/print.rs`'s `Print`). This module is
//! the same shape, narrowed to `journal`'s own decision points: a
//! transaction's real commit point, `begin_op` stalling because every
//! slot is committing, and each transaction recovery installs at boot.

use std::fmt;
use std::io::Write as _;
use std::sync::Mutex;

static TRACE_LOCK: Mutex<()> = Mutex::new(());

#[doc(hidden)]
pub fn _trace(args: fmt::Arguments<'_>) {
    let _guard = TRACE_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let _ = writeln!(std::io::stderr(), "{args}");
}

/// Prints one diagnostic line, serialized against concurrent callers.
///
/// Mirrors the teacher's own habit of an unguarded `println!` at a
/// handful of decision points, narrowed to an explicit macro so call
/// sites read the same way the teacher's do.
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::trace::_trace(format_args!($($arg)*))
    };
}

pub(crate) use trace;
