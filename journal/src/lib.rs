//! Crash-consistent filesystem journal and blocking pipe.
//!
//! This crate carries two closely related pieces of a teaching
//! kernel's core: a write-ahead/redo [`journal`] that groups disk
//! writes into atomically-installed transactions, spread across
//! several parallel log slots so more than one transaction can be
//! committing at once, and a bounded blocking [`pipe`] sharing the same
//! [`sync`] primitives. Disk block allocation, inode and directory
//! formats, path resolution, and the process scheduler that would
//! drive all of this in a real kernel are out of scope; see `disk` and
//! `task` for the host-testable stand-ins this crate uses in their
//! place.

pub mod cache;
pub mod disk;
pub mod error;
pub mod fs;
pub mod journal;
pub mod param;
pub mod pipe;
pub mod sync;
pub mod task;
pub(crate) mod trace;

pub use error::{Error, Result};
pub use journal::{Journal, Transaction};
pub use pipe::{PipeReader, PipeWriter, pipe};
pub use task::TaskHandle;
