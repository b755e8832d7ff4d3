//! Compile-time tunables.
//!
//! Mirrors the teaching kernel's `param.rs`: these are constants, not
//! runtime configuration, and changing them is a recompile.

/// Number of parallel log slots the journal admits transactions into.
pub const LOG_COPIES: usize = 3;

/// Max number of distinct blocks any single transaction may `log_write`.
pub const MAX_OP_BLOCKS: usize = 10;

/// Size of a disk block in bytes.
pub const BLOCK_SIZE: usize = 1024;

/// Maximum number of distinct blocks absorbed into one slot's header.
///
/// Sized so `LogHeader` fills exactly one disk block (`journal::journal`
/// has a `const _: () = assert!(...)` enforcing this), the same way the
/// teacher sizes `xv6_fs_types::LogHeader`'s `block_indices`. Comfortably
/// above `MAX_OP_BLOCKS * LOG_COPIES`, so a full set of maximally-sized
/// concurrent transactions never overflows a slot on its own.
pub const LOG_SIZE: usize = BLOCK_SIZE / 4 - 2;

/// Number of buffers held by the block cache.
pub const NBUF: usize = MAX_OP_BLOCKS * LOG_COPIES * 3;

/// Capacity, in bytes, of a pipe's ring buffer.
pub const PIPE_SIZE: usize = 1024;
