//! Minimal on-disk identifiers shared by the journal and its block cache.
//!
//! Grounded on `kernel/src/fs/mod.rs` (`DeviceNo`) and the legacy
//! `kernel/src/fs.rs` `SuperBlock` (`logstart`, `nlog`, ...). Inode
//! layout, directories, and path resolution are spec §1 Non-goals and
//! have no counterpart here.

use core::num::NonZeroU32;

use dataview::Pod;

/// A device identifier. Block 0 of device 0 is never a valid target, so
/// this is represented as a `NonZeroU32` the same way the teacher's
/// `fs::DeviceNo` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct DeviceNo(NonZeroU32);

impl DeviceNo {
    pub const fn new(n: u32) -> Option<Self> {
        match NonZeroU32::new(n) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    pub const fn value(self) -> u32 {
        self.0.get()
    }
}

/// A block number on a device. Block 0 holds the boot sector and is
/// never addressed through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct BlockNo(NonZeroU32);

impl BlockNo {
    pub const fn new(n: u32) -> Option<Self> {
        match NonZeroU32::new(n) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    pub const fn value(self) -> u32 {
        self.0.get()
    }

    pub const fn index(self) -> usize {
        self.0.get() as usize
    }
}

/// Disk layout of the one-and-only superblock. Fields beyond `logstart`
/// and `nlog` (spec §6) are kept for on-disk shape fidelity with the
/// teacher's `SuperBlock`, even though this crate never allocates an
/// inode or a data block.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod)]
pub struct SuperBlock {
    /// Must equal [`SuperBlock::FS_MAGIC`].
    pub magic: u32,
    /// Size of the file system image, in blocks.
    pub size: u32,
    /// Number of data blocks.
    pub nblocks: u32,
    /// Number of inodes.
    pub ninodes: u32,
    /// Number of log blocks, divided evenly across `LOG_COPIES` slots.
    pub nlog: u32,
    /// Block number of the first log block.
    pub logstart: u32,
    /// Block number of the first inode block.
    pub inodestart: u32,
    /// Block number of the first free-map block.
    pub bmapstart: u32,
}

impl SuperBlock {
    pub const FS_MAGIC: u32 = 0x1002_0BAD;
}
