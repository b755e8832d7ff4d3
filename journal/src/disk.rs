//! An in-memory stand-in for the virtio disk driver.
//!
//! The teaching kernel's block cache (`kernel/src/fs/block_io.rs`) is
//! generic over `block_io::BlockDevice` and plugs in a real
//! `VirtioDiskDevice` backed by an emulated PCI disk. That driver is
//! explicitly out of scope here (spec §1: "VM setup ... is deliberately
//! out of scope and treated as an external collaborator"). `MemDisk`
//! fills the same trait for host tests, the same way
//! `crates/block_io/src/lib.rs`'s own test module plugs in a
//! `MockDevice`.
//!
//! Crash scenarios (spec §8, scenarios 4 and 5) are driven by stopping a
//! commit midway through its phases (see `journal::Commit`) rather than
//! by anything in this module; `MemDisk` additionally supports injecting
//! an ordinary I/O failure on a chosen write, for exercising the
//! `Device::Error` path the teacher's `BlockGuard::write` propagates.
//!
//! `MemDisk` is cheaply `Clone`, the same way the block cache's own
//! `MockDevice` test double is: one handle is moved into a
//! `journal::Journal`'s cache, another stays with the test so it can
//! inspect raw bytes or build a second, independent cache over the same
//! backing storage to simulate a reboot after a crash.

use std::sync::{Arc, Mutex};

use block_io::BlockDevice;

use crate::param::BLOCK_SIZE;

#[derive(Debug, thiserror::Error)]
#[error("simulated disk I/O failure on block {0}")]
pub struct DiskError(pub usize);

#[derive(Clone)]
pub struct MemDisk {
    blocks: Arc<Mutex<Vec<[u8; BLOCK_SIZE]>>>,
    fail_write_at: Arc<Mutex<Option<usize>>>,
}

impl MemDisk {
    pub fn new(num_blocks: usize) -> Self {
        Self {
            blocks: Arc::new(Mutex::new(vec![[0; BLOCK_SIZE]; num_blocks])),
            fail_write_at: Arc::new(Mutex::new(None)),
        }
    }

    /// Makes the next write to `index` fail instead of landing on disk.
    pub fn fail_next_write_to(&self, index: usize) {
        *self.fail_write_at.lock().unwrap_or_else(|e| e.into_inner()) = Some(index);
    }

    /// Reads the raw bytes of `index`, bypassing the block cache.
    ///
    /// Used by tests to observe home-location contents directly.
    pub fn read_raw(&self, index: usize) -> [u8; BLOCK_SIZE] {
        self.blocks.lock().unwrap_or_else(|e| e.into_inner())[index]
    }

    /// Overwrites the raw bytes of `index`, bypassing the block cache.
    ///
    /// Used by tests to seed home-location contents before a run.
    pub fn write_raw(&self, index: usize, data: [u8; BLOCK_SIZE]) {
        self.blocks.lock().unwrap_or_else(|e| e.into_inner())[index] = data;
    }
}

impl BlockDevice<BLOCK_SIZE> for MemDisk {
    type Error = DiskError;

    fn read(&self, index: usize, data: &mut [u8; BLOCK_SIZE]) -> Result<(), Self::Error> {
        let blocks = self.blocks.lock().unwrap_or_else(|e| e.into_inner());
        *data = blocks[index];
        Ok(())
    }

    fn write(&self, index: usize, data: &[u8; BLOCK_SIZE]) -> Result<(), Self::Error> {
        let mut fail_at = self.fail_write_at.lock().unwrap_or_else(|e| e.into_inner());
        if *fail_at == Some(index) {
            *fail_at = None;
            return Err(DiskError(index));
        }
        drop(fail_at);

        let mut blocks = self.blocks.lock().unwrap_or_else(|e| e.into_inner());
        blocks[index] = *data;
        Ok(())
    }
}
