//! Block cache wiring.
//!
//! Grounded on `kernel/src/fs/block_io.rs`: the teacher pins a concrete
//! `VirtioDiskDevice` to a global `OnceInit<BlockIoCache<...>>`. This
//! crate keeps the same `block_io::BlockIoCache` plumbing but stays
//! generic over the device and avoids the global — per spec §9's
//! redesign flag, the cache is an explicitly-owned value a `Journal`
//! holds, not an ambient singleton.

use block_io::{BlockData, BlockDevice, BlockIoCache};

use crate::{param::BLOCK_SIZE, sync::SpinLock};

pub type BlockDataMutex = SpinLock<BlockData<BLOCK_SIZE>>;
pub type BufferListMutex = SpinLock<block_io::BufferList<BlockDataMutex>>;

/// The block cache the journal reads and writes through.
pub type Cache<Device> = BlockIoCache<Device, BufferListMutex>;

pub type BlockHandle<'a, Device> = block_io::BlockHandle<'a, Device, BufferListMutex, BlockDataMutex>;

pub type BlockGuard<'a, 'b, Device, const VALID: bool> =
    block_io::BlockGuard<'a, 'b, Device, BufferListMutex, BlockDataMutex, BLOCK_SIZE, VALID>;

/// Builds a ready-to-use cache with `num_bufs` buffers, matching the
/// teacher's two-step `BlockIoCache::new` + `BlockIoCache::init`.
pub fn new<Device>(device: Device, num_bufs: usize) -> Cache<Device>
where
    Device: BlockDevice<BLOCK_SIZE>,
{
    let cache = BlockIoCache::new(device);
    cache.init(num_bufs);
    cache
}
