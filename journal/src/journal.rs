//! The multi-slot crash-consistent redo log.
//!
//! Grounded on `kernel/src/fs/log.rs`: a transaction contains the
//! updates of one or more FS operations, absorbs repeated writes to the
//! same block into a single log entry, and commits by writing a body
//! then a header then installing to home locations. That file has a
//! single [`LogSlot`] (there called `Log`); this module generalizes it
//! to `LOG_COPIES` slots so up to `LOG_COPIES` transactions can be
//! committing concurrently, each to its own region of the log
//! partition. There is no single-slot analogue for the pool-level
//! admission loop, the sequence-numbered install ordering, or the
//! `Transaction` handle below — those are this module's own answer to
//! "which slot is a given transaction's", a question the single-slot
//! original never had to ask.

use std::array;
use std::mem::size_of;

use dataview::Pod;

use crate::cache::{self, Cache};
use crate::error::{Error, Result};
use crate::fs::{BlockNo, DeviceNo, SuperBlock};
use crate::param::{BLOCK_SIZE, LOG_COPIES, LOG_SIZE, MAX_OP_BLOCKS};
use crate::sync::{CondVar, SpinLock};
use crate::trace::trace;

/// Contents of a slot's header block: which body slots hold which home
/// blocks, and the sequence number the slot committed under.
///
/// Sized to fill exactly one disk block, the same way the teacher sizes
/// `xv6_fs_types::LogHeader`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod)]
struct LogHeader {
    len: u32,
    seq_nbr: u32,
    block_indices: [u32; LOG_SIZE],
}

const _: () = assert!(size_of::<LogHeader>() == BLOCK_SIZE);

impl LogHeader {
    const fn new() -> Self {
        Self {
            len: 0,
            seq_nbr: 0,
            block_indices: [0; LOG_SIZE],
        }
    }

    fn len(&self) -> usize {
        self.len as usize
    }

    fn copy_from(&mut self, src: &LogHeader) {
        self.len = src.len;
        self.seq_nbr = src.seq_nbr;
        let len = self.len();
        self.block_indices[..len].copy_from_slice(&src.block_indices[..len]);
    }

    fn block_indices(&self) -> &[u32] {
        &self.block_indices[..self.len()]
    }

    /// The entries as validated [`BlockNo`]s.
    ///
    /// A zero entry can only occur if the on-disk header is corrupt
    /// (`log_write` never admits block 0 -- see [`BlockNo`]'s own
    /// invariant), so this is where recovery's "corrupt on-disk log
    /// state" error (spec §7) surfaces.
    fn block_numbers(&self) -> Result<Vec<BlockNo>> {
        self.block_indices()
            .iter()
            .map(|&raw| BlockNo::new(raw).ok_or(Error::CorruptLog("zero block number in log header")))
            .collect()
    }

    fn push(&mut self, block: BlockNo) {
        self.block_indices[self.len()] = block.value();
        self.len += 1;
    }
}

/// Drives one slot's header/body/install sequence against the block
/// cache. Each method here is a single phase; `commit` and
/// `recover_from_log` are the composites `fs::log::Commit` also
/// provides, kept separable so crash-scenario tests can stop partway
/// through.
struct Commit<'a, Device> {
    cache: &'a Cache<Device>,
    start: BlockNo,
    head: &'a mut LogHeader,
}

impl<Device> Commit<'_, Device>
where
    Device: block_io::BlockDevice<BLOCK_SIZE>,
{
    fn recover_from_log(&mut self) -> Result<()> {
        self.read_head()?;
        self.install_trans(true)?;
        self.head.len = 0;
        self.write_head()?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.head.len > 0 {
            self.write_body()?;
            self.write_head()?; // the real commit point
            trace!("journal: committed {} block(s) at slot start {}", self.head.len(), self.start.value());
            self.install_trans(false)?;
            self.head.len = 0;
            self.write_head()?; // erase the transaction from the log
        }
        Ok(())
    }

    fn read_head(&mut self) -> Result<()> {
        let mut bh = self.cache.get(self.start.index());
        let bg = bh.lock().read().map_err(|_| Error::Io(self.start.value()))?;
        self.head.copy_from(bg.data::<LogHeader>());
        Ok(())
    }

    fn write_head(&self) -> Result<()> {
        let mut bh = self.cache.get(self.start.index());
        let mut bg = bh.lock().zeroed();
        bg.data_mut::<LogHeader>().copy_from(self.head);
        bg.write().map_err(|_| Error::Io(self.start.value()))
    }

    fn log_block(&self, tail: usize) -> BlockNo {
        BlockNo::new(self.start.value() + 1 + tail as u32).expect("log body block index computed as zero")
    }

    fn write_body(&self) -> Result<()> {
        for (tail, bn) in self.head.block_numbers()?.into_iter().enumerate() {
            let mut from_bh = self.cache.get(bn.index());
            let from_bg = from_bh.lock().read().map_err(|_| Error::Io(bn.value()))?;
            let log_index = self.log_block(tail);
            let mut to_bh = self.cache.get(log_index.index());
            let mut to_bg = to_bh.lock().set_data(from_bg.bytes());
            to_bg.write().map_err(|_| Error::Io(log_index.value()))?;
        }
        Ok(())
    }

    /// Copies committed blocks from the log body to their home blocks.
    fn install_trans(&self, recovering: bool) -> Result<()> {
        for (tail, bn) in self.head.block_numbers()?.into_iter().enumerate() {
            let log_index = self.log_block(tail);
            let mut from_bh = self.cache.get(log_index.index());
            let from_bg = from_bh.lock().read().map_err(|_| Error::Io(log_index.value()))?;
            let mut to_bh = self.cache.get(bn.index());
            let mut to_bg = to_bh.lock().set_data(from_bg.bytes());
            to_bg.write().map_err(|_| Error::Io(bn.value()))?;
            if !recovering {
                unsafe {
                    to_bg.unpin();
                }
            }
        }
        Ok(())
    }
}

struct LogSlot {
    start: BlockNo,
    #[expect(dead_code, reason = "kept for on-disk geometry parity with the teacher's Log")]
    dev: DeviceNo,
    size: u32,
    state: SpinLock<LogSlotState>,
}

struct LogSlotState {
    outstanding: usize,
    /// `None` while this slot's transaction is sealed and committing;
    /// `committing_seq_nbr` then names the sequence number it sealed
    /// under, so other slots can check install order without the
    /// header itself (which a committing slot's owner is free to
    /// mutate once it has been taken out).
    header: Option<Box<LogHeader>>,
    committing_seq_nbr: Option<u32>,
}

struct PoolState {
    active: usize,
    committing: usize,
    next_seq_nbr: u32,
}

/// A crash-consistent redo log spread across `LOG_COPIES` parallel
/// slots of one device's log partition.
pub struct Journal<Device> {
    cache: Cache<Device>,
    dev: DeviceNo,
    slots: [LogSlot; LOG_COPIES],
    pool: SpinLock<PoolState>,
    /// Notified whenever a slot gains header room or a committing copy
    /// frees up; `begin_op` waits on it.
    room: CondVar,
    /// Notified whenever a slot finishes installing; `wait_for_turn`
    /// waits on it. Kept separate from `room` per the one-condition,
    /// one-`CondVar` rule in `sync`.
    turn: CondVar,
}

impl<Device> Journal<Device>
where
    Device: block_io::BlockDevice<BLOCK_SIZE>,
{
    /// Builds a journal over `device`'s log partition as described by
    /// `sb`, then replays any committed-but-not-installed transaction
    /// left behind by a prior crash.
    ///
    /// # Panics
    ///
    /// Panics if `sb.nlog` cannot be divided evenly into `LOG_COPIES`
    /// slots of at least two blocks (one header, one body block) each.
    pub fn new(device: Device, dev: DeviceNo, sb: &SuperBlock, num_bufs: usize) -> Result<Self> {
        let slot_size = sb.nlog / u32::try_from(LOG_COPIES).unwrap();
        assert!(slot_size >= 2, "log partition too small for LOG_COPIES slots");

        let cache = cache::new(device, num_bufs);
        let slots: [LogSlot; LOG_COPIES] = array::from_fn(|i| {
            let start = BlockNo::new(sb.logstart + i as u32 * slot_size).expect("log region start computed as zero");
            LogSlot {
                start,
                dev,
                size: slot_size,
                state: SpinLock::new(LogSlotState {
                    outstanding: 0,
                    header: Some(Box::new(LogHeader::new())),
                    committing_seq_nbr: None,
                }),
            }
        });

        let journal = Self {
            cache,
            dev,
            slots,
            pool: SpinLock::new(PoolState {
                active: 0,
                committing: 0,
                next_seq_nbr: 0,
            }),
            room: CondVar::new(),
            turn: CondVar::new(),
        };
        journal.recover()?;
        Ok(journal)
    }

    /// The device this journal's log partition lives on.
    pub fn dev(&self) -> DeviceNo {
        self.dev
    }

    /// Replays every slot with a nonzero header length, in ascending
    /// sequence-number order, then clears it.
    ///
    /// The ring-window scheme spec prose describes for a single slot
    /// does not generalize cleanly to picking an install order across
    /// independent slots; a slot's header already carries the sequence
    /// number it committed under; recovery sorts by that instead.
    fn recover(&self) -> Result<()> {
        let mut pending = Vec::new();
        for slot in &self.slots {
            let mut head = LogHeader::new();
            let mut commit = Commit {
                cache: &self.cache,
                start: slot.start,
                head: &mut head,
            };
            commit.read_head()?;
            if head.len > 0 {
                if head.len() > LOG_SIZE {
                    return Err(Error::CorruptLog("log header length exceeds slot capacity"));
                }
                pending.push((slot.start, head));
            }
        }
        pending.sort_by_key(|(_, h)| h.seq_nbr);

        if pending.is_empty() {
            trace!("journal: recovery found no pending transactions");
        }
        for (start, mut head) in pending {
            trace!(
                "journal: recovery installing {} block(s) from slot start {} (seq {})",
                head.len(),
                start.value(),
                head.seq_nbr
            );
            let mut commit = Commit {
                cache: &self.cache,
                start,
                head: &mut head,
            };
            commit.install_trans(true)?;
            head.len = 0;
            commit.write_head()?;
        }
        Ok(())
    }

    /// Starts a transaction, blocking until a slot has both a free
    /// committing "copy" and enough header room for one more op's
    /// worth of blocks.
    pub fn begin_op(&self) -> Transaction<'_, Device> {
        let mut pool = self.pool.lock();
        loop {
            if pool.committing == LOG_COPIES {
                trace!("journal: begin_op stalling, every slot is committing");
                pool = self.room.wait(pool);
                continue;
            }

            let idx = pool.active;
            let slot_capacity = (self.slots[idx].size as usize - 1).min(LOG_SIZE);
            let mut state = self.slots[idx].state.lock();
            let admits = match &state.header {
                None => false,
                Some(header) => {
                    header.len() + (state.outstanding + 1) * MAX_OP_BLOCKS <= slot_capacity
                }
            };
            if !admits {
                drop(state);
                pool.active = (idx + 1) % LOG_COPIES;
                continue;
            }

            state.outstanding += 1;
            drop(state);
            return Transaction {
                journal: self,
                slot: idx,
                ended: false,
            };
        }
    }

    fn end_op(&self, slot_idx: usize) -> Result<()> {
        let mut sealed = None;

        let mut pool = self.pool.lock();
        let mut state = self.slots[slot_idx].state.lock();
        state.outstanding -= 1;
        assert!(state.header.is_some(), "end_op on a slot that is already committing");
        if state.outstanding == 0 {
            let mut header = state.header.take().unwrap();
            header.seq_nbr = pool.next_seq_nbr;
            pool.next_seq_nbr += 1;
            state.committing_seq_nbr = Some(header.seq_nbr);
            pool.committing += 1;
            sealed = Some(header);
        } else {
            // begin_op() may be waiting on this slot's header room.
            self.room.notify();
        }
        drop(state);
        drop(pool);

        let Some(mut header) = sealed else {
            return Ok(());
        };

        // Wait for every slot sealed under a lower sequence number to
        // install first, so recovery's ascending-seq_nbr order always
        // matches commit order even when slots finish out of order.
        self.wait_for_turn(header.seq_nbr);

        let mut commit = Commit {
            cache: &self.cache,
            start: self.slots[slot_idx].start,
            head: &mut header,
        };
        let result = commit.commit();

        let mut pool = self.pool.lock();
        let mut state = self.slots[slot_idx].state.lock();
        state.committing_seq_nbr = None;
        state.header = Some(header);
        pool.committing -= 1;
        drop(state);
        drop(pool);
        // This slot is no longer committing: it may now admit a waiting
        // begin_op, and it may have unblocked another slot's turn.
        self.room.notify();
        self.turn.notify();

        result
    }

    fn wait_for_turn(&self, seq_nbr: u32) {
        let mut pool = self.pool.lock();
        while !self.is_lowest_committing(seq_nbr) {
            pool = self.turn.wait(pool);
        }
    }

    fn is_lowest_committing(&self, seq_nbr: u32) -> bool {
        self.slots.iter().all(|slot| {
            let state = slot.state.lock();
            state.committing_seq_nbr.is_none_or(|other| other >= seq_nbr)
        })
    }
}

/// A handle to an in-progress transaction in one log slot.
///
/// Returned by [`Journal::begin_op`] and consumed by
/// [`Transaction::end_op`]. Carrying the slot index explicitly (rather
/// than reading whichever slot happens to be "active" at `end_op` time)
/// is what makes the multi-slot generalization sound: the pool's active
/// slot can and does move on to a different transaction while an
/// earlier one is still outstanding.
#[must_use = "a transaction must be ended with `end_op`"]
pub struct Transaction<'j, Device> {
    journal: &'j Journal<Device>,
    slot: usize,
    ended: bool,
}

impl<Device> Transaction<'_, Device>
where
    Device: block_io::BlockDevice<BLOCK_SIZE>,
{
    /// Records that `b` has been modified and must be replayed from the
    /// log on commit. Repeated writes to the same block within one
    /// transaction are absorbed into a single log entry.
    ///
    /// # Panics
    ///
    /// Panics if this transaction's slot has already absorbed
    /// `LOG_SIZE` distinct blocks, or more than its own geometry can
    /// hold.
    pub fn log_write(&self, b: &mut cache::BlockGuard<'_, '_, Device, true>) {
        let slot = &self.journal.slots[self.slot];
        let mut state = slot.state.lock();
        let header = state
            .header
            .as_mut()
            .expect("log_write on a slot that is committing");
        assert!(header.len() < LOG_SIZE && header.len() < slot.size as usize - 1);
        assert!(state.outstanding > 0, "log_write outside a transaction");

        let bn = BlockNo::new(b.index() as u32).expect("block 0 is never journaled");
        if !header.block_indices().contains(&bn.value()) {
            unsafe {
                b.pin();
            }
            header.push(bn);
        }
    }

    /// Ends the transaction. Commits this slot's log to disk if this
    /// was the last outstanding operation sharing it.
    pub fn end_op(mut self) -> Result<()> {
        self.ended = true;
        self.journal.end_op(self.slot)
    }
}

impl<Device> Drop for Transaction<'_, Device> {
    fn drop(&mut self) {
        assert!(
            self.ended || std::thread::panicking(),
            "Transaction dropped without calling end_op"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::MemDisk;

    /// 3 slots of 15 blocks each: one header block plus 14 body blocks,
    /// comfortably above `MAX_OP_BLOCKS` so a single transaction is
    /// always admitted and a second concurrent one in the same slot
    /// never is, forcing it to a different slot.
    fn test_sb() -> SuperBlock {
        SuperBlock {
            magic: SuperBlock::FS_MAGIC,
            size: 60,
            nblocks: 10,
            ninodes: 0,
            nlog: 45,
            logstart: 2,
            inodestart: 0,
            bmapstart: 0,
        }
    }

    fn test_journal(disk: MemDisk) -> Journal<MemDisk> {
        Journal::new(disk, DeviceNo::new(1).unwrap(), &test_sb(), 32).unwrap()
    }

    fn log_fill(journal: &Journal<MemDisk>, tx: &Transaction<'_, MemDisk>, index: usize, fill: u8) {
        let mut bh = journal.cache.get(index);
        let mut bg = bh.lock().zeroed();
        bg.bytes_mut().fill(fill);
        tx.log_write(&mut bg);
    }

    #[test]
    fn single_transaction_commit_installs_to_home() {
        let disk = MemDisk::new(60);
        let journal = test_journal(disk.clone());

        let tx = journal.begin_op();
        log_fill(&journal, &tx, 47, 7);
        tx.end_op().unwrap();

        assert_eq!(disk.read_raw(47), [7u8; BLOCK_SIZE]);
        // The header was cleared after commit.
        assert_eq!(disk.read_raw(2)[0..4], [0u8, 0, 0, 0]);
    }

    #[test]
    fn repeated_writes_to_same_block_absorb_into_one_log_entry() {
        let disk = MemDisk::new(60);
        let journal = test_journal(disk.clone());

        let tx = journal.begin_op();
        for fill in [1u8, 2, 3] {
            log_fill(&journal, &tx, 47, fill);
        }
        assert_eq!(
            journal.slots[0].state.lock().header.as_ref().unwrap().len(),
            1,
            "three writes to the same block must absorb into one log entry"
        );
        tx.end_op().unwrap();

        assert_eq!(disk.read_raw(47), [3u8; BLOCK_SIZE]);
    }

    #[test]
    fn concurrent_transactions_land_in_distinct_slots() {
        let disk = MemDisk::new(60);
        let journal = test_journal(disk.clone());

        let tx1 = journal.begin_op();
        let tx2 = journal.begin_op();
        assert_ne!(tx1.slot, tx2.slot, "a second outstanding op must move to another slot");

        log_fill(&journal, &tx1, 47, 1);
        log_fill(&journal, &tx2, 48, 2);
        tx1.end_op().unwrap();
        tx2.end_op().unwrap();

        assert_eq!(disk.read_raw(47), [1u8; BLOCK_SIZE]);
        assert_eq!(disk.read_raw(48), [2u8; BLOCK_SIZE]);
    }

    #[test]
    fn is_lowest_committing_respects_seq_nbr_not_slot_index() {
        let disk = MemDisk::new(60);
        let journal = test_journal(disk.clone());

        // Slot 0 sealed under a higher sequence number than slot 1 --
        // e.g. slot 1's transaction happened to finish sealing second
        // but would finish its (possibly slower) commit I/O first.
        journal.slots[0].state.lock().committing_seq_nbr = Some(5);
        journal.slots[1].state.lock().committing_seq_nbr = Some(3);

        assert!(
            !journal.is_lowest_committing(5),
            "a higher sequence number must wait for a lower one still committing"
        );
        assert!(
            journal.is_lowest_committing(3),
            "the lowest in-flight sequence number may proceed"
        );
    }

    #[test]
    fn recovery_installs_a_committed_but_not_installed_transaction() {
        let disk = MemDisk::new(60);

        {
            let journal = test_journal(disk.clone());
            let tx = journal.begin_op();
            log_fill(&journal, &tx, 47, 9);

            // Seal the transaction and write its body and header, but
            // stop short of installing to home -- the crash point
            // between the teacher's "real commit" and the install that
            // follows it.
            let slot = tx.slot;
            let mut state = journal.slots[slot].state.lock();
            let mut header = state.header.take().unwrap();
            header.seq_nbr = 0;
            drop(state);

            let mut commit = Commit {
                cache: &journal.cache,
                start: journal.slots[slot].start,
                head: &mut header,
            };
            commit.write_body().unwrap();
            commit.write_head().unwrap();

            // This transaction never really ends; dropping it normally
            // would trip the missing-`end_op` assertion.
            std::mem::forget(tx);
        }
        assert_ne!(disk.read_raw(47), [9u8; BLOCK_SIZE]);

        // Reopening the journal over the same disk replays the log.
        let _journal2 = test_journal(disk.clone());
        assert_eq!(disk.read_raw(47), [9u8; BLOCK_SIZE]);
    }

    #[test]
    fn recovery_with_no_pending_transactions_is_a_no_op() {
        let disk = MemDisk::new(60);
        let _journal = test_journal(disk.clone());
        // `Journal::new` running recovery over a freshly-formatted disk
        // must not panic or install anything.
        assert_eq!(disk.read_raw(47), [0u8; BLOCK_SIZE]);
    }

    #[test]
    fn recovery_reinstalls_idempotently_after_a_crash_mid_install() {
        // Crash point between `install_trans` finishing and the final
        // `write_head(n=0)` that clears the slot (spec scenario 5):
        // the header is still on disk with its blocks, and the home
        // location already holds the new value. Recovery must install
        // again without corrupting anything and then clear the header.
        let disk = MemDisk::new(60);

        {
            let journal = test_journal(disk.clone());
            let tx = journal.begin_op();
            log_fill(&journal, &tx, 47, 9);

            let slot = tx.slot;
            let mut state = journal.slots[slot].state.lock();
            let mut header = state.header.take().unwrap();
            header.seq_nbr = 0;
            drop(state);

            let mut commit = Commit {
                cache: &journal.cache,
                start: journal.slots[slot].start,
                head: &mut header,
            };
            commit.write_body().unwrap();
            commit.write_head().unwrap();
            commit.install_trans(true).unwrap();

            std::mem::forget(tx);
        }
        assert_eq!(disk.read_raw(47), [9u8; BLOCK_SIZE]);

        let _journal2 = test_journal(disk.clone());
        assert_eq!(disk.read_raw(47), [9u8; BLOCK_SIZE]);
        // Reopening drained the header: a third boot replays nothing.
        assert_eq!(disk.read_raw(2)[0..4], [0u8, 0, 0, 0]);
    }

    #[test]
    fn begin_op_blocks_while_every_slot_is_committing_then_admits() {
        // Spec scenario 3, generalized to this crate's fixed
        // `LOG_COPIES`: once every slot has sealed (copies_committed ==
        // LOG_COPIES), a new `begin_op` must block rather than spin,
        // and must be admitted as soon as any slot finishes.
        let disk = MemDisk::new(60);
        let journal = std::sync::Arc::new(test_journal(disk));

        for slot in &journal.slots {
            let mut state = slot.state.lock();
            state.header = None;
            state.committing_seq_nbr = Some(0);
        }
        journal.pool.lock().committing = LOG_COPIES;

        let journal2 = std::sync::Arc::clone(&journal);
        let handle = std::thread::spawn(move || {
            let tx = journal2.begin_op();
            tx.end_op().unwrap();
        });

        std::thread::sleep(std::time::Duration::from_millis(30));
        assert!(!handle.is_finished(), "begin_op must block while every slot is committing");

        // Free slot 0 the way `end_op` does after a successful commit.
        let mut pool = journal.pool.lock();
        let mut state = journal.slots[0].state.lock();
        state.committing_seq_nbr = None;
        state.header = Some(Box::new(LogHeader::new()));
        pool.committing -= 1;
        drop(state);
        drop(pool);
        journal.room.notify();

        handle.join().unwrap();
    }

    #[test]
    fn commit_io_failure_is_surfaced_and_leaves_slot_reusable() {
        // A real disk write failure during commit (as opposed to the
        // crash-injection scenarios above, which stop a commit by hand)
        // must come back out of `end_op` as `Error::Io`, and the slot it
        // failed in must be left in a state a later transaction can
        // still use -- not wedged mid-commit.
        let disk = MemDisk::new(60);
        let journal = test_journal(disk.clone());

        let tx = journal.begin_op();
        log_fill(&journal, &tx, 47, 9);

        // Slot 0's body region starts right after its header block
        // (logstart=2), so block 3 is the first body write `commit`
        // issues for this transaction.
        disk.fail_next_write_to(3);
        let err = tx.end_op().unwrap_err();
        assert!(matches!(err, Error::Io(3)), "got {err:?}");

        // Nothing reached disk: the failure happened before the real
        // commit point (`write_head`), so home and header are untouched.
        assert_eq!(disk.read_raw(47), [0u8; BLOCK_SIZE]);
        assert_eq!(disk.read_raw(2)[0..4], [0u8, 0, 0, 0]);

        {
            let state = journal.slots[0].state.lock();
            assert!(
                state.committing_seq_nbr.is_none(),
                "a failed commit must still clear committing_seq_nbr"
            );
            assert!(state.header.is_some(), "a failed commit must still return the header for reuse");
        }
        assert_eq!(journal.pool.lock().committing, 0);

        // The slot admits and commits a fresh transaction normally.
        let tx2 = journal.begin_op();
        log_fill(&journal, &tx2, 48, 5);
        tx2.end_op().unwrap();
        assert_eq!(disk.read_raw(48), [5u8; BLOCK_SIZE]);
    }

    #[test]
    fn admission_cap_keeps_header_len_plus_outstanding_bound_within_slot_capacity() {
        // Property P2: after admission, header.n + outstanding *
        // MAX_OP_BLOCKS must never exceed the slot's capacity. Each
        // slot here only has room for one `MAX_OP_BLOCKS`-sized op at a
        // time, so one transaction per slot is the most `begin_op` can
        // admit before every slot is occupied.
        let disk = MemDisk::new(60);
        let journal = test_journal(disk);

        let mut txs = Vec::new();
        for _ in 0..LOG_COPIES {
            let tx = journal.begin_op();
            let slot_capacity = (journal.slots[tx.slot].size as usize - 1).min(LOG_SIZE);
            let state = journal.slots[tx.slot].state.lock();
            let header_len = state.header.as_ref().unwrap().len();
            let outstanding = state.outstanding;
            drop(state);
            assert!(
                header_len + outstanding * MAX_OP_BLOCKS <= slot_capacity,
                "admission must keep the slot within its bound"
            );
            txs.push(tx);
        }
        for tx in txs {
            tx.end_op().unwrap();
        }
    }
}
