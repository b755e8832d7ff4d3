//! Error types shared by the journal and pipe subsystems.

/// Errors a caller can observe from the transaction API, recovery, or the
/// pipe.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reader (for a write) or the writer (for a read) has gone away.
    #[error("peer endpoint closed")]
    PeerClosed,

    /// The calling task was asked to terminate while blocked.
    #[error("task killed while blocked")]
    Killed,

    /// The on-disk log is inconsistent in a way recovery cannot repair.
    ///
    /// The only correct response is to refuse to boot; recovery does not
    /// attempt a partial rescue.
    #[error("corrupt on-disk log state: {0}")]
    CorruptLog(&'static str),

    /// A block device I/O failed, at the given block index.
    #[error("block device I/O error on block {0}")]
    Io(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
