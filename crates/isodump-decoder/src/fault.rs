/// Why a record could not continue decoding.
#[derive(Debug, thiserror::Error)]
pub enum FaultReason {
    /// The bytes at a record start decoded cleanly but are not a
    /// message type indicator. This is the usual symptom of the cursor
    /// landing in the middle of a corrupt region.
    #[error("implausible MTI {0:?}")]
    ImplausibleMti(String),

    /// The bitmap declared a field whose body length is known to
    /// neither the registry nor the active specification, so the
    /// cursor cannot advance past it.
    #[error("no declared length for field {0}")]
    UnknownFieldLength(u8),
}

/// A transient per-record decode fault.
///
/// Not part of any output record — a fault is raised inside the binary
/// decoder, consumed immediately by the resynchronizer, and surfaces
/// to the caller only as a skipped-range diagnostic.
#[derive(Debug, thiserror::Error)]
#[error("record fault at offset {position}: {reason}")]
pub struct DecodeFault {
    /// Byte offset where decoding could not continue.
    pub position: usize,
    pub reason: FaultReason,
}

impl DecodeFault {
    #[must_use]
    pub fn new(position: usize, reason: FaultReason) -> Self {
        DecodeFault { position, reason }
    }
}
