//! Error types for wire-level parsing.
//!
//! These are the only errors `qram-proto` can produce. They cover malformed
//! bytes arriving from the channel, never semantic protocol decisions (those
//! belong to `qram-core`, which absorbs most of them per the codec's
//! propagation policy).

use thiserror::Error;

/// Errors returned while parsing packet bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtoError {
    /// Fewer than [`crate::header::PacketHeader::SIZE`] bytes were supplied.
    #[error("packet too short: expected at least {expected} bytes, got {actual}")]
    PacketTooShort {
        /// Minimum required length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// The header declares a payload of zero bytes, which would make the
    /// block size zero. Invariant: `block_size >= 1`.
    #[error("empty block: packet declares a zero-byte payload")]
    EmptyBlock,
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, ProtoError>;
