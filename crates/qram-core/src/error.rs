//! Error types for the codec core.
//!
//! Per the protocol's propagation policy, most channel anomalies (malformed
//! packets, redundant packets, session switches, pushes after completion) are
//! absorbed silently and never reach this type. Only envelope-level semantic
//! errors surface to the caller.

use thiserror::Error;

/// Errors surfaced by `qram-core`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The compression envelope's algorithm byte is not recognized.
    ///
    /// The only defined algorithm today is gzip (`1`). The caller decides
    /// whether to discard the transfer or attempt a fallback.
    #[error("unknown compression algorithm: {algo}")]
    UnknownAlgorithm {
        /// The unrecognized algorithm byte.
        algo: u8,
    },

    /// The caller asked for a strict file-envelope decode
    /// ([`crate::file_envelope::unwrap_file_strict`]) and the bytes carry the
    /// `QRAMF` magic but are truncated before the declared filename ends.
    ///
    /// The default, non-strict API ([`crate::file_envelope::unwrap_file`])
    /// never returns this: it treats the same situation as "not a file
    /// envelope" and returns `None`.
    #[error("truncated file envelope: name_len={name_len} but only {available} bytes follow")]
    InvalidFileEnvelope {
        /// The filename length the envelope declared.
        name_len: u16,
        /// The bytes actually available after the length field.
        available: usize,
    },
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, CodecError>;
