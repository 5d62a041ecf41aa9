//! Optional filename envelope, applied before the compression envelope.
//!
//! ```text
//! 0..5   magic    = ASCII "QRAMF"
//! 5..7   name_len u16 BE
//! 7..    UTF-8 filename (name_len bytes)
//!        file bytes
//! ```

use crate::error::{CodecError, Result};

const MAGIC: &[u8; 5] = b"QRAMF";
const HEADER_LEN: usize = 7;

/// Wrap `data` with `name` so the receiver can recover the original filename.
///
/// # Panics
///
/// Panics if `name`'s UTF-8 byte length exceeds `u16::MAX` — the wire format
/// cannot express a longer name.
#[must_use]
pub fn wrap_file(name: &str, data: &[u8]) -> Vec<u8> {
    let name_bytes = name.as_bytes();
    // INVARIANT: callers only pass file names, never arbitrary payloads;
    // the documented panic above is the contract for the rare caller that
    // violates it.
    #[allow(clippy::expect_used)]
    let name_len = u16::try_from(name_bytes.len()).expect("invariant: file name fits in 65535 bytes");

    let mut out = Vec::with_capacity(HEADER_LEN + name_bytes.len() + data.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&name_len.to_be_bytes());
    out.extend_from_slice(name_bytes);
    out.extend_from_slice(data);
    out
}

/// Undo [`wrap_file`]. Returns `None` if `bytes` does not carry the `QRAMF`
/// magic, is truncated, or the filename is not valid UTF-8 — any of these
/// is treated as "not a file envelope" rather than an error.
#[must_use]
pub fn unwrap_file(bytes: &[u8]) -> Option<(String, Vec<u8>)> {
    unwrap_file_strict(bytes).ok()
}

/// Strict variant of [`unwrap_file`] for callers that want to distinguish
/// "not a file envelope" from "truncated file envelope".
///
/// # Errors
///
/// Returns [`CodecError::InvalidFileEnvelope`] if the `QRAMF` magic is
/// present but the declared `name_len` runs past the end of `bytes`, or the
/// name bytes are not valid UTF-8.
pub fn unwrap_file_strict(bytes: &[u8]) -> Result<(String, Vec<u8>)> {
    if bytes.len() < HEADER_LEN || &bytes[0..5] != MAGIC {
        return Err(CodecError::InvalidFileEnvelope { name_len: 0, available: bytes.len() });
    }

    let name_len = u16::from_be_bytes([bytes[5], bytes[6]]);
    let name_end = HEADER_LEN + name_len as usize;

    if bytes.len() < name_end {
        return Err(CodecError::InvalidFileEnvelope {
            name_len,
            available: bytes.len() - HEADER_LEN,
        });
    }

    let name = std::str::from_utf8(&bytes[HEADER_LEN..name_end])
        .map_err(|_| CodecError::InvalidFileEnvelope {
            name_len,
            available: bytes.len() - HEADER_LEN,
        })?
        .to_owned();

    Ok((name, bytes[name_end..].to_vec()))
}
