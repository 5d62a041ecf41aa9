//! Optional gzip envelope, applied to the payload before fountain encoding.
//!
//! ```text
//! 0..5   magic  = ASCII "QRAMC"
//! 5      algo   = 1 (gzip)
//! 6..10  orig_len u32 BE
//! 10..   gzip-compressed bytes
//! ```
//!
//! Compression is skipped whenever it would not pay for itself: small
//! payloads, and payloads that do not compress well, are carried raw so the
//! fountain encoder never pays the envelope tax for nothing.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::{CodecError, Result};

const MAGIC: &[u8; 5] = b"QRAMC";
const ALGO_GZIP: u8 = 1;
const HEADER_LEN: usize = 10;

/// Below this length gzip is never attempted — the envelope overhead alone
/// would exceed any plausible saving.
const MIN_CANDIDATE_LEN: usize = 50;

/// Wrap `payload` in a gzip envelope if doing so is worthwhile.
///
/// Returns the bytes to actually send and whether they are compressed. The
/// envelope is kept only if it shrinks the payload by at least 50 bytes and
/// to no more than 95% of the original size; otherwise the raw payload is
/// returned unchanged.
#[must_use]
pub fn maybe_compress(payload: &[u8]) -> (Vec<u8>, bool) {
    if payload.len() < MIN_CANDIDATE_LEN {
        return (payload.to_vec(), false);
    }

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    if encoder.write_all(payload).is_err() {
        return (payload.to_vec(), false);
    }
    let Ok(compressed) = encoder.finish() else {
        return (payload.to_vec(), false);
    };

    let envelope_size = HEADER_LEN + compressed.len();
    let len = payload.len();
    let shrinks_enough = (envelope_size as f64) / (len as f64) <= 0.95;
    let saves_enough = len.saturating_sub(envelope_size) >= MIN_CANDIDATE_LEN;

    if !shrinks_enough || !saves_enough {
        return (payload.to_vec(), false);
    }

    // INVARIANT: len is a payload length carried by the orig_len wire field
    // elsewhere (the packet header), which is itself u32, so it always fits.
    #[allow(clippy::expect_used)]
    let orig_len = u32::try_from(len).expect("invariant: payload length fits in u32");
    let mut envelope = Vec::with_capacity(envelope_size);
    envelope.extend_from_slice(MAGIC);
    envelope.push(ALGO_GZIP);
    envelope.extend_from_slice(&orig_len.to_be_bytes());
    envelope.extend_from_slice(&compressed);
    (envelope, true)
}

/// Undo [`maybe_compress`]. If `bytes` does not carry the `QRAMC` magic it is
/// returned unchanged.
///
/// # Errors
///
/// Returns [`CodecError::UnknownAlgorithm`] if the envelope's algorithm byte
/// is not the gzip tag. A decompressed-length mismatch against the envelope's
/// declared `orig_len` is logged and tolerated rather than treated as an
/// error, to survive padding discrepancies introduced upstream.
pub fn maybe_decompress(bytes: &[u8]) -> Result<(Vec<u8>, bool)> {
    if bytes.len() < HEADER_LEN || &bytes[0..5] != MAGIC {
        return Ok((bytes.to_vec(), false));
    }

    let algo = bytes[5];
    if algo != ALGO_GZIP {
        return Err(CodecError::UnknownAlgorithm { algo });
    }

    let orig_len = u32::from_be_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);

    let mut decoder = GzDecoder::new(&bytes[HEADER_LEN..]);
    let mut decompressed = Vec::new();
    if decoder.read_to_end(&mut decompressed).is_err() {
        tracing::warn!("QRAMC envelope failed to inflate; returning raw bytes");
        return Ok((bytes.to_vec(), false));
    }

    if decompressed.len() as u64 != u64::from(orig_len) {
        tracing::warn!(
            declared = orig_len,
            actual = decompressed.len(),
            "decompressed length does not match QRAMC envelope's declared orig_len"
        );
    }

    Ok((decompressed, true))
}
