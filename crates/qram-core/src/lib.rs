//! LT fountain codec core: block store, encoder, decoder, and the two
//! optional byte-to-byte envelopes (gzip, filename) that wrap the payload
//! before it reaches the encoder.
//!
//! # Pipeline
//!
//! ```text
//! send:    payload -> [file envelope] -> [compression envelope] -> LtEncoder -> packets
//! receive: packets -> LtDecoder -> [compression envelope] -> [file envelope] -> payload
//! ```
//!
//! Everything here is synchronous and single-threaded cooperative (§5 of the
//! protocol spec): `next_packet`, `push_packet`, and `get_result` run to
//! completion before returning, and the host must not call two operations on
//! the same encoder or decoder concurrently. Distinct instances are fully
//! independent.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod blocks;
pub mod compression;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod file_envelope;

pub use blocks::{RecoveredBlocks, SourceBlocks};
pub use decoder::LtDecoder;
pub use encoder::LtEncoder;
pub use error::{CodecError, Result};
