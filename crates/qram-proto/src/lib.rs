//! Wire format and pure math for the QRAM fountain codec.
//!
//! This crate has no notion of a "session": it only knows how to turn
//! `(run_id, seq_num, k)` into a reproducible degree and neighbor set, and how
//! to serialize the 16-byte packet header that carries those values over the
//! optical channel. Stateful decoding lives in `qram-core`.
//!
//! # Wire compatibility
//!
//! The PRNG algorithm ([`rng::Xorshift64`]), the Robust Soliton parameters
//! (`c = 0.03`, `δ = 0.05`, see [`distribution::RobustSoliton`]), and the
//! neighbor-sampling procedure ([`neighbors::sample_neighbors`]) are a
//! bit-level interoperability contract: any two implementations that agree on
//! these three things will derive identical neighbor sets for identical
//! `(run_id, seq_num, k)`. Changing any of them is a protocol break.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod distribution;
pub mod errors;
pub mod header;
pub mod neighbors;
pub mod packet;
pub mod rng;

pub use distribution::RobustSoliton;
pub use errors::{ProtoError, Result};
pub use header::PacketHeader;
pub use neighbors::sample_neighbors;
pub use packet::Packet;
pub use rng::Xorshift64;

/// Derive the PRNG seed for a given packet from its session and sequence
/// identity.
///
/// Folds `run_id` into the high 32 bits and `seq_num` into the low 32 bits,
/// falling back to a fixed nonzero seed when both are zero (the PRNG state
/// must never be zero, see [`rng::Xorshift64`]).
#[must_use]
pub fn packet_seed(run_id: u32, seq_num: u32) -> u64 {
    let folded = (u64::from(run_id) << 32) | u64::from(seq_num);
    if folded == 0 { 0x9E37_79B9_7F4A_7C15 } else { folded }
}

/// Derive the degree and neighbor set for `(run_id, seq_num)` against `k`
/// source blocks.
///
/// This is the single function both the encoder and the decoder must call so
/// that they always agree on a packet's neighbor set (§9 "pseudo-random
/// determinism is a wire contract").
#[must_use]
pub fn derive_neighbors(run_id: u32, seq_num: u32, k: u32, dist: &RobustSoliton) -> Vec<u32> {
    let mut rng = Xorshift64::new(packet_seed(run_id, seq_num));
    let degree = dist.sample(&mut rng);
    sample_neighbors(&mut rng, degree, k)
}
