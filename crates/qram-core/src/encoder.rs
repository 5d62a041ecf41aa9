//! LT encoder: produces the next packet given a monotonic sequence number.

use qram_proto::{Packet, PacketHeader, RobustSoliton, derive_neighbors};

use crate::blocks::SourceBlocks;

/// Encodes a payload into an unbounded stream of self-describing LT packets.
///
/// Pure given `(data, run_id, seq_num)`: the same `seq_num` always derives
/// the same neighbor set and therefore the same packet bytes.
#[derive(Debug, Clone)]
pub struct LtEncoder {
    blocks: SourceBlocks,
    distribution: RobustSoliton,
    run_id: u32,
    seq_num: u32,
}

impl LtEncoder {
    /// Construct an encoder over `data`, splitting it into `block_size`-byte
    /// blocks and tagging every emitted packet with `run_id`.
    #[must_use]
    pub fn new(data: &[u8], block_size: u32, run_id: u32) -> Self {
        let blocks = SourceBlocks::new(data, block_size);
        let distribution = RobustSoliton::new(blocks.k());
        Self { blocks, distribution, run_id, seq_num: 0 }
    }

    /// Number of source blocks (`k`).
    #[must_use]
    pub fn block_count(&self) -> u32 {
        self.blocks.k()
    }

    /// Block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> u32 {
        self.blocks.block_size()
    }

    /// Payload length before zero-padding.
    #[must_use]
    pub fn original_len(&self) -> u32 {
        self.blocks.orig_len()
    }

    /// Produce the next packet in the stream. Never fails.
    ///
    /// Samples a degree and neighbor set from `(run_id, seq_num)`, XORs the
    /// chosen blocks together, and prepends the header. The internal
    /// sequence counter then advances.
    #[must_use]
    pub fn next_packet(&mut self) -> Vec<u8> {
        let seq_num = self.seq_num;
        self.seq_num = self.seq_num.wrapping_add(1);

        let k = self.blocks.k();
        let neighbors = derive_neighbors(self.run_id, seq_num, k, &self.distribution);

        let mut payload = vec![0u8; self.blocks.block_size() as usize];
        for &idx in &neighbors {
            for (dst, src) in payload.iter_mut().zip(self.blocks.block(idx)) {
                *dst ^= src;
            }
        }

        let header = PacketHeader::new(self.run_id, k, self.blocks.orig_len(), seq_num);
        Packet::new(header, payload).to_bytes()
    }
}
