//! Source-block and recovered-block storage.
//!
//! [`SourceBlocks`] is the encoder's immutable, zero-padded view of the
//! payload. [`RecoveredBlocks`] is the decoder's write-once block store: each
//! slot is written exactly once, and once `decoded[i]` is true the slot is
//! frozen.

/// The encoder's padded source-block array.
///
/// `k = ceil(orig_len / block_size)` blocks, each `block_size` bytes, built
/// once from the payload and never mutated afterward.
#[derive(Debug, Clone)]
pub struct SourceBlocks {
    data: Vec<u8>,
    block_size: u32,
    k: u32,
    orig_len: u32,
}

impl SourceBlocks {
    /// Pad `data` to a multiple of `block_size` and split it into `k` blocks.
    ///
    /// # Panics
    ///
    /// Panics if `data` is empty or `block_size` is zero — both are
    /// preconditions of the encoder boundary, not channel-facing inputs.
    #[must_use]
    pub fn new(data: &[u8], block_size: u32) -> Self {
        assert!(!data.is_empty(), "payload must be at least 1 byte");
        assert!(block_size > 0, "block_size must be at least 1");

        // INVARIANT: payload length fits in u32 because the wire header's
        // orig_len field is itself u32 — callers cannot encode anything
        // larger over this protocol.
        #[allow(clippy::expect_used)]
        let orig_len = u32::try_from(data.len()).expect("invariant: payload length fits in u32");
        let bs = block_size as usize;
        let k = data.len().div_ceil(bs);

        let mut padded = data.to_vec();
        padded.resize(k * bs, 0);

        // INVARIANT: k = ceil(orig_len / block_size) with orig_len bounded by
        // u32, so k itself never exceeds u32::MAX.
        #[allow(clippy::expect_used)]
        let k = u32::try_from(k).expect("invariant: k fits in u32");

        Self { data: padded, block_size, k, orig_len }
    }

    /// Number of source blocks.
    #[must_use]
    pub fn k(&self) -> u32 {
        self.k
    }

    /// Block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Original payload length before padding.
    #[must_use]
    pub fn orig_len(&self) -> u32 {
        self.orig_len
    }

    /// Borrow block `i`. Panics if `i >= k()`.
    #[must_use]
    pub fn block(&self, i: u32) -> &[u8] {
        let bs = self.block_size as usize;
        let start = (i as usize) * bs;
        &self.data[start..start + bs]
    }
}

/// The decoder's write-once recovered-block array.
#[derive(Debug, Clone)]
pub struct RecoveredBlocks {
    blocks: Vec<Vec<u8>>,
    decoded: Vec<bool>,
    decoded_count: u32,
    k: u32,
    block_size: u32,
}

impl RecoveredBlocks {
    /// Allocate `k` empty slots of `block_size` bytes each.
    #[must_use]
    pub fn new(k: u32, block_size: u32) -> Self {
        Self {
            blocks: vec![vec![0u8; block_size as usize]; k as usize],
            decoded: vec![false; k as usize],
            decoded_count: 0,
            k,
            block_size,
        }
    }

    /// Number of blocks this session expects.
    #[must_use]
    pub fn k(&self) -> u32 {
        self.k
    }

    /// Block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Number of blocks recovered so far.
    #[must_use]
    pub fn decoded_count(&self) -> u32 {
        self.decoded_count
    }

    /// Whether every block has been recovered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.decoded_count == self.k
    }

    /// Whether block `i` has already been written.
    #[must_use]
    pub fn is_decoded(&self, i: u32) -> bool {
        self.decoded[i as usize]
    }

    /// Borrow the contents of block `i`. Contents are meaningless if
    /// [`Self::is_decoded`] returns `false`.
    #[must_use]
    pub fn get(&self, i: u32) -> &[u8] {
        &self.blocks[i as usize]
    }

    /// Write block `i` once. Returns `true` if this call performed the
    /// write, `false` if the slot was already frozen (already decoded).
    pub fn set(&mut self, i: u32, data: Vec<u8>) -> bool {
        let idx = i as usize;
        if self.decoded[idx] {
            return false;
        }
        debug_assert_eq!(data.len(), self.block_size as usize);
        self.blocks[idx] = data;
        self.decoded[idx] = true;
        self.decoded_count += 1;
        true
    }

    /// Concatenate all blocks in order. Only meaningful once
    /// [`Self::is_complete`] is true; the caller trims to `orig_len`.
    #[must_use]
    pub fn concat(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.k as usize) * (self.block_size as usize));
        for block in &self.blocks {
            out.extend_from_slice(block);
        }
        out
    }
}
