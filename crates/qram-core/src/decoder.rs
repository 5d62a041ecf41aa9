//! LT decoder: belief-propagation decoding over an unbounded, unordered,
//! duplicate-tolerant packet stream.

use std::collections::{HashMap, HashSet, VecDeque};

use qram_proto::{Packet, RobustSoliton, derive_neighbors};

use crate::blocks::RecoveredBlocks;

/// A packet whose neighbor set has not yet collapsed to a single unknown
/// block. Invariant: `neighbors.len() >= 2` at all times while stored here.
#[derive(Debug, Clone)]
struct UnresolvedPacket {
    neighbors: HashSet<u32>,
    data: Vec<u8>,
}

/// State scoped to one session (`run_id`). Rebuilt from scratch whenever the
/// decoder observes a new `run_id`.
#[derive(Debug)]
struct Session {
    run_id: u32,
    k: u32,
    distribution: RobustSoliton,
    recovered: RecoveredBlocks,
    /// Packets are owned here by a stable slot index; consumed slots become
    /// `None` rather than being removed, so existing `index` entries (which
    /// reference slots by position) never dangle.
    arena: Vec<Option<UnresolvedPacket>>,
    /// For each still-unknown block, the slots of `arena` whose neighbor set
    /// contains it. Purely navigational: packets are owned by `arena`.
    index: HashMap<u32, HashSet<usize>>,
}

impl Session {
    fn new(run_id: u32, k: u32, block_size: u32) -> Self {
        Self {
            run_id,
            k,
            distribution: RobustSoliton::new(k),
            recovered: RecoveredBlocks::new(k, block_size),
            arena: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn ingest(&mut self, seq_num: u32, payload: Vec<u8>) -> bool {
        let neighbors = derive_neighbors(self.run_id, seq_num, self.k, &self.distribution);
        self.ingest_with_neighbors(&neighbors, payload)
    }

    /// Core of [`Self::ingest`], factored out so the neighbor set can be
    /// supplied directly in tests without depending on which seq_num the
    /// shared distribution happens to map to which neighbors.
    fn ingest_with_neighbors(&mut self, neighbors: &[u32], mut payload: Vec<u8>) -> bool {
        let mut remaining: HashSet<u32> = HashSet::with_capacity(neighbors.len());
        for &idx in neighbors {
            if self.recovered.is_decoded(idx) {
                xor_into(&mut payload, self.recovered.get(idx));
            } else {
                remaining.insert(idx);
            }
        }

        match remaining.len() {
            0 => {
                tracing::trace!(run_id = self.run_id, seq_num, "dropping redundant packet");
            }
            1 => {
                #[allow(clippy::unwrap_used)]
                let j = *remaining.iter().next().unwrap();
                self.resolve(j, payload);
            }
            _ => {
                let slot = self.arena.len();
                for &idx in &remaining {
                    self.index.entry(idx).or_default().insert(slot);
                }
                self.arena.push(Some(UnresolvedPacket { neighbors: remaining, data: payload }));
            }
        }

        self.recovered.is_complete()
    }

    /// Belief-propagation cascade, iterative via a work queue (never
    /// recursion, to bound stack use for large `k`).
    fn resolve(&mut self, block: u32, data: Vec<u8>) {
        let mut queue = VecDeque::new();
        queue.push_back((block, data));

        while let Some((j, data)) = queue.pop_front() {
            if self.recovered.is_decoded(j) {
                continue;
            }
            self.recovered.set(j, data.clone());
            tracing::trace!(run_id = self.run_id, block = j, "block resolved");

            let Some(slots) = self.index.remove(&j) else { continue };
            for slot in slots {
                let Some(pkt) = self.arena[slot].as_mut() else { continue };
                xor_into(&mut pkt.data, &data);
                pkt.neighbors.remove(&j);

                if pkt.neighbors.len() == 1 {
                    #[allow(clippy::unwrap_used)]
                    let j2 = *pkt.neighbors.iter().next().unwrap();
                    #[allow(clippy::unwrap_used)]
                    let resolved = self.arena[slot].take().unwrap();
                    if let Some(set2) = self.index.get_mut(&j2) {
                        set2.remove(&slot);
                        if set2.is_empty() {
                            self.index.remove(&j2);
                        }
                    }
                    queue.push_back((j2, resolved.data));
                }
            }
        }
    }
}

fn xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// Decodes LT packets from an unordered, duplicate-tolerant stream back into
/// the original payload.
#[derive(Debug)]
pub struct LtDecoder {
    hint_k: u32,
    hint_block_size: u32,
    session: Option<Session>,
}

impl LtDecoder {
    /// Construct a decoder with a sizing hint. The hint only backs
    /// [`Self::block_count`] and [`Self::decoded_count`] before any packet
    /// arrives; the real session anchors (`run_id`, `k`, `block_size`,
    /// `orig_len`) are taken from the first received packet, and reset again
    /// whenever `run_id` changes.
    #[must_use]
    pub fn new(k: u32, block_size: u32, _run_id: u32) -> Self {
        Self { hint_k: k, hint_block_size: block_size, session: None }
    }

    /// Number of source blocks for the current session (or the constructor
    /// hint if no packet has arrived yet).
    #[must_use]
    pub fn block_count(&self) -> u32 {
        self.session.as_ref().map_or(self.hint_k, |s| s.k)
    }

    /// Number of blocks recovered so far.
    #[must_use]
    pub fn decoded_count(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.recovered.decoded_count())
    }

    /// Whether the current session has recovered every block.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.recovered.is_complete())
    }

    /// Ingest one packet. Returns `true` iff the session is now complete.
    ///
    /// Malformed packets (too short, or a header/payload pair implying a
    /// zero-byte block) are dropped silently. A `run_id` different from the
    /// current session discards all prior state and starts fresh from this
    /// packet's header. Pushes after completion are idempotent no-ops.
    pub fn push_packet(&mut self, bytes: &[u8]) -> bool {
        let packet = match Packet::decode(bytes) {
            Ok(packet) => packet,
            Err(_err) => {
                tracing::trace!("dropping malformed packet");
                return self.is_done();
            }
        };

        let header = packet.header;
        let is_new_session = match &self.session {
            None => true,
            Some(s) => s.run_id != header.run_id(),
        };

        if is_new_session {
            tracing::debug!(run_id = header.run_id(), k = header.k(), "starting new session");
            self.session =
                Some(Session::new(header.run_id(), header.k(), packet.block_size() as u32));
        }

        #[allow(clippy::unwrap_used)]
        let session = self.session.as_mut().unwrap();

        if session.recovered.is_complete() {
            return true;
        }

        session.ingest(header.seq_num(), packet.payload.to_vec())
    }

    /// Return the reconstructed payload, trimmed to `orig_len`, or an empty
    /// vector if decoding is not yet complete.
    #[must_use]
    pub fn get_result(&self, orig_len: u32) -> Vec<u8> {
        let Some(session) = &self.session else { return Vec::new() };
        if !session.recovered.is_complete() {
            return Vec::new();
        }
        let mut buf = session.recovered.concat();
        buf.truncate(orig_len as usize);
        buf
    }
}
