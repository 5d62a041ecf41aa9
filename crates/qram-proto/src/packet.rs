//! Complete wire packet: header plus the XOR payload.
//!
//! Layout: `[PacketHeader: 16 bytes] + [payload: block_size bytes]`. Unlike
//! some framing formats, the payload length is not itself encoded in the
//! header — it is implicit as `len(packet) - 16`, which is why every packet
//! of a session must carry the same payload length (`block_size`).

use bytes::{Bytes, BytesMut};

use crate::{
    errors::{ProtoError, Result},
    header::PacketHeader,
};

/// A decoded or about-to-be-encoded wire packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// The 16-byte packet header.
    pub header: PacketHeader,
    /// The XOR payload, exactly `block_size` bytes.
    pub payload: Bytes,
}

impl Packet {
    /// Build a packet from a header and payload bytes.
    #[must_use]
    pub fn new(header: PacketHeader, payload: impl Into<Bytes>) -> Self {
        Self { header, payload: payload.into() }
    }

    /// The payload length, i.e. `block_size` for this packet.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.payload.len()
    }

    /// Serialize the packet to its wire representation.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(PacketHeader::SIZE + self.payload.len());
        buf.extend_from_slice(&self.header.to_bytes());
        buf.extend_from_slice(&self.payload);
        buf.to_vec()
    }

    /// Parse a packet from wire bytes.
    ///
    /// # Errors
    ///
    /// - [`ProtoError::PacketTooShort`] if fewer than 16 bytes are supplied.
    /// - [`ProtoError::EmptyBlock`] if the header parses but leaves a
    ///   zero-byte payload (`block_size` must be at least 1).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let header = PacketHeader::from_bytes(bytes)?;
        let payload = &bytes[PacketHeader::SIZE..];
        if payload.is_empty() {
            return Err(ProtoError::EmptyBlock);
        }
        Ok(Self { header, payload: Bytes::copy_from_slice(payload) })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    impl Arbitrary for Packet {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            (any::<u32>(), any::<u32>(), any::<u32>(), any::<u32>(), proptest::collection::vec(any::<u8>(), 1..256))
                .prop_map(|(run_id, k, orig_len, seq_num, payload)| {
                    Self::new(PacketHeader::new(run_id, k, orig_len, seq_num), payload)
                })
                .boxed()
        }
    }

    proptest! {
        #[test]
        fn packet_round_trip(packet in any::<Packet>()) {
            let wire = packet.to_bytes();
            let parsed = Packet::decode(&wire).expect("should decode");
            prop_assert_eq!(packet, parsed);
        }
    }

    #[test]
    fn rejects_zero_length_payload() {
        let header = PacketHeader::new(1, 1, 1, 0);
        let wire = header.to_bytes();
        assert_eq!(Packet::decode(&wire).unwrap_err(), ProtoError::EmptyBlock);
    }

    #[test]
    fn rejects_short_buffer() {
        assert!(Packet::decode(&[0u8; 4]).is_err());
    }
}
