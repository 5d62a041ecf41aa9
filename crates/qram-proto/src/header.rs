//! Fixed 16-byte packet header, big-endian, zero-copy.
//!
//! ```text
//! 0..4   run_id     u32 BE  — session identifier
//! 4..8   k          u32 BE  — number of source blocks, k >= 1
//! 8..12  orig_len   u32 BE  — payload length before padding
//! 12..16 seq_num    u32 BE  — packet index, monotonic per session
//! ```

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::errors::{ProtoError, Result};

/// Fixed 16-byte packet header (big-endian network byte order).
///
/// All fields are stored as raw byte arrays rather than native integers so
/// the struct can be reinterpreted directly from wire bytes regardless of
/// host endianness or alignment.
#[repr(C, packed)]
#[derive(Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct PacketHeader {
    run_id: [u8; 4],
    k: [u8; 4],
    orig_len: [u8; 4],
    seq_num: [u8; 4],
}

impl PacketHeader {
    /// Serialized size of the header in bytes.
    pub const SIZE: usize = 16;

    /// Construct a header from its logical fields.
    #[must_use]
    pub fn new(run_id: u32, k: u32, orig_len: u32, seq_num: u32) -> Self {
        Self {
            run_id: run_id.to_be_bytes(),
            k: k.to_be_bytes(),
            orig_len: orig_len.to_be_bytes(),
            seq_num: seq_num.to_be_bytes(),
        }
    }

    /// Parse a header from the first [`Self::SIZE`] bytes of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::PacketTooShort`] if fewer than [`Self::SIZE`]
    /// bytes are supplied. The header carries no magic number of its own
    /// (the packet is self-describing only via its field values), so any
    /// 16-byte prefix parses successfully here; the decoder is responsible
    /// for deciding whether the resulting fields make sense.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, _rest) = Self::ref_from_prefix(bytes)
            .map_err(|_| ProtoError::PacketTooShort { expected: Self::SIZE, actual: bytes.len() })?;
        Ok(*header)
    }

    /// Serialize the header to its wire representation.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut arr = [0u8; Self::SIZE];
        arr.copy_from_slice(IntoBytes::as_bytes(self));
        arr
    }

    /// Session identifier. A decoder observing a new `run_id` starts a fresh
    /// session, discarding any prior state.
    #[must_use]
    pub fn run_id(&self) -> u32 {
        u32::from_be_bytes(self.run_id)
    }

    /// Number of source blocks in this session.
    #[must_use]
    pub fn k(&self) -> u32 {
        u32::from_be_bytes(self.k)
    }

    /// Payload length before zero-padding to a multiple of `block_size`.
    #[must_use]
    pub fn orig_len(&self) -> u32 {
        u32::from_be_bytes(self.orig_len)
    }

    /// Monotonic packet index within the session.
    #[must_use]
    pub fn seq_num(&self) -> u32 {
        u32::from_be_bytes(self.seq_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let header = PacketHeader::new(42, 5, 1000, 3);
        let bytes = header.to_bytes();
        let parsed = PacketHeader::from_bytes(&bytes).expect("valid header");
        assert_eq!(parsed.run_id(), 42);
        assert_eq!(parsed.k(), 5);
        assert_eq!(parsed.orig_len(), 1000);
        assert_eq!(parsed.seq_num(), 3);
    }

    #[test]
    fn big_endian_field_layout() {
        let header = PacketHeader::new(0x0102_0304, 0x0506_0708, 0x090A_0B0C, 0x0D0E_0F10);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&bytes[4..8], &[0x05, 0x06, 0x07, 0x08]);
        assert_eq!(&bytes[8..12], &[0x09, 0x0A, 0x0B, 0x0C]);
        assert_eq!(&bytes[12..16], &[0x0D, 0x0E, 0x0F, 0x10]);
    }

    #[test]
    fn rejects_short_input() {
        let err = PacketHeader::from_bytes(&[0u8; 15]).unwrap_err();
        assert_eq!(err, ProtoError::PacketTooShort { expected: 16, actual: 15 });
    }

    #[test]
    fn accepts_exact_size_with_trailing_payload() {
        let header = PacketHeader::new(1, 1, 1, 0);
        let mut bytes = header.to_bytes().to_vec();
        bytes.extend_from_slice(b"payload");
        let parsed = PacketHeader::from_bytes(&bytes).expect("valid header");
        assert_eq!(parsed.run_id(), 1);
    }
}
