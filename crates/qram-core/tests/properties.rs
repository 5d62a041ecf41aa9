//! Property-based tests for the encode/decode pipeline.

use proptest::prelude::*;
use qram_core::{LtDecoder, LtEncoder, compression};

fn arbitrary_payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..2000)
}

proptest! {
    /// Invariant 1: round-trip within `ceil(len/block_size) * 2` packets.
    #[test]
    fn prop_round_trip_within_bounded_overhead(
        data in arbitrary_payload(),
        block_size in 1u32..200,
        run_id in any::<u32>(),
    ) {
        let mut encoder = LtEncoder::new(&data, block_size, run_id);
        let k = encoder.block_count();
        let mut decoder = LtDecoder::new(k, block_size, run_id);

        let budget = (k * 2).max(1);
        let mut completed = false;
        for _ in 0..budget {
            if decoder.push_packet(&encoder.next_packet()) {
                completed = true;
                break;
            }
        }

        prop_assert!(completed, "decoder failed to converge within budget for k={}", k);
        prop_assert_eq!(decoder.get_result(data.len() as u32), data);
    }

    /// Invariant 2: feeding the same packet repeatedly is a no-op beyond the
    /// first delivery.
    #[test]
    fn prop_duplicate_delivery_is_idempotent(
        data in arbitrary_payload(),
        block_size in 10u32..200,
        run_id in any::<u32>(),
        repeats in 2usize..6,
    ) {
        let mut encoder = LtEncoder::new(&data, block_size, run_id);
        let k = encoder.block_count();
        let packets: Vec<Vec<u8>> = (0..(k * 3)).map(|_| encoder.next_packet()).collect();

        let mut once = LtDecoder::new(k, block_size, run_id);
        for p in &packets {
            once.push_packet(p);
        }

        let mut many = LtDecoder::new(k, block_size, run_id);
        for p in &packets {
            for _ in 0..repeats {
                many.push_packet(p);
            }
        }

        prop_assert_eq!(once.decoded_count(), many.decoded_count());
        prop_assert_eq!(
            once.get_result(data.len() as u32),
            many.get_result(data.len() as u32)
        );
    }

    /// Invariant 3: decoder output does not depend on delivery order.
    #[test]
    fn prop_shuffled_delivery_matches_forward_delivery(
        data in arbitrary_payload(),
        block_size in 10u32..200,
        run_id in any::<u32>(),
    ) {
        let mut encoder = LtEncoder::new(&data, block_size, run_id);
        let k = encoder.block_count();
        let mut packets: Vec<Vec<u8>> = (0..(k * 3)).map(|_| encoder.next_packet()).collect();

        let mut forward = LtDecoder::new(k, block_size, run_id);
        for p in &packets {
            forward.push_packet(p);
        }

        packets.reverse();
        let mut backward = LtDecoder::new(k, block_size, run_id);
        for p in &packets {
            backward.push_packet(p);
        }

        prop_assert_eq!(
            forward.get_result(data.len() as u32),
            backward.get_result(data.len() as u32)
        );
    }

    /// Invariant 6: payloads that cannot be shrunk enough pass through
    /// `maybe_compress` unchanged.
    #[test]
    fn prop_incompressible_short_payload_is_never_wrapped(
        data in prop::collection::vec(any::<u8>(), 0..49),
    ) {
        let (bytes, compressed) = compression::maybe_compress(&data);
        prop_assert!(!compressed);
        prop_assert_eq!(bytes, data);
    }
}
