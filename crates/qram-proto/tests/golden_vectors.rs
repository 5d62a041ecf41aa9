//! Golden vectors pinning the PRNG, degree distribution, and neighbor
//! sampling as a wire-level contract. Any change to these numbers is a
//! protocol break — a second implementation agreeing on `(run_id, seq_num,
//! k)` must derive exactly these neighbor sets.

use qram_proto::{RobustSoliton, derive_neighbors, packet_seed};

#[test]
fn packet_seed_golden_values() {
    assert_eq!(packet_seed(0, 0), 0x9E37_79B9_7F4A_7C15);
    assert_eq!(packet_seed(42, 7), (42u64 << 32) | 7);
    assert_eq!(packet_seed(0x0102_0304, 0), 0x0102_0304_0000_0000);
}

#[test]
fn neighbor_sets_are_pinned_for_fixed_inputs() {
    // These exact vectors are the wire-compatibility pin: a second,
    // independent implementation agreeing on the PRNG, distribution
    // parameters, and sampler must derive bit-for-bit the same neighbor sets
    // for these inputs. Any change to `Xorshift64`, `RobustSoliton`, or
    // `sample_neighbors` that breaks this test is a protocol break.
    let dist = RobustSoliton::new(40);

    let seq0 = derive_neighbors(0x0102_0304, 0, 40, &dist);
    assert_eq!(seq0, vec![32, 0, 24, 16, 8, 1, 11, 27, 10]);

    let seq1 = derive_neighbors(0x0102_0304, 1, 40, &dist);
    assert_eq!(seq1, vec![33, 21, 5, 17, 8, 14, 4, 28, 26]);

    let second = derive_neighbors(0x0102_0304, 0, 40, &dist);
    assert_eq!(seq0, second, "same (run_id, seq_num, k) must always derive the same neighbors");
}

#[test]
fn single_block_session_always_has_degree_one() {
    let dist = RobustSoliton::new(1);
    for seq_num in 0..100u32 {
        let neighbors = derive_neighbors(7, seq_num, 1, &dist);
        assert_eq!(neighbors, vec![0]);
    }
}

#[test]
fn different_run_ids_diverge_for_the_same_seq_num() {
    let dist = RobustSoliton::new(20);
    let a = derive_neighbors(1, 0, 20, &dist);
    let b = derive_neighbors(2, 0, 20, &dist);
    assert_ne!(a, b, "distinct run_id must decorrelate the PRNG stream");
}
