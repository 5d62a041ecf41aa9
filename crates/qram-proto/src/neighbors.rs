//! Neighbor selection: choosing which source blocks a packet XORs together.

use crate::rng::Xorshift64;

/// Choose `degree` distinct block indices from `[0, k)` using `rng`.
///
/// Uses repeated draw-and-reject rather than a reservoir scheme: sufficient
/// because `degree <= k` and in practice `degree` is typically much smaller
/// than `k`. Order within the returned set is irrelevant to the caller (the
/// packet payload is a commutative XOR of the chosen blocks).
///
/// `degree` is clamped to `k` and `k` must be nonzero.
pub fn sample_neighbors(rng: &mut Xorshift64, degree: u32, k: u32) -> Vec<u32> {
    debug_assert!(k > 0, "sample_neighbors called with k = 0");
    let degree = degree.min(k);

    if degree == k {
        return (0..k).collect();
    }

    let mut chosen = Vec::with_capacity(degree as usize);
    let mut seen = std::collections::HashSet::with_capacity(degree as usize);
    while chosen.len() < degree as usize {
        let idx = rng.next_below(k);
        if seen.insert(idx) {
            chosen.push(idx);
        }
    }
    chosen
}
