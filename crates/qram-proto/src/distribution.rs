//! Robust Soliton degree distribution.
//!
//! Produces a packet degree `d ∈ [1, k]` with the usual LT-code shape: most
//! packets combine very few blocks, a long tail combines many, and a small
//! bump near `k / R` repairs the blocks the ideal Soliton alone would leave
//! under-covered.
//!
//! `c` and `δ` below are part of the wire-compatibility contract (§9 of the
//! protocol spec): any two implementations must use the same literal values
//! or they will derive different degrees for the same `(run_id, seq_num, k)`.

use crate::rng::Xorshift64;

/// Small positive constant controlling the size of the robustifying term.
pub const C: f64 = 0.03;

/// Bound on the decoder's failure probability.
pub const DELTA: f64 = 0.05;

/// A precomputed Robust Soliton CDF for a fixed `k`.
#[derive(Debug, Clone)]
pub struct RobustSoliton {
    k: u32,
    /// `cdf[i]` holds the cumulative probability of degree `i + 1`.
    cdf: Vec<f64>,
}

impl RobustSoliton {
    /// Build the distribution for `k` source blocks. `k` must be at least 1.
    #[must_use]
    pub fn new(k: u32) -> Self {
        assert!(k >= 1, "RobustSoliton requires k >= 1");

        if k == 1 {
            return Self { k, cdf: vec![1.0] };
        }

        let kf = f64::from(k);
        let r = C * (kf / DELTA).ln() * kf.sqrt();
        let limit = if r > 0.0 { (kf / r).floor() as u32 } else { 0 };

        let ideal = |i: u32| -> f64 {
            if i == 1 { 1.0 / kf } else { 1.0 / (f64::from(i) * f64::from(i - 1)) }
        };
        let robust = |i: u32| -> f64 {
            if limit >= 1 && i <= limit - 1 {
                r / (f64::from(i) * kf)
            } else if i == limit {
                r * (r / DELTA).ln() / kf
            } else {
                0.0
            }
        };

        let weights: Vec<f64> = (1..=k).map(|i| ideal(i) + robust(i)).collect();
        let z: f64 = weights.iter().sum();

        let mut cdf = Vec::with_capacity(k as usize);
        let mut cumulative = 0.0;
        for w in &weights {
            cumulative += w / z;
            cdf.push(cumulative);
        }
        // Floating-point accumulation can leave the last entry a hair under
        // 1.0; clamp so sampling never falls off the end of the table.
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Self { k, cdf }
    }

    /// Number of source blocks this distribution was built for.
    #[must_use]
    pub fn k(&self) -> u32 {
        self.k
    }

    /// Sample a degree in `[1, k]` from a uniform draw of `rng`.
    pub fn sample(&self, rng: &mut Xorshift64) -> u32 {
        if self.k == 1 {
            return 1;
        }
        let u = rng.next_f64();
        let idx = self.cdf.partition_point(|&c| c <= u).min(self.cdf.len() - 1);
        (idx as u32) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_one_forces_degree_one() {
        let dist = RobustSoliton::new(1);
        let mut rng = Xorshift64::new(7);
        for _ in 0..10 {
            assert_eq!(dist.sample(&mut rng), 1);
        }
    }

    #[test]
    fn cdf_is_nondecreasing_and_ends_at_one() {
        let dist = RobustSoliton::new(40);
        assert!(dist.cdf.windows(2).all(|w| w[0] <= w[1]));
        assert!((dist.cdf.last().copied().unwrap_or(0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn samples_stay_within_bounds() {
        let dist = RobustSoliton::new(40);
        let mut rng = Xorshift64::new(0xDEAD_BEEF);
        for _ in 0..2000 {
            let d = dist.sample(&mut rng);
            assert!((1..=40).contains(&d));
        }
    }

    #[test]
    fn low_degrees_dominate_for_large_k() {
        let dist = RobustSoliton::new(1000);
        let mut rng = Xorshift64::new(1);
        let mut low = 0;
        let samples = 5000;
        for _ in 0..samples {
            if dist.sample(&mut rng) <= 3 {
                low += 1;
            }
        }
        // The ideal Soliton alone puts ~60%+ of mass on degree 1-3 for large k.
        assert!(low * 2 > samples);
    }
}
