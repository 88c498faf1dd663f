//! Deterministic seeded random number generator.
//!
//! Uses the xorshift32 algorithm for fast, deterministic pseudo-random
//! numbers. Regenerating a point cloud with the same seed and parameters
//! must produce identical buffers, so all generation randomness flows
//! through this type.

use serde::{Deserialize, Serialize};

/// Deterministic seeded random number generator using xorshift32.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Creates a new RNG with the given seed.
    /// Seed of 0 is treated as 1 to avoid degenerate sequence.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Returns the raw u32 value from the RNG.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a random float in [0, 1).
    ///
    /// The top 24 bits are used so the result is exactly representable and
    /// strictly below 1.0.
    pub fn next(&mut self) -> f32 {
        ((self.next_u32() >> 8) as f32) * (1.0 / 16_777_216.0)
    }

    /// Returns +1.0 or -1.0 with equal probability.
    pub fn next_sign(&mut self) -> f32 {
        if self.next() < 0.5 {
            1.0
        } else {
            -1.0
        }
    }

    /// Returns a random float in the range [min, max).
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }

    /// Get the current internal state.
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_sequence() {
        let mut rng1 = SeededRandom::new(12345);
        let mut rng2 = SeededRandom::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn different_seeds_different_sequence() {
        let mut rng1 = SeededRandom::new(12345);
        let mut rng2 = SeededRandom::new(54321);

        // Very unlikely to match
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn next_unit_bounds() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..10000 {
            let val = rng.next();
            assert!((0.0..1.0).contains(&val));
        }
    }

    #[test]
    fn next_sign_both_values() {
        let mut rng = SeededRandom::new(7);
        let mut pos = 0;
        let mut neg = 0;
        for _ in 0..1000 {
            match rng.next_sign() {
                1.0 => pos += 1,
                -1.0 => neg += 1,
                other => panic!("unexpected sign value {other}"),
            }
        }
        assert!(pos > 400 && neg > 400, "skewed signs: +{pos} / -{neg}");
    }

    #[test]
    fn next_range_bounds() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..1000 {
            let val = rng.next_range(5.0, 10.0);
            assert!(val >= 5.0 && val < 10.0);
        }
    }

    #[test]
    fn zero_seed_handled() {
        let rng = SeededRandom::new(0);
        assert_eq!(rng.seed(), 1);
    }
}
