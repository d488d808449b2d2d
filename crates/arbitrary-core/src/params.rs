//! Generation parameters handed to every generator invocation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default upper bound for sizes of generated collections and text.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Size controls and randomness source for generators.
///
/// The RNG is seeded, so two `GenParams` built from the same seed drive the
/// same generators to the same samples.
#[derive(Debug, Clone)]
pub struct GenParams {
    /// Seed the RNG was created from
    seed: u64,
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Lower bound for sizes (collection lengths, text lengths)
    pub min_size: usize,
    /// Upper bound for sizes (collection lengths, text lengths)
    pub max_size: usize,
    /// Sequence number of the current sample, used by pattern generators
    pub index: u64,
}

impl GenParams {
    /// Create parameters seeded with `seed` and default sizes.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            min_size: 0,
            max_size: DEFAULT_MAX_SIZE,
            index: 0,
        }
    }

    /// Neutral parameters: seed 0 and every size pinned to zero.
    pub fn minimal() -> Self {
        Self::new(0).with_size(0, 0)
    }

    /// Set the size bounds. Inverted bounds are swapped.
    pub fn with_size(mut self, min_size: usize, max_size: usize) -> Self {
        self.min_size = min_size.min(max_size);
        self.max_size = min_size.max(max_size);
        self
    }

    /// Set the sample index.
    pub fn with_index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    /// The seed these parameters were created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mutable access to the RNG.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Draw a size in `[min_size, min(max_size, cap)]`.
    ///
    /// When `cap` is below `min_size` the cap wins, so callers can force
    /// empty collections by passing zero.
    pub fn next_size(&mut self, cap: usize) -> usize {
        let max = self.max_size.min(cap);
        let min = self.min_size.min(max);
        self.rng.random_range(min..=max)
    }
}

impl Default for GenParams {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_params() {
        let mut params = GenParams::minimal();
        assert_eq!(params.seed(), 0);
        assert_eq!(params.min_size, 0);
        assert_eq!(params.max_size, 0);
        assert_eq!(params.next_size(10), 0);
    }

    #[test]
    fn test_with_size_swaps_inverted_bounds() {
        let params = GenParams::new(1).with_size(9, 3);
        assert_eq!(params.min_size, 3);
        assert_eq!(params.max_size, 9);
    }

    #[test]
    fn test_next_size_respects_cap() {
        let mut params = GenParams::new(42).with_size(2, 50);
        for _ in 0..100 {
            let size = params.next_size(5);
            assert!((2..=5).contains(&size));
        }
        assert_eq!(params.next_size(0), 0);
    }

    #[test]
    fn test_deterministic_sizes() {
        let mut p1 = GenParams::new(7);
        let mut p2 = GenParams::new(7);
        let a: Vec<usize> = (0..20).map(|_| p1.next_size(100)).collect();
        let b: Vec<usize> = (0..20).map(|_| p2.next_size(100)).collect();
        assert_eq!(a, b);
    }
}
