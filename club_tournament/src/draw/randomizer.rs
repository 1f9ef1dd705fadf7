//! Injectable random source for BYE placement, group sizing and slot fills.

use rand::{
    Rng, SeedableRng,
    rngs::StdRng,
    seq::{SliceRandom, index},
};

/// Random draw used by the seeder and the partitioner.
///
/// Production code uses [`DrawRandomizer::new`], which seeds from the OS.
/// Tests and reproducible draws use [`DrawRandomizer::from_seed`].
#[derive(Debug, Clone)]
pub struct DrawRandomizer {
    rng: StdRng,
}

impl DrawRandomizer {
    /// Create a randomizer seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic randomizer
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffle items in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Pick `amount` distinct indices out of `0..length`, in random order.
    ///
    /// # Arguments
    ///
    /// * `length` - Size of the index range
    /// * `amount` - Number of indices wanted; clamped to `length`
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }

    /// Fair coin
    pub fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

impl Default for DrawRandomizer {
    fn default() -> Self {
        Self::new()
    }
}
