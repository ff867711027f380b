use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use sweeper_core::{RandomSource, random_id, random_permutation};

/// Draws from the thread-local generator, the default outside of tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn generate_id(&self) -> String {
        random_id(&mut rand::rng())
    }

    fn generate_permutation(&self, n: usize) -> Vec<usize> {
        random_permutation(&mut rand::rng(), n)
    }
}

/// Reproducible ids and bomb layouts for a fixed seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<SmallRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn generate_id(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        random_id(&mut *rng)
    }

    fn generate_permutation(&self, n: usize) -> Vec<usize> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        random_permutation(&mut *rng, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let a = SeededRandom::new(1337);
        let b = SeededRandom::new(1337);

        assert_eq!(a.generate_id(), b.generate_id());
        assert_eq!(a.generate_permutation(24), b.generate_permutation(24));
        assert_ne!(a.generate_id(), a.generate_id());
    }

    #[test]
    fn thread_random_permutes() {
        let mut values = ThreadRandom.generate_permutation(10);
        values.sort_unstable();
        assert_eq!(values, (0..10).collect::<Vec<_>>());
    }
}
