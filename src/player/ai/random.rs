use crate::error::SelectError;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Uniform index source over `[0, bound)`.
pub trait RandomSource {
    fn next_index(&mut self, bound: usize) -> Result<usize, SelectError>;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_index(&mut self, bound: usize) -> Result<usize, SelectError> {
        Ok(self.gen_range(0..bound))
    }
}

/// Seeded generator used by gamers and tests.
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn from_entropy() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}

/// Seed for the `index`-th of several concurrent matches.
pub fn match_seed(base: u64, index: u64) -> u64 {
    base ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Finite list of indices, for harnesses that need exact draws.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    queue: VecDeque<usize>,
    draws: usize,
}

impl ScriptedRandom {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: indices.into_iter().collect(),
            draws: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, bound: usize) -> Result<usize, SelectError> {
        let index = self
            .queue
            .pop_front()
            .ok_or(SelectError::RandomSourceExhausted { draws: self.draws })?;
        self.draws += 1;
        if index >= bound {
            return Err(SelectError::RandomSourceOutOfRange { index, len: bound });
        }
        Ok(index)
    }
}
