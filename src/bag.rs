use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tetromino::{PieceKind, ALL_KINDS};

/// Shrinking pool of the seven kinds. Each refill yields all seven exactly
/// once before the next refill.
#[derive(Clone, Debug)]
pub struct PieceBag {
    pool: Vec<PieceKind>,
    rng: StdRng,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        PieceBag {
            pool: ALL_KINDS.to_vec(),
            rng,
        }
    }

    pub fn next(&mut self) -> PieceKind {
        if self.pool.is_empty() {
            self.pool.extend_from_slice(&ALL_KINDS);
        }
        let index = self.rng.random_range(0..self.pool.len());
        self.pool.swap_remove(index)
    }

    /// Kinds still waiting in the current cycle.
    #[cfg(test)]
    fn remaining(&self) -> &[PieceKind] {
        &self.pool
    }
}
