use super::*;
use rand::prelude::*;
use rand::rngs::SmallRng;

/// Picks cells with a seeded small RNG, so a seed always replays the same sequence of lit cells.
#[derive(Clone, Debug)]
pub struct RandomCellPicker {
    rng: SmallRng,
}

impl RandomCellPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl CellPicker for RandomCellPicker {
    fn pick_below(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}
