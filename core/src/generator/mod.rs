use crate::*;
use smallvec::SmallVec;

pub use random::*;

mod random;

/// Candidate buffer large enough for the classic grid without allocating.
pub type CellList = SmallVec<[CellIndex; 16]>;

/// Source of uniformly random cell choices.
pub trait CellPicker {
    /// Uniform index in `0..bound`, `bound` is never zero.
    fn pick_below(&mut self, bound: usize) -> usize;

    /// Picks one of `0..total` that is not in `excluded`, or `None` when every cell is excluded.
    fn pick_excluding(&mut self, total: CellCount, excluded: &[CellIndex]) -> Option<CellIndex> {
        let candidates: CellList = (0..total)
            .filter(|index| !excluded.contains(index))
            .collect();

        if candidates.is_empty() {
            log::warn!("No free cell left out of {}", total);
            return None;
        }

        Some(candidates[self.pick_below(candidates.len())])
    }

    /// Draws `count` distinct cells without replacement.
    fn pick_distinct(&mut self, total: CellCount, count: CellCount) -> CellList {
        let mut picked = CellList::new();
        while picked.len() < usize::from(count) {
            match self.pick_excluding(total, &picked) {
                Some(index) => picked.push(index),
                None => break,
            }
        }
        picked
    }
}
