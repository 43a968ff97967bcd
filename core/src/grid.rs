use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Which cells of the grid are currently lit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LitGrid {
    lit_mask: Array2<bool>,
    lit_count: CellCount,
}

impl LitGrid {
    pub fn new(size: Coord2) -> Self {
        Self {
            lit_mask: Array2::default(size.to_nd_index()),
            lit_count: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_lit_cells(size: Coord2, lit_cells: &[CellIndex]) -> Result<Self> {
        let mut grid = Self::new(size);
        for &index in lit_cells {
            grid.light(grid.validate_index(index)?);
        }
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.lit_mask.dim();
        (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn lit_count(&self) -> CellCount {
        self.lit_count
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.total_cells() {
            Ok(index)
        } else {
            Err(GameError::InvalidCell)
        }
    }

    pub fn is_lit(&self, index: CellIndex) -> bool {
        index < self.total_cells() && self[index_to_coords(index, self.size())]
    }

    /// Lit cells in row-major order.
    pub fn lit_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..self.total_cells()).filter(|&index| self.is_lit(index))
    }

    /// Returns `true` when the cell was dark before.
    pub fn light(&mut self, index: CellIndex) -> bool {
        self.set(index, true)
    }

    /// Returns `true` when the cell was lit before.
    pub fn darken(&mut self, index: CellIndex) -> bool {
        self.set(index, false)
    }

    pub fn clear(&mut self) {
        self.lit_mask.fill(false);
        self.lit_count = 0;
    }

    fn set(&mut self, index: CellIndex, lit: bool) -> bool {
        if index >= self.total_cells() {
            log::warn!("Ignoring out of range cell {}", index);
            return false;
        }

        let coords = index_to_coords(index, self.size());
        let cell = &mut self.lit_mask[coords.to_nd_index()];
        if *cell == lit {
            return false;
        }

        *cell = lit;
        if lit {
            self.lit_count += 1;
        } else {
            self.lit_count -= 1;
        }
        true
    }
}

impl Index<Coord2> for LitGrid {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.lit_mask[(x as usize, y as usize)]
    }
}
