/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for lit-cell counts and total-cell counts.
pub type CellCount = u16;

/// Row-major position of a cell on the grid, `y * width + x`.
pub type CellIndex = CellCount;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Whole seconds on a countdown or round clock.
pub type Seconds = u8;

pub type Score = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts a row-major index into `(x, y)` for a grid of the given size.
pub const fn index_to_coords(index: CellIndex, size: Coord2) -> Coord2 {
    let width = size.0 as CellIndex;
    ((index % width) as Coord, (index / width) as Coord)
}

pub const fn coords_to_index((x, y): Coord2, size: Coord2) -> CellIndex {
    (y as CellIndex) * (size.0 as CellIndex) + (x as CellIndex)
}

/// Score-per-hit factor for a combo of `consecutive_hits`, growing by one every `combo_step` hits.
pub const fn multiplier_for(consecutive_hits: u32, combo_step: u32) -> u32 {
    let step = if combo_step == 0 { 1 } else { combo_step };
    consecutive_hits / step + 1
}
