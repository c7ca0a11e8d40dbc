use std::num::NonZero;

use ndarray::Ix;

type Coord = usize;
/// Side length of a square grid.
pub type GridSize = NonZero<Coord>;
/// A linear position in a grid, `row * grid_size + col`.
pub type Slot = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a grid, i.e. `(column, row)`. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The location occupying `slot` in a grid of side `grid_size`.
    pub fn from_slot(slot: Slot, grid_size: GridSize) -> Self {
        Self(slot % grid_size.get(), slot / grid_size.get())
    }

    /// The linear slot of this location in a grid of side `grid_size`.
    pub fn as_slot(&self, grid_size: GridSize) -> Slot {
        self.1 * grid_size.get() + self.0
    }

    /// The `(row, column)` index of this location in an [`ndarray::Array2`] such as [`Grid::arrangement`](crate::Grid::arrangement).
    pub fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
