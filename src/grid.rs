use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use strum::EnumIs;
use thiserror::Error;
use tracing::{debug, trace};
use unordered_pair::UnorderedPair;

use crate::location::{GridSize, Slot};
use crate::tile::Tile;

/// Reasons a tile sequence or a grid operation may be rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum GridError {
    /// The number of tiles does not match `grid_size²`.
    #[error("expected {expected} tiles, got {actual}")]
    WrongTileCount {
        /// `grid_size²`.
        expected: usize,
        /// The number supplied.
        actual: usize,
    },
    /// A tile claims a correct slot outside the grid.
    #[error("correct index {index} is outside a grid of {len} slots")]
    IndexOutOfRange {
        /// The offending correct index.
        index: Slot,
        /// Number of slots in the grid.
        len: usize,
    },
    /// Two or more tiles claim the same correct slot.
    #[error("correct index {0} appears more than once")]
    DuplicateIndex(Slot),
    /// A grid of a single tile has no arrangement in which that tile is out of place.
    #[error("a single tile cannot be shuffled out of place")]
    NotDerangeable,
}

/// The result of [`Grid::swap`].
///
/// None of these are errors; a refusal is a policy decision the caller may ignore.
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIs)]
pub enum SwapOutcome {
    /// The tiles in these two slots were exchanged.
    Swapped(UnorderedPair<Slot>),
    /// At least one of the tiles is locked and locked tiles may not move.
    Refused,
    /// Nothing to do: both slots are the same, or one of them is outside the grid.
    Unchanged,
}

/// A square grid of [`Tile`]s, stored by the slot each tile currently occupies.
///
/// A tile's position in [`Self::tiles`] and its [`current_index`](Tile::current_index) are always the same.
#[derive(Clone, Debug)]
pub struct Grid<P> {
    grid_size: GridSize,
    tiles: Vec<Tile<P>>,
}

impl<P> Grid<P> {
    /// An empty grid; populate it with [`Self::set_tiles`] or [`Self::try_set_tiles`].
    pub fn new(grid_size: GridSize) -> Self {
        Self {
            grid_size,
            tiles: Vec::with_capacity(grid_size.get() * grid_size.get()),
        }
    }

    /// The side length of this grid.
    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// Total number of slots, `grid_size²`.
    pub fn slot_count(&self) -> usize {
        self.grid_size.get() * self.grid_size.get()
    }

    /// Replace every tile, discarding the previous ones.
    ///
    /// The caller is trusted to supply exactly `grid_size²` tiles whose correct indices are a permutation of the slots; nothing is checked.
    /// Each tile's current index is set to its position in `tiles`.
    pub fn set_tiles(&mut self, tiles: Vec<Tile<P>>) {
        self.tiles = tiles;
        self.sync_current_indices();
    }

    /// As [`Self::set_tiles`], but rejects a sequence that is not a full permutation of the slots.
    /// On error the grid keeps its previous tiles.
    pub fn try_set_tiles(&mut self, tiles: Vec<Tile<P>>) -> Result<(), GridError> {
        let len = self.slot_count();
        if tiles.len() != len {
            return Err(GridError::WrongTileCount { expected: len, actual: tiles.len() });
        }

        if let Some(tile) = tiles.iter().find(|tile| tile.correct_index() >= len) {
            return Err(GridError::IndexOutOfRange { index: tile.correct_index(), len });
        }

        if let Some(index) = tiles.iter().map(Tile::correct_index).duplicates().next() {
            return Err(GridError::DuplicateIndex(index));
        }

        self.set_tiles(tiles);
        Ok(())
    }

    pub(crate) fn sync_current_indices(&mut self) {
        for (slot, tile) in self.tiles.iter_mut().enumerate() {
            tile.current_index = slot;
        }
    }

    /// All tiles in slot order.
    pub fn tiles(&self) -> &[Tile<P>] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut Vec<Tile<P>> {
        &mut self.tiles
    }

    /// Consume the grid, yielding its tiles in slot order.
    pub fn into_tiles(self) -> Vec<Tile<P>> {
        self.tiles
    }

    /// The tile currently at `slot`, if the slot exists.
    pub fn tile_at(&self, slot: Slot) -> Option<&Tile<P>> {
        self.tiles.get(slot)
    }

    /// The slot currently holding the tile that belongs in `correct_index`.
    pub fn slot_of(&self, correct_index: Slot) -> Option<Slot> {
        self.tiles.iter().position(|tile| tile.correct_index() == correct_index)
    }

    /// Exchange the tiles at `first` and `second` along with their current indices.
    ///
    /// If `allow_locked` is `false` and either tile is locked, nothing changes and [`SwapOutcome::Refused`] is returned.
    pub fn swap(&mut self, first: Slot, second: Slot, allow_locked: bool) -> SwapOutcome {
        let (Some(a), Some(b)) = (self.tiles.get(first), self.tiles.get(second)) else {
            return SwapOutcome::Unchanged;
        };
        if first == second {
            return SwapOutcome::Unchanged;
        }

        if !allow_locked && (a.is_locked() || b.is_locked()) {
            debug!(first, second, "refusing to move a locked tile");
            return SwapOutcome::Refused;
        }

        self.tiles.swap(first, second);
        let first_index = self.tiles[first].current_index;
        self.tiles[first].current_index = self.tiles[second].current_index;
        self.tiles[second].current_index = first_index;

        trace!(first, second, "swapped tiles");
        SwapOutcome::Swapped(UnorderedPair(first, second))
    }

    /// Whether every tile is in its correct slot.
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(Tile::is_locked)
    }

    /// Number of tiles currently in their correct slot.
    pub fn locked_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_locked()).count()
    }

    /// The correct index of every tile, laid out by where it currently sits, as `(row, column)`.
    ///
    /// Returns `None` if the grid has not been fully populated.
    pub fn arrangement(&self) -> Option<Array2<Slot>> {
        let n = self.grid_size.get();
        Array2::from_shape_vec((n, n), self.tiles.iter().map(Tile::correct_index).collect_vec()).ok()
    }
}

impl<P> Display for Grid<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self.slot_count().saturating_sub(1).to_string().len();

        for row in self.tiles.chunks(self.grid_size.get()) {
            let line = row.iter()
                .map(|tile| format!("{:>width$}{}", tile.correct_index(), if tile.is_locked() { '*' } else { ' ' }))
                .join(" ");
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use ndarray::array;
    use unordered_pair::UnorderedPair;

    use super::{Grid, GridError, SwapOutcome};
    use crate::tile::Tile;

    fn identity(size: usize) -> Grid<()> {
        let mut grid = Grid::new(NonZero::new(size).unwrap());
        grid.set_tiles((0..size * size).map(|i| Tile::solved((), i)).collect());
        grid
    }

    #[test]
    fn identity_is_complete() {
        let grid = identity(3);
        assert!(grid.is_complete());
        assert!(grid.is_complete());
        assert_eq!(grid.locked_count(), 9);
        assert_eq!(format!("{}", grid), "0* 1* 2*
3* 4* 5*
6* 7* 8*
");
    }

    #[test]
    fn locked_tiles_refuse_to_swap() {
        let mut grid = identity(3);
        assert_eq!(grid.swap(0, 1, false), SwapOutcome::Refused);
        assert_eq!(grid.tiles()[0].current_index(), 0);
        assert_eq!(grid.tiles()[1].current_index(), 1);
        assert_eq!(grid.tiles()[0].correct_index(), 0);

        assert_eq!(grid.swap(0, 1, true), SwapOutcome::Swapped(UnorderedPair(1, 0)));
        assert_eq!(grid.tiles()[0].correct_index(), 1);
        assert_eq!(grid.tiles()[0].current_index(), 0);
        assert_eq!(grid.tiles()[1].correct_index(), 0);
        assert!(!grid.is_complete());
        assert_eq!(format!("{}", grid), "1  0  2*
3* 4* 5*
6* 7* 8*
");
    }

    #[test]
    fn unlocked_tiles_swap_back_into_place() {
        let mut grid = identity(2);
        grid.swap(0, 3, true);
        assert_eq!(grid.locked_count(), 2);

        assert!(grid.swap(3, 0, false).is_swapped());
        assert!(grid.is_complete());
    }

    #[test]
    fn degenerate_swaps_do_nothing() {
        let mut grid = identity(2);
        assert_eq!(grid.swap(1, 1, true), SwapOutcome::Unchanged);
        assert_eq!(grid.swap(1, 4, true), SwapOutcome::Unchanged);
        assert!(grid.is_complete());
    }

    #[test]
    fn arrangement_follows_current_slots() {
        let mut grid = identity(2);
        assert_eq!(grid.arrangement(), Some(array![[0, 1], [2, 3]]));

        grid.swap(1, 2, true);
        assert_eq!(grid.arrangement(), Some(array![[0, 2], [1, 3]]));
        assert_eq!(grid.slot_of(2), Some(1));
        assert_eq!(grid.tile_at(2).map(Tile::correct_index), Some(1));

        assert_eq!(Grid::<()>::new(NonZero::new(2).unwrap()).arrangement(), None);
    }

    #[test]
    fn set_tiles_places_by_position() {
        let mut grid = Grid::new(NonZero::new(2).unwrap());
        grid.set_tiles(vec![Tile::solved('d', 3), Tile::solved('a', 0), Tile::solved('b', 1), Tile::solved('c', 2)]);
        let current = grid.tiles().iter().map(Tile::current_index).collect::<Vec<_>>();
        assert_eq!(current, vec![0, 1, 2, 3]);
        assert_eq!(grid.locked_count(), 0);
    }

    #[test]
    fn malformed_tiles_are_rejected() {
        let mut grid = identity(2);

        let short = (0..3).map(|i| Tile::solved((), i)).collect();
        assert_eq!(grid.try_set_tiles(short), Err(GridError::WrongTileCount { expected: 4, actual: 3 }));

        let outside = vec![Tile::solved((), 0), Tile::solved((), 1), Tile::solved((), 2), Tile::solved((), 4)];
        assert_eq!(grid.try_set_tiles(outside), Err(GridError::IndexOutOfRange { index: 4, len: 4 }));

        let repeated = vec![Tile::solved((), 0), Tile::solved((), 2), Tile::solved((), 2), Tile::solved((), 3)];
        assert_eq!(grid.try_set_tiles(repeated), Err(GridError::DuplicateIndex(2)));

        // untouched after every rejection
        assert!(grid.is_complete());
        assert_eq!(grid.tiles().len(), 4);
    }
}
