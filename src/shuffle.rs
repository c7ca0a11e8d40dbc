use std::mem;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use strum::{Display, EnumString, VariantArray};
use tracing::debug;

use crate::grid::{Grid, GridError};
use crate::location::Slot;
use crate::tile::Tile;

/// How to reshuffle a puzzle which is already underway.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Display, EnumString, VariantArray)]
#[strum(serialize_all = "kebab-case")]
pub enum ShuffleMode {
    /// Shuffle every tile out of place, see [`Grid::shuffle_ensuring_no_initial_lock`].
    #[default]
    Full,
    /// Shuffle only tiles not yet in place, see [`Grid::shuffle_unlocked_only`].
    UnlockedOnly,
}

impl<P> Grid<P> {
    /// Shuffle every tile so that none of them starts in its correct slot.
    ///
    /// Whole permutations are drawn and thrown away until one has no fixed point.
    /// For grids of at least 2×2 roughly `1/e` of all permutations qualify, so only a handful of attempts are needed.
    ///
    /// Returns the number of permutations drawn. Does nothing on an empty grid.
    /// A grid holding a single tile yields [`GridError::NotDerangeable`].
    pub fn shuffle_ensuring_no_initial_lock<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, GridError> {
        match self.tiles().len() {
            0 => return Ok(0),
            1 => return Err(GridError::NotDerangeable),
            _ => {}
        }

        let mut attempts = 0;
        loop {
            attempts += 1;
            self.tiles_mut().shuffle(rng);
            self.sync_current_indices();

            if !self.tiles().iter().any(Tile::is_locked) {
                break;
            }
        }

        debug!(attempts, "shuffled with no tile in place");
        Ok(attempts)
    }

    /// Shuffle only the tiles not yet in their correct slot, among the slots they occupy.
    ///
    /// Locked tiles stay where they are. The result is not checked for new locks, so a moved tile may land in its correct slot by chance.
    pub fn shuffle_unlocked_only<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let unlocked = self.tiles().iter()
            .positions(|tile| !tile.is_locked())
            .collect_vec();

        let mut sources = unlocked.clone();
        sources.shuffle(rng);

        // slot -> slot its new tile comes from
        let mut from: Vec<Slot> = (0..self.tiles().len()).collect();
        for (&dst, src) in unlocked.iter().zip(sources) {
            from[dst] = src;
        }

        let mut cells = mem::take(self.tiles_mut()).into_iter().map(Some).collect_vec();
        *self.tiles_mut() = from.into_iter()
            .filter_map(|src| cells[src].take())
            .collect();
        self.sync_current_indices();

        let relocked = unlocked.iter().filter(|&&slot| self.tiles()[slot].is_locked()).count();
        debug!(moved = unlocked.len(), relocked, "shuffled unlocked tiles");
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::ShuffleMode;
    use crate::grid::{Grid, GridError};
    use crate::tile::Tile;

    fn identity(size: usize) -> Grid<usize> {
        let mut grid = Grid::new(NonZero::new(size).unwrap());
        grid.set_tiles((0..size * size).map(|i| Tile::solved(i, i)).collect());
        grid
    }

    fn is_permutation(grid: &Grid<usize>) -> bool {
        grid.tiles().iter().map(Tile::current_index).sorted().eq(0..grid.slot_count())
            && grid.tiles().iter().map(Tile::correct_index).sorted().eq(0..grid.slot_count())
    }

    #[test]
    fn full_shuffle_locks_nothing() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for size in 2..=6 {
            for _ in 0..20 {
                let mut grid = identity(size);
                let attempts = grid.shuffle_ensuring_no_initial_lock(&mut rng).unwrap();
                assert!(attempts >= 1);
                assert!(!grid.is_complete());
                assert_eq!(grid.locked_count(), 0);
                assert!(is_permutation(&grid));
            }
        }
    }

    #[test]
    fn two_by_two_shuffle_terminates() {
        // 9 of the 24 permutations of 4 tiles are derangements
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut grid = identity(2);
        grid.shuffle_ensuring_no_initial_lock(&mut rng).unwrap();
        assert!(grid.tiles().iter().all(|tile| !tile.is_locked()));
    }

    #[test]
    fn payloads_travel_with_tiles() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut grid = identity(4);
        grid.shuffle_ensuring_no_initial_lock(&mut rng).unwrap();
        assert!(grid.tiles().iter().all(|tile| *tile.payload() == tile.correct_index()));
    }

    #[test]
    fn degenerate_full_shuffles() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        let mut empty: Grid<usize> = Grid::new(NonZero::new(3).unwrap());
        assert_eq!(empty.shuffle_ensuring_no_initial_lock(&mut rng), Ok(0));
        assert!(empty.tiles().is_empty());

        let mut single = identity(1);
        assert_eq!(single.shuffle_ensuring_no_initial_lock(&mut rng), Err(GridError::NotDerangeable));
        assert!(single.is_complete());
    }

    #[test]
    fn partial_shuffle_keeps_locked_tiles() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..50 {
            let mut grid = identity(3);
            // unlock slots 0, 2, 4 and 7; everything else stays locked
            grid.swap(0, 2, true);
            grid.swap(4, 7, true);
            let locked_before = grid.tiles().iter()
                .filter(|tile| tile.is_locked())
                .map(Tile::correct_index)
                .collect_vec();

            grid.shuffle_unlocked_only(&mut rng);

            assert!(is_permutation(&grid));
            for correct in locked_before {
                assert_eq!(grid.slot_of(correct), Some(correct));
            }
            for slot in [1, 3, 5, 6, 8] {
                assert!(grid.tiles()[slot].is_locked());
            }
            // only tiles from the unlocked slots may land in them
            for slot in [0, 2, 4, 7] {
                assert!([0, 2, 4, 7].contains(&grid.tiles()[slot].correct_index()));
            }
        }
    }

    #[test]
    fn partial_shuffle_may_relock() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut relocked_once = false;
        for _ in 0..100 {
            let mut grid = identity(2);
            grid.swap(0, 1, true);
            assert_eq!(grid.locked_count(), 2);
            grid.shuffle_unlocked_only(&mut rng);
            if grid.is_complete() {
                relocked_once = true;
            }
        }
        // a 2-cycle reshuffled restores itself half the time
        assert!(relocked_once);
    }

    #[test]
    fn partial_shuffle_on_solved_grid_is_a_no_op() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut grid = identity(3);
        grid.shuffle_unlocked_only(&mut rng);
        assert!(grid.is_complete());
    }

    #[test]
    fn shuffle_modes_parse() {
        assert_eq!("full".parse::<ShuffleMode>(), Ok(ShuffleMode::Full));
        assert_eq!("unlocked-only".parse::<ShuffleMode>(), Ok(ShuffleMode::UnlockedOnly));
        assert!("some".parse::<ShuffleMode>().is_err());
        assert_eq!(ShuffleMode::UnlockedOnly.to_string(), "unlocked-only");
    }
}
