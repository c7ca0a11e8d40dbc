use itertools::Itertools;
use rand::Rng;
use strum::EnumIs;
use tracing::{debug, info};

use crate::builder::PuzzleConfig;
use crate::geometry::Rect;
use crate::grid::{Grid, GridError, SwapOutcome};
use crate::location::Slot;
use crate::observer::PuzzleObserver;
use crate::resolver::{Candidate, DragResolver};
use crate::shuffle::ShuffleMode;
use crate::tile::Tile;

/// What became of a drag once the tile was released.
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIs)]
pub enum DragOutcome {
    /// The dragged tile swapped places with another.
    Swapped {
        /// The slot the dragged tile came from, now holding the target.
        from: Slot,
        /// The slot the dragged tile now occupies.
        to: Slot,
    },
    /// No eligible tile was covered enough; the dragged tile goes back where it was.
    Reverted,
    /// The drag was not allowed in the first place: the puzzle is finished, the slot does not exist, or the tile is locked.
    Ignored,
}

/// A puzzle in progress: a [`Grid`] plus the rules for moving its tiles and someone to tell when it is done.
///
/// [`Puzzle`]s should be built using a [`PuzzleBuilder`](crate::PuzzleBuilder), or from a ready-made tile sequence with [`Self::from_tiles`].
pub struct Puzzle<P> {
    grid: Grid<P>,
    config: PuzzleConfig,
    observer: Option<Box<dyn PuzzleObserver>>,
    loaded: bool,
    completed: bool,
}

impl<P> Puzzle<P> {
    pub(crate) fn new(grid: Grid<P>, config: PuzzleConfig) -> Self {
        Self {
            grid,
            config,
            observer: None,
            loaded: false,
            completed: false,
        }
    }

    /// A puzzle over tiles produced elsewhere, e.g. by an image slicer which assigns correct indices itself.
    ///
    /// The tiles are validated as by [`Grid::try_set_tiles`] against `config.grid_size`.
    pub fn from_tiles(config: PuzzleConfig, tiles: Vec<Tile<P>>) -> Result<Self, GridError> {
        let mut grid = Grid::new(config.grid_size);
        grid.try_set_tiles(tiles)?;
        Ok(Self::new(grid, config))
    }

    /// The tiles as they currently stand.
    pub fn grid(&self) -> &Grid<P> {
        &self.grid
    }

    /// The rules this puzzle was built with.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Consume the puzzle, yielding its grid.
    pub fn into_grid(self) -> Grid<P> {
        self.grid
    }

    /// Register the observer to notify, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn PuzzleObserver>) {
        self.observer = Some(observer);
    }

    fn resolver(&self) -> DragResolver {
        DragResolver {
            allow_locked: self.config.allow_locked_moves,
            min_overlap_ratio: self.config.min_overlap_ratio,
        }
    }

    /// Whether every tile is in its correct slot.
    pub fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    /// Shuffle the tiles so none is in place and, the first time, tell the observer the puzzle is ready.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GridError> {
        self.shuffle(rng)?;

        if !self.loaded {
            self.loaded = true;
            info!(grid_size = self.config.grid_size.get(), "puzzle loaded");
            if let Some(observer) = self.observer.as_mut() {
                observer.puzzle_did_load(self.config.grid_size);
            }
        }

        Ok(())
    }

    /// Start over: every tile is shuffled out of place and the puzzle counts as unfinished again.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GridError> {
        self.grid.shuffle_ensuring_no_initial_lock(rng)?;
        self.completed = false;
        Ok(())
    }

    /// Shuffle only the tiles not yet in place.
    ///
    /// This may happen to put every remaining tile in place, which completes the puzzle.
    pub fn shuffle_unlocked<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let was_complete = self.grid.is_complete();
        self.grid.shuffle_unlocked_only(rng);
        self.check_completion(was_complete);
    }

    /// Reshuffle according to `mode`.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, mode: ShuffleMode, rng: &mut R) -> Result<(), GridError> {
        match mode {
            ShuffleMode::Full => self.shuffle(rng),
            ShuffleMode::UnlockedOnly => {
                self.shuffle_unlocked(rng);
                Ok(())
            }
        }
    }

    /// Where each tile belongs on screen when the puzzle fills `bounds`, in slot order.
    pub fn frames(&self, bounds: Rect) -> Vec<Rect> {
        self.grid.tiles().iter()
            .map(|tile| bounds.cell(tile.current_index(), self.config.grid_size))
            .collect_vec()
    }

    /// Whether the tile in `slot` may be picked up.
    pub fn can_drag(&self, slot: Slot) -> bool {
        match self.grid.tile_at(slot) {
            Some(tile) => !self.completed && (self.config.allow_locked_moves || !tile.is_locked()),
            None => false,
        }
    }

    /// Swap two slots directly, under this puzzle's locking rule, then check for completion.
    pub fn swap(&mut self, first: Slot, second: Slot) -> SwapOutcome {
        if self.completed {
            return SwapOutcome::Unchanged;
        }

        let was_complete = self.grid.is_complete();
        let outcome = self.grid.swap(first, second, self.config.allow_locked_moves);
        self.check_completion(was_complete);
        outcome
    }

    /// Process the release of the tile from `slot` at `moved`.
    ///
    /// `frames` holds every tile's frame in slot order, as laid out before the drag (see [`Self::frames`]); the entry for `slot` itself is ignored.
    pub fn handle_drag_end(&mut self, slot: Slot, moved: Rect, frames: &[Rect]) -> DragOutcome {
        if !self.can_drag(slot) {
            return DragOutcome::Ignored;
        }

        let candidates = self.grid.tiles().iter()
            .zip(frames)
            .map(|(tile, frame)| Candidate {
                slot: tile.current_index(),
                frame: *frame,
                locked: tile.is_locked(),
            });

        let target = self.resolver().resolve(slot, moved, candidates);
        let was_complete = self.grid.is_complete();
        let outcome = match target {
            Some(to) => match self.grid.swap(slot, to, self.config.allow_locked_moves) {
                SwapOutcome::Swapped(_) => DragOutcome::Swapped { from: slot, to },
                // the resolver only offers targets the swap rule accepts
                SwapOutcome::Refused | SwapOutcome::Unchanged => DragOutcome::Reverted,
            },
            None => DragOutcome::Reverted,
        };
        debug!(slot, ?outcome, "drag ended");

        self.check_completion(was_complete);
        outcome
    }

    /// Notify on the incomplete to complete transition only; `was_complete` is the state before the last mutation.
    fn check_completion(&mut self, was_complete: bool) {
        if self.completed || was_complete || !self.grid.is_complete() {
            return;
        }

        self.completed = true;
        info!("puzzle completed");
        if let Some(observer) = self.observer.as_mut() {
            observer.puzzle_did_complete();
        }
    }
}
