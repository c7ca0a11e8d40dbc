//! Configuration and construction of [`Puzzle`]s.

use std::num::NonZero;

use itertools::Itertools;
use thiserror::Error;

use crate::grid::Grid;
use crate::location::{GridSize, Location};
use crate::puzzle::Puzzle;
use crate::resolver::DEFAULT_MIN_OVERLAP_RATIO;
use crate::tile::Tile;

/// Settings shared by every move in a [`Puzzle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PuzzleConfig {
    /// Side length of the grid; 3 means a 3×3 puzzle.
    pub grid_size: GridSize,
    /// Whether tiles already in their correct slot may still be dragged or displaced.
    pub allow_locked_moves: bool,
    /// See [`DragResolver::min_overlap_ratio`](crate::resolver::DragResolver::min_overlap_ratio).
    pub min_overlap_ratio: f64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            grid_size: NonZero::<usize>::MIN.saturating_add(2),
            allow_locked_moves: false,
            min_overlap_ratio: DEFAULT_MIN_OVERLAP_RATIO,
        }
    }
}

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// A puzzle needs at least a 2×2 grid; a single tile can never be shuffled out of place.
    #[error("grid size must be at least 2")]
    GridTooSmall,
    /// The number of payloads supplied does not match `grid_size²`.
    #[error("expected {expected} payloads, got {actual}")]
    PayloadCountMismatch {
        /// `grid_size²`.
        expected: usize,
        /// The number supplied.
        actual: usize,
    },
    /// The minimum overlap ratio must lie in `(0, 1]`.
    #[error("minimum overlap ratio must be in (0, 1]")]
    OverlapRatioOutOfRange,
}

/// Builds a [`Puzzle`] from one payload per tile, e.g. the pieces of a sliced image.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Payloads are given in row-major order: the payload at position `i` belongs in slot `i`.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder<P> {
    config: PuzzleConfig,
    payloads: Vec<P>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl<P> Default for PuzzleBuilder<P> {
    fn default() -> Self {
        Self::with_config(PuzzleConfig::default())
    }
}

impl<P> PuzzleBuilder<P> {
    /// Construct a new builder for a `grid_size × grid_size` puzzle with otherwise default settings.
    ///
    /// Enters a [`GridTooSmall`](BuilderInvalidReason::GridTooSmall) invalid state if `grid_size` is 1.
    pub fn with_grid_size(grid_size: GridSize) -> Self {
        Self::with_config(PuzzleConfig { grid_size, ..PuzzleConfig::default() })
    }

    /// Construct a new builder from a full set of settings, validating them as the individual setters would.
    pub fn with_config(config: PuzzleConfig) -> Self {
        let mut builder = Self {
            config,
            payloads: Vec::new(),
            invalid_reasons: Vec::new(),
        };

        if config.grid_size.get() < 2 {
            builder.invalid_reasons.push(BuilderInvalidReason::GridTooSmall);
        }
        builder.min_overlap_ratio(config.min_overlap_ratio);

        builder
    }

    fn slot_count(&self) -> usize {
        self.config.grid_size.get() * self.config.grid_size.get()
    }

    /// Allow or forbid moving tiles which are already in their correct slot.
    pub fn allow_locked_moves(&mut self, allow: bool) -> &mut Self {
        self.config.allow_locked_moves = allow;
        self
    }

    /// Set how much of a dragged tile must cover another for the two to swap.
    ///
    /// Enters an [`OverlapRatioOutOfRange`](BuilderInvalidReason::OverlapRatioOutOfRange) invalid state unless `ratio` is in `(0, 1]`.
    pub fn min_overlap_ratio(&mut self, ratio: f64) -> &mut Self {
        if ratio > 0.0 && ratio <= 1.0 {
            self.config.min_overlap_ratio = ratio;
        } else {
            self.invalid_reasons.push(BuilderInvalidReason::OverlapRatioOutOfRange);
        }
        self
    }

    /// Set the payload of every tile in row-major order, replacing any set before.
    ///
    /// Enters a [`PayloadCountMismatch`](BuilderInvalidReason::PayloadCountMismatch) invalid state if there are not exactly `grid_size²` of them.
    pub fn payloads(&mut self, payloads: Vec<P>) -> &mut Self {
        if payloads.len() != self.slot_count() {
            self.invalid_reasons.push(BuilderInvalidReason::PayloadCountMismatch {
                expected: self.slot_count(),
                actual: payloads.len(),
            });
        }
        self.payloads = payloads;
        self
    }

    /// Produce the payload of every tile from its solved [`Location`], e.g. by cropping one cell out of an image.
    pub fn payloads_from_fn<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(Location) -> P,
    {
        let grid_size = self.config.grid_size;
        self.payloads = (0..self.slot_count())
            .map(|slot| f(Location::from_slot(slot, grid_size)))
            .collect_vec();
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a solved, unshuffled [`Puzzle`].
    /// Call [`Puzzle::start`] to shuffle it.
    ///
    /// If the builder is invalid for any reason, or no payloads were ever supplied, the returned [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Puzzle<P>, Vec<BuilderInvalidReason>>
    where
        P: Clone,
    {
        let mut reasons = self.invalid_reasons.clone();
        if self.payloads.len() != self.slot_count() && !reasons.iter().any(|r| matches!(r, BuilderInvalidReason::PayloadCountMismatch { .. })) {
            reasons.push(BuilderInvalidReason::PayloadCountMismatch {
                expected: self.slot_count(),
                actual: self.payloads.len(),
            });
        }
        if !reasons.is_empty() {
            return Err(reasons);
        }

        let mut grid = Grid::new(self.config.grid_size);
        // correct indices are 0..n by construction
        grid.set_tiles(self.payloads.iter()
            .cloned()
            .enumerate()
            .map(|(slot, payload)| Tile::solved(payload, slot))
            .collect_vec());

        Ok(Puzzle::new(grid, self.config))
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::{BuilderInvalidReason, PuzzleBuilder, PuzzleConfig};
    use crate::location::Location;

    #[test]
    fn defaults_match_a_three_by_three_puzzle() {
        let config = PuzzleConfig::default();
        assert_eq!(config.grid_size.get(), 3);
        assert!(!config.allow_locked_moves);
        assert_eq!(config.min_overlap_ratio, 0.2);
    }

    #[test]
    fn builds_solved_puzzle() {
        let puzzle = PuzzleBuilder::with_grid_size(NonZero::new(2).unwrap())
            .payloads(vec!['a', 'b', 'c', 'd'])
            .allow_locked_moves(true)
            .build()
            .unwrap();

        assert!(puzzle.grid().is_complete());
        assert!(puzzle.config().allow_locked_moves);
        assert_eq!(*puzzle.grid().tiles()[2].payload(), 'c');
    }

    #[test]
    fn payloads_from_locations() {
        let puzzle = PuzzleBuilder::with_grid_size(NonZero::new(3).unwrap())
            .payloads_from_fn(|location| location)
            .build()
            .unwrap();

        assert_eq!(*puzzle.grid().tiles()[5].payload(), Location(2, 1));
        assert_eq!(*puzzle.grid().tiles()[6].payload(), Location(0, 2));
    }

    #[test]
    fn invalid_reasons_accumulate() {
        let mut builder = PuzzleBuilder::with_grid_size(NonZero::new(1).unwrap());
        builder.min_overlap_ratio(0.0).payloads(vec![(), ()]);

        assert_eq!(builder.is_valid(), Some(&vec![
            BuilderInvalidReason::GridTooSmall,
            BuilderInvalidReason::OverlapRatioOutOfRange,
            BuilderInvalidReason::PayloadCountMismatch { expected: 1, actual: 2 },
        ]));
        assert!(builder.build().is_err());
    }

    #[test]
    fn missing_payloads_fail_to_build() {
        let builder: PuzzleBuilder<u8> = PuzzleBuilder::default();
        assert!(builder.is_valid().is_none());
        assert_eq!(builder.build().err(), Some(vec![
            BuilderInvalidReason::PayloadCountMismatch { expected: 9, actual: 0 },
        ]));
    }
}
