#![warn(missing_docs)]

//! # `swaptile`
//!
//! The engine behind a sliding-tile image puzzle: an image is cut into an N×N grid of tiles, the tiles are shuffled, and the player drags them around until every tile is back where it belongs.
//! Begin by building a puzzle with a [`PuzzleBuilder`], handing it one payload (typically an image piece) per tile.
//! Call [`start()`](crate::Puzzle::start) to shuffle it, lay the tiles out with [`frames()`](crate::Puzzle::frames), and feed every released drag to [`handle_drag_end()`](crate::Puzzle::handle_drag_end).
//! Register a [`PuzzleObserver`] to hear when the puzzle is first ready and when it is solved.
//!
//! Rendering, image cropping and input handling are left to the host; the engine only ever sees opaque payloads and rectangles.
//!
//! # Internals
//! A [`Grid`] stores tiles by the slot they currently occupy, `row * grid_size + col`, and each [`Tile`] remembers the slot it belongs in.
//! A tile is "locked" while both agree; this is always computed, never stored.
//! Tiles only ever change places in pairs, so the occupied slots remain a permutation of the grid at all times.
//!
//! The opening shuffle draws whole permutations until one leaves no tile in place (a derangement).
//! About `1/e` of all permutations qualify, so this finishes after a few attempts.
//! A partial reshuffle permutes only the tiles not yet in place and, unlike the opening shuffle, may leave some in place by chance.
//!
//! When a drag ends, the [`DragResolver`] picks the eligible tile sharing the most area with the dragged one, provided that area is at least a fifth of the dragged tile.

pub use builder::{BuilderInvalidReason, PuzzleBuilder, PuzzleConfig};
pub use geometry::Rect;
pub use grid::{Grid, GridError, SwapOutcome};
pub use location::{GridSize, Location, Slot};
pub use observer::{EventLog, PuzzleEvent, PuzzleObserver};
pub use puzzle::{DragOutcome, Puzzle};
pub use resolver::{Candidate, DragResolver};
pub use shuffle::ShuffleMode;
pub use tile::Tile;

pub mod builder;
pub(crate) mod geometry;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod observer;
pub(crate) mod puzzle;
pub mod resolver;
pub(crate) mod shuffle;
pub(crate) mod tile;
#[cfg(feature = "wasm")]
pub mod wasm;
