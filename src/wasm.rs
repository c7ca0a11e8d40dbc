//! JavaScript bindings. Tiles carry no payload here; the page keeps its own image pieces keyed by correct index.

use std::num::NonZero;

use js_sys::{Array, Float64Array};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use wasm_bindgen::prelude::*;

use crate::{DragOutcome, Puzzle, PuzzleBuilder, PuzzleConfig, Rect};

fn bounds(width: f64, height: f64) -> Rect {
    Rect::new(0.0, 0.0, width, height)
}

/// A shuffled puzzle driven from JavaScript.
#[wasm_bindgen]
pub struct WasmPuzzle {
    puzzle: Puzzle<()>,
    rng: ChaCha20Rng,
}

#[wasm_bindgen]
impl WasmPuzzle {
    /// Create and shuffle a `grid_size × grid_size` puzzle. The `seed` determines every shuffle.
    #[wasm_bindgen(constructor)]
    pub fn new(grid_size: u32, allow_locked_moves: bool, seed: u64) -> Result<WasmPuzzle, JsError> {
        let grid_size = NonZero::new(grid_size as usize).ok_or_else(|| JsError::new("grid size must be at least 2"))?;
        let config = PuzzleConfig { grid_size, allow_locked_moves, ..PuzzleConfig::default() };

        let mut puzzle = PuzzleBuilder::with_config(config)
            .payloads(vec![(); grid_size.get() * grid_size.get()])
            .build()
            .map_err(|reasons| JsError::new(&reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")))?;

        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        puzzle.start(&mut rng).map_err(|e| JsError::new(&e.to_string()))?;

        Ok(WasmPuzzle { puzzle, rng })
    }

    /// The correct index of the tile in every slot, in slot order.
    pub fn order(&self) -> Vec<u32> {
        self.puzzle.grid().tiles().iter().map(|tile| tile.correct_index() as u32).collect()
    }

    /// Whether each slot holds its own tile, in slot order.
    pub fn locked(&self) -> Array {
        self.puzzle.grid().tiles().iter().map(|tile| JsValue::from_bool(tile.is_locked())).collect()
    }

    /// Whether every tile is in place.
    #[wasm_bindgen(js_name = isComplete)]
    pub fn is_complete(&self) -> bool {
        self.puzzle.is_complete()
    }

    /// Shuffle every tile out of place again.
    pub fn shuffle(&mut self) -> Result<(), JsError> {
        self.puzzle.shuffle(&mut self.rng).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Shuffle only the tiles not yet in place.
    #[wasm_bindgen(js_name = shuffleUnlocked)]
    pub fn shuffle_unlocked(&mut self) {
        self.puzzle.shuffle_unlocked(&mut self.rng)
    }

    /// Tile frames for a `width × height` board as flat `[x, y, w, h, ...]`, in slot order.
    pub fn frames(&self, width: f64, height: f64) -> Float64Array {
        let flat = self.puzzle.frames(bounds(width, height))
            .into_iter()
            .flat_map(|r| [r.x, r.y, r.width, r.height])
            .collect::<Vec<_>>();
        Float64Array::from(flat.as_slice())
    }

    /// Release the tile from `slot` at `(x, y, w, h)` on a `width × height` board.
    ///
    /// Returns the slot it swapped with, or `undefined` if the drag should be reverted.
    #[wasm_bindgen(js_name = dragEnd)]
    #[allow(clippy::too_many_arguments)]
    pub fn drag_end(&mut self, slot: u32, x: f64, y: f64, w: f64, h: f64, width: f64, height: f64) -> Option<u32> {
        let frames = self.puzzle.frames(bounds(width, height));
        match self.puzzle.handle_drag_end(slot as usize, Rect::new(x, y, w, h), &frames) {
            DragOutcome::Swapped { to, .. } => Some(to as u32),
            _ => None,
        }
    }
}
