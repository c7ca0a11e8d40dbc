use crate::location::{GridSize, Location, Slot};

/// An axis-aligned rectangle. The origin is the top left corner and `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// A rectangle with its top left corner at `(x, y)`.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// `width × height`.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// This rectangle moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Area shared with `other`; zero when the two do not overlap or only touch.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = (self.x + self.width).min(other.x + other.width) - self.x.max(other.x);
        let h = (self.y + self.height).min(other.y + other.height) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// The cell for `slot` when `self` is split into a `grid_size × grid_size` grid of equal cells.
    pub fn cell(&self, slot: Slot, grid_size: GridSize) -> Self {
        let n = grid_size.get() as f64;
        let (cell_width, cell_height) = (self.width / n, self.height / n);
        let Location(col, row) = Location::from_slot(slot, grid_size);

        Self {
            x: self.x + col as f64 * cell_width,
            y: self.y + row as f64 * cell_height,
            width: cell_width,
            height: cell_height,
        }
    }
}
