//! Choosing where a dragged tile lands.

use tracing::trace;

use crate::geometry::Rect;
use crate::location::Slot;

/// Fraction of the dragged tile's area another tile must be covered by to count as a drop target.
pub const DEFAULT_MIN_OVERLAP_RATIO: f64 = 0.2;

/// A tile that a dragged tile might be dropped onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// The slot the candidate occupies.
    pub slot: Slot,
    /// The candidate's current frame, in the same space as the dragged frame.
    pub frame: Rect,
    /// Whether the candidate is in its correct slot.
    pub locked: bool,
}

/// Chooses which tile a dragged tile should swap with once it is released.
///
/// The winner is the eligible candidate sharing the most area with the dragged frame, so long as that area is at least [`min_overlap_ratio`](Self::min_overlap_ratio) of the dragged frame's own area.
/// Equal overlaps are settled in favor of whichever candidate comes first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragResolver {
    /// Whether locked tiles are eligible targets.
    pub allow_locked: bool,
    /// Minimum overlap, relative to the dragged frame's area, for a drop to count.
    pub min_overlap_ratio: f64,
}

impl Default for DragResolver {
    fn default() -> Self {
        Self {
            allow_locked: false,
            min_overlap_ratio: DEFAULT_MIN_OVERLAP_RATIO,
        }
    }
}

impl DragResolver {
    /// Pick the slot to swap with for the tile from `moving_slot`, released at `moving`.
    ///
    /// `candidates` may include the dragged tile itself; it is skipped.
    /// Returns `None` when nothing overlaps enough, meaning the drag should be reverted.
    pub fn resolve<I>(&self, moving_slot: Slot, moving: Rect, candidates: I) -> Option<Slot>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let mut best: Option<(Slot, f64)> = None;

        for candidate in candidates {
            if candidate.slot == moving_slot || (candidate.locked && !self.allow_locked) {
                continue;
            }

            let overlap = moving.intersection_area(&candidate.frame);
            if overlap > best.map_or(0.0, |(_, area)| area) {
                best = Some((candidate.slot, overlap));
            }
        }

        let threshold = moving.area() * self.min_overlap_ratio;
        match best {
            Some((slot, overlap)) if overlap >= threshold => {
                trace!(moving_slot, slot, overlap, "drop target found");
                Some(slot)
            }
            _ => {
                trace!(moving_slot, threshold, "no drop target");
                None
            }
        }
    }
}
