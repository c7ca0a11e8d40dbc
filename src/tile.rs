use crate::location::Slot;

/// One piece of a puzzle image, tracked by the slot it belongs in and the slot it occupies now.
///
/// The payload (usually an image sub-piece) is carried along with the tile but never inspected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile<P> {
    correct_index: Slot,
    pub(crate) current_index: Slot,
    payload: P,
}

impl<P> Tile<P> {
    /// A new tile which belongs in `correct_index` and currently sits in `current_index`.
    pub fn new(payload: P, correct_index: Slot, current_index: Slot) -> Self {
        Self {
            correct_index,
            current_index,
            payload,
        }
    }

    /// A tile sitting in its own correct slot.
    pub fn solved(payload: P, correct_index: Slot) -> Self {
        Self::new(payload, correct_index, correct_index)
    }

    /// The slot this tile occupies when the puzzle is solved.
    pub fn correct_index(&self) -> Slot {
        self.correct_index
    }

    /// The slot this tile occupies now.
    pub fn current_index(&self) -> Slot {
        self.current_index
    }

    /// A tile is "locked" if it is in its correct slot.
    pub fn is_locked(&self) -> bool {
        self.current_index == self.correct_index
    }

    /// The opaque payload, e.g. the image piece shown for this tile.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the tile, yielding its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::Tile;

    #[test]
    fn lock_follows_current_index() {
        let mut tile = Tile::solved("corner", 4);
        assert!(tile.is_locked());

        tile.current_index = 2;
        assert!(!tile.is_locked());
        assert_eq!(tile.correct_index(), 4);
        assert_eq!(*tile.payload(), "corner");
    }
}
