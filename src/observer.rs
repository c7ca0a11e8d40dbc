use strum::{Display, VariantArray};

use crate::location::GridSize;

/// The notifications a [`Puzzle`](crate::Puzzle) raises, in the order they can happen.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum PuzzleEvent {
    /// The tiles were shuffled for the first time and are ready to be laid out.
    Loaded,
    /// The last tile reached its correct slot.
    Completed,
}

/// Receives a [`Puzzle`](crate::Puzzle)'s notifications, synchronously, on whichever thread drives the puzzle.
///
/// Both methods are optional.
pub trait PuzzleObserver {
    /// Called once, when the puzzle is first started.
    fn puzzle_did_load(&mut self, _grid_size: GridSize) {}
    /// Called on the transition from incomplete to complete.
    fn puzzle_did_complete(&mut self) {}
}

/// An observer which just remembers what it saw.
#[derive(Clone, Debug, Default)]
pub struct EventLog(pub Vec<PuzzleEvent>);

impl PuzzleObserver for EventLog {
    fn puzzle_did_load(&mut self, _grid_size: GridSize) {
        self.0.push(PuzzleEvent::Loaded);
    }

    fn puzzle_did_complete(&mut self) {
        self.0.push(PuzzleEvent::Completed);
    }
}

impl<O: PuzzleObserver + ?Sized> PuzzleObserver for std::rc::Rc<std::cell::RefCell<O>> {
    fn puzzle_did_load(&mut self, grid_size: GridSize) {
        self.borrow_mut().puzzle_did_load(grid_size)
    }

    fn puzzle_did_complete(&mut self) {
        self.borrow_mut().puzzle_did_complete()
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::PuzzleEvent;

    #[test]
    fn event_names() {
        let names = PuzzleEvent::VARIANTS.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(names, vec!["loaded", "completed"]);
    }
}
