use std::num::NonZero;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use swaptile::{DragOutcome, GridSize, Puzzle, PuzzleBuilder, PuzzleObserver, Rect, ShuffleMode};
use tracing::info;

const BOARD: Rect = Rect { x: 0.0, y: 0.0, width: 900.0, height: 900.0 };

/// Shuffle a puzzle and solve it again by dragging tiles, the way a player would.
#[derive(Parser)]
#[command(name = "player", version)]
struct Cli {
    #[arg(long, default_value_t = NonZero::new(3).unwrap())]
    grid_size: GridSize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Let tiles already in place be moved again.
    #[arg(long)]
    allow_locked: bool,
    /// Moves to make before reshuffling once.
    #[arg(long, default_value_t = 3)]
    reshuffle_after: usize,
    #[arg(long, default_value_t = ShuffleMode::UnlockedOnly)]
    mode: ShuffleMode,
}

struct Announcer;

impl PuzzleObserver for Announcer {
    fn puzzle_did_load(&mut self, grid_size: GridSize) {
        info!("{0}x{0} puzzle ready", grid_size);
    }

    fn puzzle_did_complete(&mut self) {
        info!("solved");
    }
}

/// Drag the first misplaced tile onto the slot it belongs in.
fn play_one(puzzle: &mut Puzzle<()>) -> Option<DragOutcome> {
    let slot = puzzle.grid().tiles().iter().position(|tile| !tile.is_locked())?;
    let home = puzzle.grid().tiles()[slot].correct_index();

    let frames = puzzle.frames(BOARD);
    let outcome = puzzle.handle_drag_end(slot, frames[home], &frames);
    info!(slot, home, ?outcome, locked = puzzle.grid().locked_count(), "move");
    Some(outcome)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let mut puzzle = PuzzleBuilder::with_grid_size(cli.grid_size)
        .payloads(vec![(); cli.grid_size.get() * cli.grid_size.get()])
        .allow_locked_moves(cli.allow_locked)
        .build()
        .map_err(|reasons| reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))?;
    puzzle.set_observer(Box::new(Announcer));

    let mut rng = ChaCha20Rng::seed_from_u64(cli.seed);
    puzzle.start(&mut rng)?;
    print!("{}", puzzle.grid());

    let mut moves = 0;
    while !puzzle.is_complete() {
        if moves == cli.reshuffle_after {
            puzzle.reshuffle(cli.mode, &mut rng)?;
            info!(mode = %cli.mode, locked = puzzle.grid().locked_count(), "reshuffled");
        }
        match play_one(&mut puzzle) {
            Some(_) => moves += 1,
            None => break,
        }
    }

    print!("{}", puzzle.grid());
    println!("{} moves", moves);
    Ok(())
}
