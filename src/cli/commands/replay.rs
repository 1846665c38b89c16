//! Replay command - watch a cached brain without training

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::{BrainArgs, DisplayArgs},
        output::{print_frame, print_replay_outcome},
    },
    gridworld::{Board, GridWorld},
    pipeline::replay,
};

#[derive(Parser, Debug, Clone)]
#[command(about = "Replay the greedy walk of a cached brain")]
pub struct ReplayArgs {
    #[command(flatten)]
    pub brain: BrainArgs,

    #[command(flatten)]
    pub display: DisplayArgs,

    /// Seed for placing the cheese
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: ReplayArgs) -> Result<()> {
    let app = App::new();
    let board = Board::standard();
    let path = args.brain.brain.as_path();

    // Replay only needs the table to fit the board, not a specific training setup.
    let table = app
        .load(path, &board, None)
        .with_context(|| format!("failed to load brain from {}", path.display()))?;

    let glyphs = args.display.glyphs();
    let mut env = GridWorld::new(board);
    if let Some(seed) = args.seed {
        env.reseed(seed);
    }
    let result = replay(&table, &mut env, &args.display.replay_config(), |frame| {
        print_frame(frame, &glyphs)
    })?;
    print_replay_outcome(&result);

    Ok(())
}
