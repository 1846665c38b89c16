//! Policy command - print the greedy move on every cell for one cheese position

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::{BrainArgs, parse_position},
        output::print_section,
    },
    gridworld::{Board, Glyphs, Observation, Position, render_policy},
};

#[derive(Parser, Debug, Clone)]
#[command(about = "Show the greedy policy of a cached brain")]
pub struct PolicyArgs {
    #[command(flatten)]
    pub brain: BrainArgs,

    /// Cheese position as `row,col`
    #[arg(long, value_parser = parse_position)]
    pub goal: Position,

    /// Draw the board with ASCII instead of emoji
    #[arg(long)]
    pub ascii: bool,
}

pub fn execute(args: PolicyArgs) -> Result<()> {
    let app = App::new();
    let board = Board::standard();
    let path = args.brain.brain.as_path();

    if !board.is_valid_goal(args.goal) {
        anyhow::bail!(
            "{} cannot hold the cheese: it is off the board, the start cell or a trap",
            args.goal
        );
    }

    let table = app
        .load(path, &board, None)
        .with_context(|| format!("failed to load brain from {}", path.display()))?;

    let glyphs = if args.ascii { Glyphs::ASCII } else { Glyphs::EMOJI };
    print_section(&format!("Greedy policy with the cheese at {}", args.goal));
    print!(
        "{}",
        render_policy(&board, args.goal, &glyphs, |cell| {
            table.greedy_action(&Observation::new(cell, args.goal))
        })
    );

    Ok(())
}
