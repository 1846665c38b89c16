//! Run command - load or train the brain, then watch the mouse

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, Brain},
    cli::{
        config::{BrainArgs, DisplayArgs, TrainingArgs},
        output::{print_frame, print_replay_outcome, print_training_result},
    },
    gridworld::GridWorld,
    pipeline::replay,
};

#[derive(Parser, Debug, Clone)]
#[command(about = "Load the cached brain (or train one), then replay the mouse")]
pub struct RunArgs {
    #[command(flatten)]
    pub brain: BrainArgs,

    /// Train from scratch even if a cached brain exists
    #[arg(long)]
    pub retrain: bool,

    #[command(flatten)]
    pub training: TrainingArgs,

    #[command(flatten)]
    pub display: DisplayArgs,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let app = App::new();
    let config = args.training.agent_config()?;
    let path = args.brain.brain.as_path();

    if args.retrain {
        println!("🔁 Retraining the mouse from scratch (this may take a moment)...");
    } else if app.table_repository().exists(path) {
        println!("🧠 Memory found! Loading the pre-trained brain...");
    } else {
        println!("👶 No memory found. Training the mouse (this may take a moment)...");
    }

    let brain = if args.retrain {
        let (table, result) = app.train(&config, args.training.observers()?)?;
        app.save(&table, &config, path)
            .with_context(|| format!("failed to save brain to {}", path.display()))?;
        Brain::Trained { table, result }
    } else {
        app.load_or_train(path, &config, args.training.observers()?)
            .with_context(|| format!("failed to load or train brain at {}", path.display()))?
    };

    if let Brain::Trained { result, .. } = &brain {
        println!("✅ Training complete. Brain saved to {}", path.display());
        print_training_result(result);
        if let Some(summary) = &args.training.summary {
            result
                .save(summary)
                .with_context(|| format!("failed to write summary {}", summary.display()))?;
        }
    }

    println!("\nWatch the mouse use its memory:");
    let glyphs = args.display.glyphs();
    let mut env = GridWorld::new(config.board.clone());
    if let Some(seed) = config.seed {
        env.reseed(seed);
    }
    let result = replay(
        brain.table(),
        &mut env,
        &args.display.replay_config(),
        |frame| print_frame(frame, &glyphs),
    )?;
    print_replay_outcome(&result);

    Ok(())
}
