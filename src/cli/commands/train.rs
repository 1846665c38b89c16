//! Train command - always train a fresh brain and save it

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::{BrainArgs, TrainingArgs},
        output::{print_evaluation, print_kv, print_metrics, print_training_result},
    },
    pipeline::{DEFAULT_EVALUATION_STEPS, MetricsObserver, evaluate_policy},
};

#[derive(Parser, Debug, Clone)]
#[command(about = "Train a fresh brain, overwriting any cached one")]
pub struct TrainArgs {
    #[command(flatten)]
    pub brain: BrainArgs,

    #[command(flatten)]
    pub training: TrainingArgs,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let app = App::new();
    let config = args.training.agent_config()?;
    let path = args.brain.brain.as_path();

    println!(
        "Training for {} episodes (α={}, γ={}, ε={})",
        config.hyperparameters.episodes,
        config.hyperparameters.learning_rate,
        config.hyperparameters.discount_factor,
        config.hyperparameters.epsilon
    );

    let metrics = MetricsObserver::new();
    let mut observers = args.training.observers()?;
    observers.push(Box::new(metrics.clone()));

    let (table, result) = app.train(&config, observers)?;
    app.save(&table, &config, path)
        .with_context(|| format!("failed to save brain to {}", path.display()))?;

    print_training_result(&result);
    print_metrics(&metrics.summary());
    print_kv("Saved to", &path.display().to_string());

    let report = evaluate_policy(&table, &config.board, DEFAULT_EVALUATION_STEPS)?;
    print_evaluation(&report);

    if let Some(summary) = &args.training.summary {
        result
            .save(summary)
            .with_context(|| format!("failed to write summary {}", summary.display()))?;
        print_kv("Summary", &summary.display().to_string());
    }

    Ok(())
}
