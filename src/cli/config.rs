//! Argument groups shared across CLI commands

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, anyhow};
use clap::Args;

use crate::{
    app::AgentConfig,
    gridworld::{Glyphs, Position},
    pipeline::{JsonlObserver, ProgressObserver, ReplayConfig},
    ports::Observer,
    q_learning::Hyperparameters,
};

/// Default location of the cached value table
pub const DEFAULT_BRAIN_PATH: &str = "mouse_brain.msgpack";

/// Parse a `row,col` cell coordinate
pub fn parse_position(value: &str) -> Result<Position> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| anyhow!("expected 'row,col', got '{value}'"))?;
    let row = row
        .trim()
        .parse()
        .with_context(|| format!("invalid row in '{value}'"))?;
    let col = col
        .trim()
        .parse()
        .with_context(|| format!("invalid column in '{value}'"))?;
    Ok(Position::new(row, col))
}

/// Location of the cached brain
#[derive(Args, Debug, Clone)]
pub struct BrainArgs {
    /// Path of the cached value table
    #[arg(long, short = 'b', default_value = DEFAULT_BRAIN_PATH)]
    pub brain: PathBuf,
}

/// Options controlling a training run
#[derive(Args, Debug, Clone, Default)]
pub struct TrainingArgs {
    /// JSON file with hyperparameters; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Learning rate α
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub discount: Option<f64>,

    /// Exploration rate ε
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the training progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Write a JSON training summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Write one JSON line per training episode to this path
    #[arg(long)]
    pub episode_log: Option<PathBuf>,
}

impl TrainingArgs {
    /// Hyperparameters from the config file (or defaults) with flag overrides
    pub fn hyperparameters(&self) -> Result<Hyperparameters> {
        let mut params = match &self.config {
            Some(path) => Hyperparameters::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Hyperparameters::default(),
        };
        if let Some(episodes) = self.episodes {
            params.episodes = episodes;
        }
        if let Some(learning_rate) = self.learning_rate {
            params.learning_rate = learning_rate;
        }
        if let Some(discount) = self.discount {
            params.discount_factor = discount;
        }
        if let Some(epsilon) = self.epsilon {
            params.epsilon = epsilon;
        }
        params.validate()?;
        Ok(params)
    }

    pub fn agent_config(&self) -> Result<AgentConfig> {
        let mut config = AgentConfig::new().with_hyperparameters(self.hyperparameters()?);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }

    pub fn observers(&self) -> Result<Vec<Box<dyn Observer>>> {
        let mut observers: Vec<Box<dyn Observer>> = Vec::new();
        if !self.no_progress {
            observers.push(Box::new(ProgressObserver::new()));
        }
        if let Some(path) = &self.episode_log {
            observers.push(Box::new(JsonlObserver::new(path)?));
        }
        Ok(observers)
    }
}

/// Options controlling how a replay is shown
#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    /// Place the cheese on `row,col` instead of a random cell
    #[arg(long, value_parser = parse_position)]
    pub goal: Option<Position>,

    /// Stop after this many moves if the mouse never finishes
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Pause between frames in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Draw the board with ASCII instead of emoji
    #[arg(long)]
    pub ascii: bool,
}

impl DisplayArgs {
    pub fn glyphs(&self) -> Glyphs {
        if self.ascii { Glyphs::ASCII } else { Glyphs::EMOJI }
    }

    pub fn replay_config(&self) -> ReplayConfig {
        let mut config = ReplayConfig::new().with_frame_delay(Duration::from_millis(self.delay_ms));
        if let Some(goal) = self.goal {
            config = config.with_goal(goal);
        }
        if let Some(max_steps) = self.max_steps {
            config = config.with_max_steps(max_steps);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3,4").unwrap(), Position::new(3, 4));
        assert_eq!(parse_position(" 0 , 1 ").unwrap(), Position::new(0, 1));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,1").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = TrainingArgs {
            episodes: Some(10),
            epsilon: Some(0.3),
            ..TrainingArgs::default()
        };
        let params = args.hyperparameters().unwrap();
        assert_eq!(params.episodes, 10);
        assert_eq!(params.epsilon, 0.3);
        assert_eq!(params.learning_rate, 0.2);
    }

    #[test]
    fn test_out_of_range_flag_is_rejected() {
        let args = TrainingArgs {
            discount: Some(1.5),
            ..TrainingArgs::default()
        };
        assert!(args.hyperparameters().is_err());
    }
}
