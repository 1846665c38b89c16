//! Training pipeline: the episode loop

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    gridworld::{GridWorld, Position, StepEvent},
    ports::{Learner, Observer},
};

/// How often the loop logs a progress line at debug level
const LOG_EVERY: usize = 1_000;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Random seed for the learner; the environment uses `seed + 1`
    pub seed: Option<u64>,
}

impl TrainingConfig {
    pub fn new(episodes: usize) -> Self {
        Self {
            episodes,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(crate::q_learning::Hyperparameters::DEFAULT_EPISODES)
    }
}

/// Summary of a single episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode index (0-based)
    pub episode: usize,
    /// Cheese position for this episode
    pub goal: Position,
    /// Moves taken until the terminal cell
    pub steps: usize,
    /// Undiscounted sum of rewards
    pub total_reward: f64,
    /// How the episode ended
    pub event: StepEvent,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub episodes: usize,

    /// Episodes that ended on the cheese
    pub goals_reached: usize,

    /// Episodes that ended on a trap
    pub hazards_hit: usize,

    /// Moves across all episodes
    pub total_steps: usize,

    /// Fraction of episodes ending on the cheese
    pub goal_rate: f64,

    /// Average episode length
    pub mean_steps: f64,

    /// Average undiscounted episode return
    pub mean_reward: f64,
}

impl TrainingResult {
    /// Create a training result from raw tallies
    pub fn new(
        episodes: usize,
        goals_reached: usize,
        hazards_hit: usize,
        total_steps: usize,
        total_reward: f64,
    ) -> Self {
        let per_episode = |value: f64| {
            if episodes > 0 {
                value / episodes as f64
            } else {
                0.0
            }
        };

        Self {
            episodes,
            goals_reached,
            hazards_hit,
            total_steps,
            goal_rate: per_episode(goals_reached as f64),
            mean_steps: per_episode(total_steps as f64),
            mean_reward: per_episode(total_reward),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline for a single learner on the grid world
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the full episode budget; there is no early stopping.
    pub fn run(&mut self, agent: &mut dyn Learner, env: &mut GridWorld) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
            env.reseed(seed.wrapping_add(1));
        }

        let mut goals_reached = 0;
        let mut hazards_hit = 0;
        let mut total_steps = 0;
        let mut total_reward = 0.0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            let summary = self.run_episode(episode, agent, env)?;

            match summary.event {
                StepEvent::ReachedGoal => goals_reached += 1,
                StepEvent::HitHazard => hazards_hit += 1,
                StepEvent::Moved => {}
            }
            total_steps += summary.steps;
            total_reward += summary.total_reward;

            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }

            if (episode + 1).is_multiple_of(LOG_EVERY) {
                debug!(
                    episode = episode + 1,
                    goals_reached, hazards_hit, "training progress"
                );
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::new(
            self.config.episodes,
            goals_reached,
            hazards_hit,
            total_steps,
            total_reward,
        );
        info!(
            learner = agent.name(),
            episodes = result.episodes,
            goal_rate = result.goal_rate,
            mean_steps = result.mean_steps,
            "training finished"
        );
        Ok(result)
    }

    fn run_episode(
        &mut self,
        episode: usize,
        agent: &mut dyn Learner,
        env: &mut GridWorld,
    ) -> Result<EpisodeSummary> {
        let mut observation = env.reset();
        for observer in &mut self.observers {
            observer.on_episode_start(episode, &observation)?;
        }

        let mut steps = 0;
        let mut total_reward = 0.0;
        loop {
            let action = agent.select_action(&observation);
            let outcome = env.step(action);
            agent.learn(&observation, action, &outcome)?;

            for observer in &mut self.observers {
                observer.on_step(episode, steps, &observation, action, &outcome)?;
            }

            steps += 1;
            total_reward += outcome.reward;
            observation = outcome.observation;

            if outcome.terminal {
                return Ok(EpisodeSummary {
                    episode,
                    goal: observation.goal,
                    steps,
                    total_reward,
                    event: outcome.event,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::{Hyperparameters, QLearningAgent};

    #[test]
    fn test_result_rates() {
        let result = TrainingResult::new(10, 6, 4, 50, 30.0);
        assert_eq!(result.goal_rate, 0.6);
        assert_eq!(result.mean_steps, 5.0);
        assert_eq!(result.mean_reward, 3.0);

        let empty = TrainingResult::new(0, 0, 0, 0, 0.0);
        assert_eq!(empty.goal_rate, 0.0);
    }

    #[test]
    fn test_every_episode_terminates_in_goal_or_hazard() {
        let mut agent = QLearningAgent::new(Hyperparameters::default());
        let mut env = GridWorld::default();
        let mut pipeline = TrainingPipeline::new(TrainingConfig::new(200).with_seed(3));

        let result = pipeline.run(&mut agent, &mut env).unwrap();

        assert_eq!(result.episodes, 200);
        assert_eq!(result.goals_reached + result.hazards_hit, 200);
        assert!(result.total_steps >= 200);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let train = || {
            let mut agent = QLearningAgent::new(Hyperparameters::default());
            let mut env = GridWorld::default();
            let mut pipeline = TrainingPipeline::new(TrainingConfig::new(300).with_seed(17));
            pipeline.run(&mut agent, &mut env).unwrap();
            agent.into_q_table()
        };
        assert_eq!(train(), train());
    }

    #[test]
    fn test_result_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let result = TrainingResult::new(4, 3, 1, 12, 40.0);
        result.save(&path).unwrap();
        let loaded = TrainingResult::load(&path).unwrap();
        assert_eq!(loaded.goals_reached, 3);
        assert_eq!(loaded.mean_steps, 3.0);
    }
}
