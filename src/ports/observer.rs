//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the training
//! loop to progress bars, metrics or output files.

use crate::{
    Result,
    gridworld::{Action, Observation, StepOutcome},
    pipeline::EpisodeSummary,
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - once per transition
///    - `on_episode_end(summary)`
/// 3. `on_training_end()` - once
///
/// # Examples
///
/// ```no_run
/// use cheeseboard::{pipeline::EpisodeSummary, ports::Observer};
///
/// struct StepCounter {
///     steps: usize,
/// }
///
/// impl Observer for StepCounter {
///     fn on_episode_end(&mut self, summary: &EpisodeSummary) -> cheeseboard::Result<()> {
///         self.steps += summary.steps;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after `reset`, before the first move of an episode.
    fn on_episode_start(&mut self, _episode: usize, _observation: &Observation) -> Result<()> {
        Ok(())
    }

    /// Called after every transition, once the learner has been updated.
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _observation: &Observation,
        _action: Action,
        _outcome: &StepOutcome,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal cell.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
