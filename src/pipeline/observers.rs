//! Observer implementations for the training pipeline
//!
//! Observers allow composable data collection during training without coupling
//! the episode loop to specific output formats.

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::EpisodeSummary;
use crate::{Result, gridworld::StepEvent, ports::Observer};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals: usize,
    hazards: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals: 0,
            hazards: 0,
        }
    }

    fn message(&self) -> String {
        format!("cheese:{} traps:{}", self.goals, self.hazards)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match summary.event {
            StepEvent::ReachedGoal => self.goals += 1,
            StepEvent::HitHazard => self.hazards += 1,
            StepEvent::Moved => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            // Redrawing the message every episode dominates short runs.
            if summary.episode.is_multiple_of(100) {
                pb.set_message(self.message());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - tracks totals and a rolling goal rate
///
/// Clones share the same counters, so a caller can keep one handle and pass
/// another to the pipeline.
#[derive(Clone)]
pub struct MetricsObserver {
    state: Arc<Mutex<MetricsState>>,
}

struct MetricsState {
    window: usize,
    recent: VecDeque<bool>,
    episodes: usize,
    goals: usize,
    hazards: usize,
    steps: usize,
}

/// Snapshot of a metrics observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub goals_reached: usize,
    pub hazards_hit: usize,
    pub goal_rate: f64,
    pub hazard_rate: f64,
    /// Goal rate over the last `window` episodes
    pub recent_goal_rate: f64,
    pub window: usize,
    pub mean_steps: f64,
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

impl MetricsObserver {
    /// Default size of the rolling window
    pub const DEFAULT_WINDOW: usize = 500;

    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Create a metrics observer whose rolling rate covers `window` episodes
    pub fn with_window(window: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(MetricsState {
                window: window.max(1),
                recent: VecDeque::new(),
                episodes: 0,
                goals: 0,
                hazards: 0,
                steps: 0,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MetricsState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn episodes(&self) -> usize {
        self.state().episodes
    }

    /// Fraction of all episodes that found the cheese
    pub fn goal_rate(&self) -> f64 {
        let state = self.state();
        ratio(state.goals, state.episodes)
    }

    /// Fraction of all episodes that ended on a trap
    pub fn hazard_rate(&self) -> f64 {
        let state = self.state();
        ratio(state.hazards, state.episodes)
    }

    /// Goal rate over the most recent episodes only
    pub fn recent_goal_rate(&self) -> f64 {
        let state = self.state();
        ratio(
            state.recent.iter().filter(|hit| **hit).count(),
            state.recent.len(),
        )
    }

    pub fn mean_steps(&self) -> f64 {
        let state = self.state();
        ratio(state.steps, state.episodes)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        let state = self.state();
        MetricsSummary {
            episodes: state.episodes,
            goals_reached: state.goals,
            hazards_hit: state.hazards,
            goal_rate: ratio(state.goals, state.episodes),
            hazard_rate: ratio(state.hazards, state.episodes),
            recent_goal_rate: ratio(
                state.recent.iter().filter(|hit| **hit).count(),
                state.recent.len(),
            ),
            window: state.window,
            mean_steps: ratio(state.steps, state.episodes),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        let reached = summary.event == StepEvent::ReachedGoal;
        let mut state = self.state();
        state.episodes += 1;
        state.steps += summary.steps;
        if reached {
            state.goals += 1;
        } else {
            state.hazards += 1;
        }

        state.recent.push_back(reached);
        if state.recent.len() > state.window {
            state.recent.pop_front();
        }
        Ok(())
    }
}

/// JSONL observer - writes one episode summary per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| crate::Error::Io {
            operation: format!("create episode log {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        serde_json::to_writer(&mut self.writer, summary)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
