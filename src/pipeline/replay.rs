//! Greedy replay of a learned table
//!
//! The mouse follows the highest-valued action from the start cell until it
//! lands on the cheese or a trap. An under-trained table can make it pace
//! back and forth forever, so callers may bound the walk.

use std::{thread, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Result,
    gridworld::{Action, Board, GridWorld, Position, StepEvent},
    q_learning::QTable,
};

/// Replay configuration
#[derive(Debug, Clone, Default)]
pub struct ReplayConfig {
    /// Cheese position; sampled like a normal episode when `None`
    pub goal: Option<Position>,
    /// Give up after this many moves; unbounded when `None`
    pub max_steps: Option<usize>,
    /// Pause between rendered frames
    pub frame_delay: Duration,
}

impl ReplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_goal(mut self, goal: Position) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }
}

/// How a replay ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayOutcome {
    ReachedGoal,
    HitHazard,
    /// The step bound ran out before a terminal cell
    GaveUp,
}

/// One rendered moment of the replay
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Moves made so far
    pub step: usize,
    pub board: &'a Board,
    pub agent: Position,
    pub goal: Position,
    /// The move that led here; `None` for the opening frame
    pub action: Option<Action>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayResult {
    pub outcome: ReplayOutcome,
    pub goal: Position,
    pub steps: usize,
    pub total_reward: f64,
    /// Cells visited, starting with the start cell
    pub path: Vec<Position>,
}

/// Walk the greedy policy of `table` on `env`, calling `on_frame` before the
/// first move and after every move.
pub fn replay<F>(
    table: &QTable,
    env: &mut GridWorld,
    config: &ReplayConfig,
    mut on_frame: F,
) -> Result<ReplayResult>
where
    F: FnMut(&Frame<'_>),
{
    let mut observation = match config.goal {
        Some(goal) => env.reset_with_goal(goal)?,
        None => env.reset(),
    };

    let mut path = vec![observation.agent];
    let mut total_reward = 0.0;
    let mut steps = 0;

    on_frame(&Frame {
        step: 0,
        board: env.board(),
        agent: observation.agent,
        goal: observation.goal,
        action: None,
    });

    let outcome = loop {
        if config.max_steps.is_some_and(|limit| steps >= limit) {
            warn!(steps, goal = %observation.goal, "replay gave up before reaching a terminal cell");
            break ReplayOutcome::GaveUp;
        }

        if !config.frame_delay.is_zero() {
            thread::sleep(config.frame_delay);
        }

        let action = table.greedy_action(&observation);
        let step = env.step(action);
        steps += 1;
        total_reward += step.reward;
        observation = step.observation;
        path.push(observation.agent);

        on_frame(&Frame {
            step: steps,
            board: env.board(),
            agent: observation.agent,
            goal: observation.goal,
            action: Some(action),
        });

        match step.event {
            StepEvent::ReachedGoal => break ReplayOutcome::ReachedGoal,
            StepEvent::HitHazard => break ReplayOutcome::HitHazard,
            StepEvent::Moved => {}
        }
    };

    Ok(ReplayResult {
        outcome,
        goal: observation.goal,
        steps,
        total_reward,
        path,
    })
}
