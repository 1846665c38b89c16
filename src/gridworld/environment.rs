//! Episode state machine: reset and step semantics

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    action::Action,
    board::{BOARD_SIZE, Board, Position, START},
};
use crate::{Error, Result};

/// Reward for stepping onto the cheese
pub const GOAL_REWARD: f64 = 20.0;
/// Reward for stepping onto a trap
pub const HAZARD_REWARD: f64 = -10.0;
/// Reward for any other move, including bumping into a wall
pub const STEP_REWARD: f64 = -1.0;

/// Full Markov state visible to the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    pub agent: Position,
    pub goal: Position,
}

impl Observation {
    pub fn new(agent: Position, goal: Position) -> Self {
        Self { agent, goal }
    }

    /// (agent row, agent col, goal row, goal col)
    pub fn as_tuple(&self) -> (usize, usize, usize, usize) {
        (self.agent.row, self.agent.col, self.goal.row, self.goal.col)
    }
}

/// What happened on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepEvent {
    ReachedGoal,
    HitHazard,
    Moved,
}

impl StepEvent {
    pub fn is_terminal(self) -> bool {
        !matches!(self, StepEvent::Moved)
    }
}

/// Result of a single transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    pub terminal: bool,
    pub event: StepEvent,
}

/// Seeded generator, or one drawn from the thread RNG when `seed` is `None`
pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// The grid world environment.
///
/// Passive: the learner drives it through [`GridWorld::reset`] and
/// [`GridWorld::step`]. The only randomness is the goal placement on reset.
#[derive(Debug, Clone)]
pub struct GridWorld {
    board: Board,
    agent: Position,
    goal: Position,
    rng: StdRng,
}

impl GridWorld {
    /// Create an environment on `board` with a freshly sampled goal
    pub fn new(board: Board) -> Self {
        let mut env = Self {
            board,
            agent: START,
            goal: START,
            rng: build_rng(None),
        };
        env.reset();
        env
    }

    /// Reseed goal sampling and start a fresh episode
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    /// Reseed goal sampling in place and start a fresh episode
    pub fn reseed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
        self.reset();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn observation(&self) -> Observation {
        Observation::new(self.agent, self.goal)
    }

    /// Start a new episode: mouse back on the start cell, cheese resampled
    /// uniformly from every cell that is neither the start nor a trap.
    pub fn reset(&mut self) -> Observation {
        self.agent = START;
        self.goal = loop {
            let candidate = Position::new(
                self.rng.random_range(0..BOARD_SIZE),
                self.rng.random_range(0..BOARD_SIZE),
            );
            if self.board.is_valid_goal(candidate) {
                break candidate;
            }
        };
        self.observation()
    }

    /// Start a new episode with the cheese on a chosen cell
    pub fn reset_with_goal(&mut self, goal: Position) -> Result<Observation> {
        if !goal.in_bounds() {
            return Err(Error::InvalidGoal {
                row: goal.row,
                col: goal.col,
                reason: "outside the board".to_string(),
            });
        }
        if goal == START {
            return Err(Error::InvalidGoal {
                row: goal.row,
                col: goal.col,
                reason: "the start cell cannot hold the goal".to_string(),
            });
        }
        if self.board.is_hazard(goal) {
            return Err(Error::InvalidGoal {
                row: goal.row,
                col: goal.col,
                reason: "the goal cannot sit on a hazard".to_string(),
            });
        }
        self.agent = START;
        self.goal = goal;
        Ok(self.observation())
    }

    /// Move the mouse one cell, clamped at the walls.
    ///
    /// Reaching the cheese takes precedence over landing on a trap.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        let (d_row, d_col) = action.delta();
        let max = (BOARD_SIZE - 1) as isize;
        self.agent = Position::new(
            (self.agent.row as isize + d_row).clamp(0, max) as usize,
            (self.agent.col as isize + d_col).clamp(0, max) as usize,
        );

        let (reward, event) = if self.agent == self.goal {
            (GOAL_REWARD, StepEvent::ReachedGoal)
        } else if self.board.is_hazard(self.agent) {
            (HAZARD_REWARD, StepEvent::HitHazard)
        } else {
            (STEP_REWARD, StepEvent::Moved)
        };

        StepOutcome {
            observation: self.observation(),
            reward,
            terminal: event.is_terminal(),
            event,
        }
    }

    /// [`GridWorld::step`] for a raw action index; fails fast on indices
    /// outside 0..4 without touching the episode.
    pub fn step_index(&mut self, action: usize) -> Result<StepOutcome> {
        let action = Action::from_index(action)?;
        Ok(self.step(action))
    }
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new(Board::standard())
    }
}
