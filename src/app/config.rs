//! Configuration types for agent creation.

use crate::{Result, gridworld::Board, q_learning::Hyperparameters};

/// Configuration for creating or loading a mouse brain.
///
/// # Examples
///
/// ```
/// use cheeseboard::app::AgentConfig;
/// use cheeseboard::q_learning::Hyperparameters;
///
/// let config = AgentConfig::new()
///     .with_seed(42)
///     .with_hyperparameters(Hyperparameters {
///         episodes: 5_000,
///         ..Hyperparameters::default()
///     });
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Board geometry the table is learned on
    pub board: Board,
    /// Learning hyperparameters
    pub hyperparameters: Hyperparameters,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Standard board, default hyperparameters, no seed.
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            hyperparameters: Hyperparameters::default(),
            seed: None,
        }
    }

    /// Set the board geometry.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Set the learning hyperparameters.
    pub fn with_hyperparameters(mut self, hyperparameters: Hyperparameters) -> Self {
        self.hyperparameters = hyperparameters;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.hyperparameters.validate()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
