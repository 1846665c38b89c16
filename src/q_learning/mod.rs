//! Tabular Q-learning for the cheese board
//!
//! The mouse learns a dense action-value table indexed by its own position,
//! the cheese position and the move. Training uses one-step Q-learning:
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//!
//! with an ε-greedy behaviour policy; replay follows the greedy policy.
//!
//! ## Usage Example
//!
//! ```no_run
//! use cheeseboard::{
//!     gridworld::GridWorld,
//!     pipeline::{TrainingConfig, TrainingPipeline},
//!     q_learning::{Hyperparameters, QLearningAgent},
//! };
//!
//! let params = Hyperparameters::default();
//! let mut agent = QLearningAgent::new(params).with_seed(42);
//! let mut env = GridWorld::default();
//!
//! let mut pipeline = TrainingPipeline::new(TrainingConfig::new(params.episodes));
//! let result = pipeline.run(&mut agent, &mut env)?;
//! println!("goal rate: {:.2}", result.goal_rate);
//! # Ok::<(), cheeseboard::Error>(())
//! ```

pub mod agent;
pub mod hyperparameters;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::QLearningAgent;
pub use hyperparameters::Hyperparameters;
pub use q_table::{QTable, TABLE_LEN};
pub use serialization::{SavedQTable, TableSchema};
