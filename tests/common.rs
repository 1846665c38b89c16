//! Shared helpers for the cheeseboard integration tests.

#![allow(dead_code)]

use cheeseboard::{app::AgentConfig, q_learning::Hyperparameters};

/// Default hyperparameters with a shorter run, for tests that only need a table.
pub fn quick_config(episodes: usize, seed: u64) -> AgentConfig {
    AgentConfig::new()
        .with_seed(seed)
        .with_hyperparameters(Hyperparameters {
            episodes,
            ..Hyperparameters::default()
        })
}
