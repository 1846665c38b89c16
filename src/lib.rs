//! Cheeseboard: a tabular Q-learning mouse on a trapped grid
//!
//! This crate provides:
//! - A 5x5 grid world with fixed traps, a fixed start and a random cheese
//! - A dense Q-table indexed by mouse position, cheese position and action
//! - An epsilon-greedy Q-learning agent and its training pipeline
//! - A versioned MessagePack cache of the learned table
//! - Greedy replay and whole-board evaluation of the learned policy

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod gridworld;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
