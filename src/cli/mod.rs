//! CLI infrastructure for the cheeseboard binary
//!
//! This module provides the command-line interface for training the mouse,
//! replaying its learned walk and inspecting its policy.

pub mod commands;
pub mod config;
pub mod output;
