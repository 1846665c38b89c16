//! Cheese-board grid world: a 5x5 board with a mouse, a cheese and traps

pub mod action;
pub mod board;
pub mod environment;
pub mod render;

pub use action::Action;
pub use board::{BOARD_SIZE, Board, DEFAULT_HAZARDS, Position, START};
pub use environment::{
    GOAL_REWARD, GridWorld, HAZARD_REWARD, Observation, STEP_REWARD, StepEvent, StepOutcome,
};
pub use render::{Glyphs, render_board, render_policy};
