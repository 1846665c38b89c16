//! Greedy-policy evaluation over every cheese position

use serde::{Deserialize, Serialize};

use super::replay::{ReplayConfig, ReplayOutcome, ReplayResult, replay};
use crate::{
    Result,
    gridworld::{Board, GridWorld},
    q_learning::QTable,
};

/// Default step bound per goal; far above the longest shortest path on a 5x5 board
pub const DEFAULT_EVALUATION_STEPS: usize = 50;

/// Outcome of replaying the greedy policy once for each valid goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub goals: usize,
    pub reached: usize,
    pub hazards: usize,
    pub gave_up: usize,
    /// Mean moves over the runs that reached the cheese
    pub mean_steps_to_goal: f64,
    pub runs: Vec<ReplayResult>,
}

impl EvaluationReport {
    pub fn success_rate(&self) -> f64 {
        if self.goals == 0 {
            0.0
        } else {
            self.reached as f64 / self.goals as f64
        }
    }
}

/// Replay the greedy policy from the start cell towards every valid goal.
pub fn evaluate_policy(table: &QTable, board: &Board, max_steps: usize) -> Result<EvaluationReport> {
    let mut env = GridWorld::new(board.clone());
    let mut runs = Vec::new();

    for goal in board.goal_cells() {
        let config = ReplayConfig::new().with_goal(goal).with_max_steps(max_steps);
        runs.push(replay(table, &mut env, &config, |_| {})?);
    }

    let count = |outcome: ReplayOutcome| runs.iter().filter(|r| r.outcome == outcome).count();
    let reached = count(ReplayOutcome::ReachedGoal);
    let steps_to_goal: usize = runs
        .iter()
        .filter(|r| r.outcome == ReplayOutcome::ReachedGoal)
        .map(|r| r.steps)
        .sum();

    Ok(EvaluationReport {
        goals: runs.len(),
        reached,
        hazards: count(ReplayOutcome::HitHazard),
        gave_up: count(ReplayOutcome::GaveUp),
        mean_steps_to_goal: if reached > 0 {
            steps_to_goal as f64 / reached as f64
        } else {
            0.0
        },
        runs,
    })
}
