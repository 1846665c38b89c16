//! Dense action-value table over every (mouse, cheese) observation

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    gridworld::{Action, BOARD_SIZE, Observation},
};

/// Number of entries: one per observation per action (5×5×5×5×4)
pub const TABLE_LEN: usize = BOARD_SIZE * BOARD_SIZE * BOARD_SIZE * BOARD_SIZE * Action::COUNT;

/// Q-table mapping (observation, action) pairs to Q-values
///
/// Stored flat in row-major (agent row, agent col, goal row, goal col,
/// action) order, which is also the on-disk order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: Vec<f64>,
}

impl QTable {
    /// Create a zero-initialised Q-table
    pub fn new() -> Self {
        Self {
            values: vec![0.0; TABLE_LEN],
        }
    }

    /// Wrap a flat value array; it must hold exactly [`TABLE_LEN`] entries
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.len() != TABLE_LEN {
            return Err(Error::InvalidConfiguration {
                message: format!("Q-table needs {TABLE_LEN} values, got {}", values.len()),
            });
        }
        Ok(Self { values })
    }

    /// Flat view of every value
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn offset(observation: &Observation) -> usize {
        let (agent_row, agent_col, goal_row, goal_col) = observation.as_tuple();
        debug_assert!(observation.agent.in_bounds() && observation.goal.in_bounds());
        (((agent_row * BOARD_SIZE + agent_col) * BOARD_SIZE + goal_row) * BOARD_SIZE + goal_col)
            * Action::COUNT
    }

    /// The four action values of an observation, in action index order
    pub fn action_values(&self, observation: &Observation) -> &[f64] {
        let start = Self::offset(observation);
        &self.values[start..start + Action::COUNT]
    }

    /// Get Q-value for an observation-action pair
    pub fn get(&self, observation: &Observation, action: Action) -> f64 {
        self.values[Self::offset(observation) + action.index()]
    }

    /// Set Q-value for an observation-action pair
    pub fn set(&mut self, observation: &Observation, action: Action, value: f64) {
        self.values[Self::offset(observation) + action.index()] = value;
    }

    /// Get maximum Q-value over all actions
    pub fn max_q(&self, observation: &Observation) -> f64 {
        self.action_values(observation)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Select greedy action; ties go to the lowest action index
    pub fn greedy_action(&self, observation: &Observation) -> Action {
        let values = self.action_values(observation);
        let mut best = Action::ALL[0];
        let mut best_value = values[0];
        for action in &Action::ALL[1..] {
            let value = values[action.index()];
            if value > best_value {
                best = *action;
                best_value = value;
            }
        }
        best
    }

    /// Q-learning update
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The bootstrap term is taken from `next` even when the transition was
    /// terminal. Terminal rows are never updated, so they stay at their
    /// initial value.
    pub fn q_learning_update(
        &mut self,
        observation: &Observation,
        action: Action,
        reward: f64,
        next: &Observation,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current_q = self.get(observation, action);
        let td_target = reward + discount_factor * self.max_q(next);
        let td_error = td_target - current_q;
        let new_q = current_q + learning_rate * td_error;
        self.set(observation, action, new_q);
        new_q
    }

    /// Number of entries that have moved away from zero
    pub fn visited_entries(&self) -> usize {
        self.values.iter().filter(|value| **value != 0.0).count()
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridworld::Position;

    fn obs(agent: (usize, usize), goal: (usize, usize)) -> Observation {
        Observation::new(Position::new(agent.0, agent.1), Position::new(goal.0, goal.1))
    }

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new();
        assert_eq!(qtable.values().len(), 2500);
        assert_eq!(qtable.get(&obs((0, 0), (4, 4)), Action::Up), 0.0);
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new();
        let state = obs((2, 3), (4, 1));
        qtable.set(&state, Action::Left, 1.5);
        assert_eq!(qtable.get(&state, Action::Left), 1.5);
        assert_eq!(qtable.get(&state, Action::Right), 0.0);
        assert_eq!(qtable.visited_entries(), 1);
    }

    #[test]
    fn test_layout_is_row_major() {
        let mut qtable = QTable::new();
        qtable.set(&obs((0, 0), (0, 1)), Action::Right, 7.0);
        assert_eq!(qtable.values()[4 + 3], 7.0);

        qtable.set(&obs((4, 4), (4, 4)), Action::Right, 9.0);
        assert_eq!(qtable.values()[TABLE_LEN - 1], 9.0);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::new();
        let state = obs((1, 2), (3, 3));
        qtable.set(&state, Action::Up, -0.5);
        qtable.set(&state, Action::Down, 1.5);
        qtable.set(&state, Action::Left, 0.8);
        qtable.set(&state, Action::Right, -2.0);
        assert_eq!(qtable.max_q(&state), 1.5);
    }

    #[test]
    fn test_greedy_action() {
        let mut qtable = QTable::new();
        let state = obs((1, 2), (3, 3));
        qtable.set(&state, Action::Up, 0.5);
        qtable.set(&state, Action::Down, 1.5);
        qtable.set(&state, Action::Left, 0.8);
        assert_eq!(qtable.greedy_action(&state), Action::Down);
    }

    #[test]
    fn test_greedy_ties_pick_first_index() {
        let mut qtable = QTable::new();
        let state = obs((0, 0), (2, 3));
        assert_eq!(qtable.greedy_action(&state), Action::Up);

        qtable.set(&state, Action::Up, -1.0);
        qtable.set(&state, Action::Left, 2.0);
        qtable.set(&state, Action::Right, 2.0);
        assert_eq!(qtable.greedy_action(&state), Action::Left);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new();
        let state = obs((0, 0), (0, 2));
        let next_state = obs((0, 1), (0, 2));

        qtable.set(&next_state, Action::Down, 1.0);
        qtable.set(&next_state, Action::Right, 2.0);

        let updated = qtable.q_learning_update(&state, Action::Right, -1.0, &next_state, 0.2, 0.9);

        // Q(s,→) = 0.0 + 0.2 * (-1.0 + 0.9 * 2.0 - 0.0) = 0.16
        assert!((updated - 0.16).abs() < 1e-12);
        assert_eq!(qtable.get(&state, Action::Right), updated);
    }

    #[test]
    fn test_terminal_update_still_bootstraps() {
        let mut qtable = QTable::new();
        let state = obs((0, 0), (0, 1));
        let terminal = obs((0, 1), (0, 1));
        qtable.set(&terminal, Action::Up, 5.0);

        let updated = qtable.q_learning_update(&state, Action::Right, 20.0, &terminal, 0.2, 0.9);

        // 0.2 * (20 + 0.9 * 5) = 4.9
        assert!((updated - 4.9).abs() < 1e-12);
    }

    #[test]
    fn test_from_values_checks_length() {
        assert!(QTable::from_values(vec![0.0; TABLE_LEN]).is_ok());
        assert!(QTable::from_values(vec![0.0; 10]).is_err());
    }
}
