//! Q-learning agent
//!
//! Off-policy TD control over the dense [`QTable`], exploring with a fixed
//! ε-greedy policy.

use rand::{Rng, rngs::StdRng};

use crate::{
    Result,
    gridworld::{Action, Observation, StepOutcome, environment::build_rng},
    ports::Learner,
    q_learning::{hyperparameters::Hyperparameters, q_table::QTable},
};

/// Q-learning agent (off-policy TD control)
///
/// Learns the optimal Q* function by always updating toward the maximum
/// next-observation value, regardless of the action actually taken next.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    hyperparameters: Hyperparameters,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent with a zero-initialised table
    pub fn new(hyperparameters: Hyperparameters) -> Self {
        Self::with_table(QTable::new(), hyperparameters)
    }

    /// Create an agent that continues from an existing table
    pub fn with_table(q_table: QTable, hyperparameters: Hyperparameters) -> Self {
        Self {
            q_table,
            hyperparameters,
            rng: build_rng(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    /// ε-greedy action selection
    fn select_action_epsilon_greedy(&mut self, observation: &Observation) -> Action {
        if self.rng.random::<f64>() < self.hyperparameters.epsilon {
            // Explore: random action
            Action::ALL[self.rng.random_range(0..Action::COUNT)]
        } else {
            // Exploit: greedy action based on Q-values
            self.q_table.greedy_action(observation)
        }
    }
}

impl Learner for QLearningAgent {
    fn select_action(&mut self, observation: &Observation) -> Action {
        self.select_action_epsilon_greedy(observation)
    }

    fn learn(
        &mut self,
        observation: &Observation,
        action: Action,
        outcome: &StepOutcome,
    ) -> Result<()> {
        self.q_table.q_learning_update(
            observation,
            action,
            outcome.reward,
            &outcome.observation,
            self.hyperparameters.learning_rate,
            self.hyperparameters.discount_factor,
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = build_rng(Some(seed));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridworld::{GridWorld, Position};

    #[test]
    fn test_greedy_when_epsilon_zero() {
        let params = Hyperparameters {
            epsilon: 0.0,
            ..Hyperparameters::default()
        };
        let mut table = QTable::new();
        let obs = Observation::new(Position::new(0, 0), Position::new(3, 3));
        table.set(&obs, Action::Down, 1.0);

        let mut agent = QLearningAgent::with_table(table, params).with_seed(1);
        for _ in 0..100 {
            assert_eq!(agent.select_action(&obs), Action::Down);
        }
    }

    #[test]
    fn test_explores_every_action_when_epsilon_one() {
        let params = Hyperparameters {
            epsilon: 1.0,
            ..Hyperparameters::default()
        };
        let mut agent = QLearningAgent::new(params).with_seed(4);
        let obs = Observation::new(Position::new(2, 3), Position::new(4, 4));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(agent.select_action(&obs));
        }
        assert_eq!(seen.len(), Action::COUNT);
    }

    #[test]
    fn test_learn_applies_update_rule() {
        let mut agent = QLearningAgent::new(Hyperparameters::default()).with_seed(7);
        let mut env = GridWorld::default().with_seed(7);
        let start = env.reset_with_goal(Position::new(0, 1)).unwrap();

        let outcome = env.step(Action::Right);
        agent.learn(&start, Action::Right, &outcome).unwrap();

        // 0.2 * (20 + 0.9 * 0) = 4.0
        assert!((agent.q_table().get(&start, Action::Right) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let obs = Observation::new(Position::new(1, 0), Position::new(4, 4));
        let params = Hyperparameters {
            epsilon: 0.5,
            ..Hyperparameters::default()
        };
        let mut a = QLearningAgent::new(params).with_seed(21);
        let mut b = QLearningAgent::new(params).with_seed(21);
        let picks_a: Vec<Action> = (0..50).map(|_| a.select_action(&obs)).collect();
        let picks_b: Vec<Action> = (0..50).map(|_| b.select_action(&obs)).collect();
        assert_eq!(picks_a, picks_b);
    }
}
