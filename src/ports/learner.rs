//! Learner port - abstraction over action-selecting agents
//!
//! The training pipeline drives any [`Learner`] through episodes of the grid
//! world. Adaptive learners update themselves after each transition; fixed
//! policies ignore the feedback.

use crate::{
    Result,
    gridworld::{Action, Observation, StepOutcome},
};

/// Learner trait - unified interface for agents walking the grid
///
/// # Examples
///
/// ```no_run
/// use cheeseboard::{
///     gridworld::{Action, Observation},
///     ports::Learner,
/// };
///
/// struct AlwaysRight;
///
/// impl Learner for AlwaysRight {
///     fn select_action(&mut self, _observation: &Observation) -> Action {
///         Action::Right
///     }
///
///     fn name(&self) -> &str {
///         "always-right"
///     }
/// }
/// ```
pub trait Learner: Send {
    /// Choose the next move for the given observation.
    fn select_action(&mut self, observation: &Observation) -> Action;

    /// Update the learner after a single transition.
    ///
    /// Called once per step, after the environment has applied `action`
    /// from `observation` and produced `outcome`.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for fixed policies.
    fn learn(
        &mut self,
        _observation: &Observation,
        _action: Action,
        _outcome: &StepOutcome,
    ) -> Result<()> {
        Ok(())
    }

    /// Get the learner's name.
    fn name(&self) -> &str;

    /// Seed the learner's internal random number generator.
    ///
    /// Training pipelines call this method when supplied with a deterministic
    /// seed. Learners without randomness can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
