//! Observed transitions and reward shaping
//!
//! Shaping lives here, outside both the environment and the agent: a driver
//! passes each transition through a [`RewardShaper`] before handing it to
//! the learner, and can swap or drop the shaper without touching either.

use crate::game::{Action, Observation};

/// Bonus (or penalty) applied by [`DistanceShaping`] per step
pub const DISTANCE_SHAPING_BONUS: f64 = 0.1;

/// One (s, a, r, s', done) sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: Observation,
    pub action: Action,
    pub reward: f64,
    pub next_state: Observation,
    pub done: bool,
}

impl Transition {
    pub fn new(
        state: Observation,
        action: Action,
        reward: f64,
        next_state: Observation,
        done: bool,
    ) -> Self {
        Self {
            state,
            action,
            reward,
            next_state,
            done,
        }
    }

    /// Same transition with a different reward
    pub fn with_reward(self, reward: f64) -> Self {
        Self { reward, ..self }
    }
}

/// A pure rewrite of a transition's reward
pub trait RewardShaper {
    fn shape(&self, transition: Transition) -> Transition;
}

/// Leaves rewards untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShaping;

impl RewardShaper for NoShaping {
    fn shape(&self, transition: Transition) -> Transition {
        transition
    }
}

/// Rewards moving toward the food and penalizes moving away
///
/// Compares the head-to-food Manhattan distance before and after the move;
/// equal distances and terminal transitions are left as they are.
#[derive(Debug, Clone, Copy)]
pub struct DistanceShaping {
    pub bonus: f64,
}

impl Default for DistanceShaping {
    fn default() -> Self {
        Self {
            bonus: DISTANCE_SHAPING_BONUS,
        }
    }
}

impl RewardShaper for DistanceShaping {
    fn shape(&self, transition: Transition) -> Transition {
        if transition.done {
            return transition;
        }

        let before = transition.state.food_distance();
        let after = transition.next_state.food_distance();

        if after < before {
            transition.with_reward(transition.reward + self.bonus)
        } else if after > before {
            transition.with_reward(transition.reward - self.bonus)
        } else {
            transition
        }
    }
}
