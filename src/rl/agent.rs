//! Epsilon-greedy tabular Q-learning agent

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{config::QLearningConfig, q_table::QTable, transition::Transition};
use crate::game::{Action, Observation};

/// Tabular Q-learning agent
///
/// Owns the value table and the random source for exploration. The agent
/// knows nothing about the environment beyond observations, actions and
/// rewards handed to it by a driver.
pub struct QAgent {
    table: QTable,
    config: QLearningConfig,
    rng: ChaCha8Rng,

    /// Number of updates applied
    updates: usize,
}

impl QAgent {
    /// Create an agent with an empty table
    pub fn new(config: QLearningConfig) -> Self {
        Self::with_table(QTable::new(), config)
    }

    /// Create an agent around an existing table
    pub fn with_table(table: QTable, config: QLearningConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            table,
            config,
            rng,
            updates: 0,
        }
    }

    /// Greedy agent for playback of a learned table
    pub fn greedy(table: QTable) -> Self {
        Self::with_table(table, QLearningConfig::default().greedy())
    }

    /// Epsilon-greedy action selection
    pub fn choose_action(&mut self, state: &Observation) -> Action {
        if self.rng.gen::<f64>() < self.config.epsilon {
            Action::ALL[self.rng.gen_range(0..Action::ALL.len())]
        } else {
            self.greedy_action(state)
        }
    }

    /// Action with the highest estimate; ties go to the earliest action
    pub fn greedy_action(&self, state: &Observation) -> Action {
        self.table.best_action(state)
    }

    /// Apply one Q-learning update and return the TD error
    ///
    /// `Q(s,a) += alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))`. The
    /// bootstrap term is kept on terminal transitions unless
    /// `zero_terminal_target` is set.
    pub fn update(&mut self, transition: &Transition) -> f64 {
        let current = self.table.get(&transition.state, transition.action);

        let target = if transition.done && self.config.zero_terminal_target {
            transition.reward
        } else {
            let best_next = self.table.best_value(&transition.next_state);
            transition.reward + self.config.gamma * best_next
        };

        let td_error = target - current;
        self.table.set(
            transition.state,
            transition.action,
            current + self.config.alpha * td_error,
        );
        self.updates += 1;

        td_error
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.config.epsilon = epsilon;
    }

    pub fn updates(&self) -> usize {
        self.updates
    }
}
