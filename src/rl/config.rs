//! Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the tabular Q-learning agent
///
/// # Example
///
/// ```rust
/// use q_snake::rl::QLearningConfig;
///
/// let config = QLearningConfig {
///     epsilon: 0.2,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Learning rate (alpha): fraction of the TD error applied per update
    ///
    /// Default: 0.1
    pub alpha: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Default: 0.9
    pub gamma: f64,

    /// Exploration rate (epsilon) of the epsilon-greedy policy
    ///
    /// Default: 0.1
    pub epsilon: f64,

    /// Drop the bootstrap term on terminal transitions
    ///
    /// When false the target is always `reward + gamma * max_next`, even
    /// when the episode just ended.
    ///
    /// Default: false
    #[serde(default)]
    pub zero_terminal_target: bool,

    /// Seed for exploration; `None` draws one from the OS
    #[serde(default)]
    pub seed: Option<u64>,
}

impl QLearningConfig {
    /// Create a new configuration with default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Same hyperparameters with exploration disabled
    pub fn greedy(&self) -> Self {
        Self {
            epsilon: 0.0,
            ..self.clone()
        }
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(format!("alpha must be in (0, 1], got {}", self.alpha));
        }

        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1], got {}", self.gamma));
        }

        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(format!("epsilon must be in [0, 1], got {}", self.epsilon));
        }

        Ok(())
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            zero_terminal_target: false,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QLearningConfig::default();
        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.epsilon, 0.1);
        assert!(!config.zero_terminal_target);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_greedy_disables_exploration_only() {
        let config = QLearningConfig {
            alpha: 0.5,
            ..Default::default()
        };
        let greedy = config.greedy();
        assert_eq!(greedy.epsilon, 0.0);
        assert_eq!(greedy.alpha, 0.5);
        assert_eq!(greedy.gamma, config.gamma);
    }

    #[test]
    fn test_validation_alpha() {
        let mut config = QLearningConfig::default();
        config.alpha = 0.0;
        assert!(config.validate().is_err());

        config.alpha = 1.5;
        assert!(config.validate().is_err());

        config.alpha = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_gamma_out_of_range() {
        let mut config = QLearningConfig::default();
        config.gamma = 1.5;
        assert!(config.validate().is_err());

        config.gamma = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_epsilon_out_of_range() {
        let mut config = QLearningConfig::default();
        config.epsilon = -0.01;
        assert!(config.validate().is_err());

        config.epsilon = f64::NAN;
        assert!(config.validate().is_err());

        config.epsilon = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let config: QLearningConfig =
            serde_json::from_str(r#"{"alpha":0.2,"gamma":0.8,"epsilon":0.05}"#).unwrap();
        assert_eq!(config.alpha, 0.2);
        assert!(!config.zero_terminal_target);
        assert_eq!(config.seed, None);
    }
}
