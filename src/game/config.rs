use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Seed for food placement; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Same configuration with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed for a second random stream (exploration, random play)
    ///
    /// Offset from `seed` so it never replays the food placement stream.
    pub fn policy_seed(&self) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(1))
    }

    /// A 1x1 grid leaves no free cell for food.
    pub fn validate(&self) -> GameResult<()> {
        if self.grid_size < 2 {
            return Err(GameError::InvalidConfig(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            )));
        }

        if self.grid_size > i32::MAX as usize {
            return Err(GameError::InvalidConfig(format!(
                "grid_size {} does not fit grid coordinates",
                self.grid_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_seed_differs_from_food_seed() {
        let config = GameConfig::new(10).with_seed(7);
        assert_eq!(config.policy_seed(), Some(8));
        assert_ne!(config.policy_seed(), config.seed);

        assert_eq!(GameConfig::new(10).with_seed(u64::MAX).policy_seed(), Some(0));
        assert_eq!(GameConfig::new(10).policy_seed(), None);
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15).with_seed(7);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        assert!(GameConfig::new(0).validate().is_err());
        assert!(GameConfig::new(1).validate().is_err());
        assert!(GameConfig::new(2).validate().is_ok());
    }
}
