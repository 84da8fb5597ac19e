//! Greedy playback of a learned table in the text console
//!
//! Prints the grid, the chosen action and the reward for every step, pausing
//! between steps so the run can be followed. A step cap stops policies that
//! circle forever without eating or crashing.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

use crate::game::GameConfig;
use crate::rl::{load_q_table, QAgent, QTable, SnakeEnvironment};

/// How a playback run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOutcome {
    pub steps: usize,
    pub foods: u32,
    pub crashed: bool,
}

pub struct PlayMode {
    agent: QAgent,
    env: SnakeEnvironment,
    delay: Duration,
    max_steps: usize,
}

impl PlayMode {
    pub fn new(table: QTable, game_config: GameConfig, delay: Duration, max_steps: usize) -> Result<Self> {
        let env = SnakeEnvironment::new(game_config).context("Failed to create environment")?;

        Ok(Self {
            agent: QAgent::greedy(table),
            env,
            delay,
            max_steps,
        })
    }

    /// Load a saved table and play it on the grid it was trained on
    ///
    /// `grid_size` overrides the saved grid size.
    pub fn from_file(
        path: &Path,
        grid_size: Option<usize>,
        seed: Option<u64>,
        delay: Duration,
        max_steps: usize,
    ) -> Result<Self> {
        let (table, metadata) = load_q_table(path)
            .with_context(|| format!("Failed to load value table from {:?}", path))?;

        let grid_size = grid_size
            .or(metadata.as_ref().map(|m| m.grid_size))
            .unwrap_or(GameConfig::default().grid_size);

        if let Some(metadata) = &metadata {
            tracing::info!(
                "Loaded {} entries trained for {} episodes on a {}x{} grid",
                table.len(),
                metadata.episodes_trained,
                metadata.grid_size,
                metadata.grid_size
            );
        }

        let game_config = GameConfig {
            grid_size,
            seed,
        };
        Self::new(table, game_config, delay, max_steps)
    }

    /// Play one episode, writing every frame to `out`
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<PlaybackOutcome> {
        let mut state = self.env.reset();
        let mut outcome = PlaybackOutcome {
            steps: 0,
            foods: 0,
            crashed: false,
        };

        while outcome.steps < self.max_steps {
            writeln!(out, "{}", self.env.render())?;

            let action = self.agent.choose_action(&state);
            writeln!(out, "Action: {}", action)?;

            let (next_state, reward, done) = self.env.step(action)?;
            writeln!(out, "Reward: {}", reward)?;
            out.flush()?;

            state = next_state;
            outcome.steps += 1;

            if done {
                outcome.crashed = true;
                writeln!(out, "Game Over")?;
                writeln!(out, "{}", self.env.render())?;
                break;
            }

            if !self.delay.is_zero() {
                sleep(self.delay);
            }
        }

        if !outcome.crashed {
            writeln!(out, "Stopped after {} steps", outcome.steps)?;
        }

        outcome.foods = self.env.score();
        tracing::info!(
            steps = outcome.steps,
            foods = outcome.foods,
            crashed = outcome.crashed,
            "playback finished"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, Observation, Position};
    use crate::rl::{save_q_table, ModelMetadata, QLearningConfig};
    use tempfile::TempDir;

    #[test]
    fn test_empty_table_walks_up_into_wall() {
        // Every estimate is 0.0, so the greedy choice is always UP.
        let config = GameConfig::new(10).with_seed(0);
        let mut mode = PlayMode::new(QTable::new(), config, Duration::ZERO, 100).unwrap();
        let mut out = Vec::new();

        let outcome = mode.run(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(outcome.crashed);
        assert!(outcome.steps <= 6);
        assert!(text.contains("Action: UP"));
        assert!(text.contains("Reward: -1"));
        assert!(text.contains("Game Over"));
    }

    #[test]
    fn test_step_cap_stops_loops() {
        // Make the agent bounce between two cells forever.
        let mut table = QTable::new();
        for fx in 0..10 {
            for fy in 0..10 {
                let food = Position::new(fx, fy);
                table.set(Observation::new(Position::new(5, 5), food), Action::Right, 1.0);
                table.set(Observation::new(Position::new(6, 5), food), Action::Left, 1.0);
            }
        }
        let config = GameConfig::new(10).with_seed(0);
        let mut mode = PlayMode::new(table, config, Duration::ZERO, 7).unwrap();

        let outcome = mode.run(&mut std::io::sink()).unwrap();

        // Food may sit on the path and end the bounce early, otherwise the cap holds.
        assert!(outcome.steps <= 7);
        if !outcome.crashed {
            assert_eq!(outcome.steps, 7);
        }
    }

    #[test]
    fn test_from_file_uses_saved_grid_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("q_table.json");
        let metadata = ModelMetadata::new(QLearningConfig::default(), 6, 0, 0);
        save_q_table(&QTable::new(), &metadata, &path).unwrap();

        let mode = PlayMode::from_file(&path, None, Some(1), Duration::ZERO, 10).unwrap();
        assert_eq!(mode.env.grid_size(), 6);

        let mode = PlayMode::from_file(&path, Some(8), Some(1), Duration::ZERO, 10).unwrap();
        assert_eq!(mode.env.grid_size(), 8);
    }
}
