//! Random-action baseline
//!
//! Plays episodes with uniformly random actions and raw rewards, giving a
//! reference point for what training adds.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game::{Action, GameConfig};
use crate::metrics::TrainingStats;
use crate::rl::SnakeEnvironment;

pub struct BaselineMode {
    env: SnakeEnvironment,
    rng: ChaCha8Rng,
    stats: TrainingStats,
    num_episodes: usize,
    max_steps_per_episode: usize,
}

impl BaselineMode {
    pub fn new(
        game_config: GameConfig,
        num_episodes: usize,
        max_steps_per_episode: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        let env = SnakeEnvironment::new(game_config).context("Failed to create environment")?;
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            env,
            rng,
            stats: TrainingStats::new(num_episodes.max(1)),
            num_episodes,
            max_steps_per_episode,
        })
    }

    /// Play every episode and return the collected statistics
    pub fn run(&mut self) -> Result<&TrainingStats> {
        for _ in 0..self.num_episodes {
            self.env.reset();
            let mut total_reward = 0.0;
            let mut steps = 0;

            for _ in 0..self.max_steps_per_episode {
                let action = Action::ALL[self.rng.gen_range(0..Action::ALL.len())];
                let (_, reward, done) = self.env.step(action)?;
                total_reward += reward;
                steps += 1;

                if done {
                    break;
                }
            }

            self.stats
                .record_episode(total_reward, steps, self.env.score());
        }

        tracing::debug!("baseline finished: {}", self.stats.format_summary());

        Ok(&self.stats)
    }

    /// Print the report in the same shape as the training summary
    pub fn print_report(&self) {
        println!("=== RANDOM AGENT BASELINE (no learning) ===");
        println!("Episodes: {}", self.num_episodes);
        println!("{}", self.stats.format_overall());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_runs_every_episode() {
        let mut mode = BaselineMode::new(GameConfig::new(10).with_seed(1), 20, 50, Some(2)).unwrap();
        let stats = mode.run().unwrap();

        assert_eq!(stats.total_episodes(), 20);
        assert!(stats.total_steps() <= 20 * 50);
        assert!(stats.overall_mean_length() >= 1.0);
    }

    #[test]
    fn test_rewards_follow_raw_scheme() {
        let mut mode = BaselineMode::new(GameConfig::new(5).with_seed(4), 30, 100, Some(8)).unwrap();
        let stats = mode.run().unwrap();

        // Raw rewards: +1 per food, at most one -1 per episode.
        let min = stats.overall_mean_foods() - 1.0;
        let max = stats.overall_mean_foods();
        let mean = stats.overall_mean_reward();
        assert!(mean >= min - 1e-9 && mean <= max + 1e-9);
    }
}
