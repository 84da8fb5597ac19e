//! Training mode for the Q-learning agent
//!
//! Runs episodes in the Snake environment, feeds every (optionally shaped)
//! transition to the agent, logs rolling statistics and periodically saves
//! the value table.
//!
//! # Example
//!
//! ```rust,no_run
//! use q_snake::modes::{TrainConfig, TrainMode};
//! use std::path::PathBuf;
//!
//! let mut config = TrainConfig::new(2000);
//! config.save_path = Some(PathBuf::from("models/q_table.json"));
//!
//! let mut train_mode = TrainMode::new(config)?;
//! train_mode.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

use crate::game::GameConfig;
use crate::metrics::TrainingStats;
use crate::rl::{
    save_q_table, DistanceShaping, ModelMetadata, NoShaping, QAgent, QLearningConfig,
    RewardShaper, SnakeEnvironment, Transition,
};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub num_episodes: usize,

    /// Episodes are cut off after this many steps
    pub max_steps_per_episode: usize,

    /// Where to save the final table; `None` keeps it in memory only
    pub save_path: Option<PathBuf>,

    /// Save a checkpoint every N episodes (0 disables checkpoints)
    pub checkpoint_frequency: usize,

    /// Log training progress every N episodes
    pub log_frequency: usize,

    /// Apply distance-based reward shaping
    pub shaping: bool,

    /// Print the grid after every step, pausing this long between steps
    pub render_delay: Option<Duration>,

    /// Game configuration (grid size, seed)
    pub game_config: GameConfig,

    /// Q-learning hyperparameters
    pub q_config: QLearningConfig,
}

impl TrainConfig {
    /// Create a new training configuration with defaults
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            max_steps_per_episode: 200,
            save_path: None,
            checkpoint_frequency: 0,
            log_frequency: 100,
            shaping: true,
            render_delay: None,
            game_config: GameConfig::default(),
            q_config: QLearningConfig::default(),
        }
    }
}

/// Totals for a single episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    pub reward: f64,
    pub steps: usize,
    pub foods: u32,
    /// Whether the episode ended in a collision rather than the step cap
    pub crashed: bool,
}

/// Training mode for the Q-learning agent
pub struct TrainMode {
    agent: QAgent,
    env: SnakeEnvironment,
    shaper: Box<dyn RewardShaper>,
    stats: TrainingStats,
    config: TrainConfig,

    /// Current episode number
    current_episode: usize,
}

impl TrainMode {
    /// Create a new training mode with an empty table
    pub fn new(config: TrainConfig) -> Result<Self> {
        let agent = QAgent::new(config.q_config.clone());
        Self::with_agent(config, agent)
    }

    /// Continue training an existing agent
    pub fn with_agent(config: TrainConfig, agent: QAgent) -> Result<Self> {
        agent
            .config()
            .validate()
            .map_err(|msg| anyhow!("invalid Q-learning config: {msg}"))?;
        if config.max_steps_per_episode == 0 {
            return Err(anyhow!("max_steps_per_episode must be at least 1"));
        }

        let env = SnakeEnvironment::new(config.game_config.clone())
            .context("Failed to create environment")?;

        let shaper: Box<dyn RewardShaper> = if config.shaping {
            Box::new(DistanceShaping::default())
        } else {
            Box::new(NoShaping)
        };

        Ok(Self {
            agent,
            env,
            shaper,
            stats: TrainingStats::new(config.log_frequency.max(1)),
            config,
            current_episode: 0,
        })
    }

    /// Swap the reward shaper
    pub fn set_shaper(&mut self, shaper: Box<dyn RewardShaper>) {
        self.shaper = shaper;
    }

    /// Run the training loop
    ///
    /// Trains for the configured number of episodes, logging progress and
    /// saving checkpoints periodically, then saves the final table.
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for episode in 0..self.config.num_episodes {
            self.current_episode = episode;

            let outcome = self.run_episode()?;
            self.stats
                .record_episode(outcome.reward, outcome.steps, outcome.foods);

            tracing::debug!(
                episode = episode + 1,
                reward = outcome.reward,
                steps = outcome.steps,
                foods = outcome.foods,
                crashed = outcome.crashed,
                "episode finished"
            );

            if self.config.log_frequency > 0 && (episode + 1) % self.config.log_frequency == 0 {
                self.log_progress(episode + 1);
            }

            if self.config.checkpoint_frequency > 0
                && (episode + 1) % self.config.checkpoint_frequency == 0
            {
                self.save_checkpoint()?;
            }
        }

        self.save_model()?;

        println!("\nTraining complete!");
        if let Some(path) = &self.config.save_path {
            println!("Value table saved to: {:?}", path);
        }
        println!("States visited: {}", self.agent.table().state_count());
        println!("\n=== SUMMARY OVER ALL EPISODES RUN ===");
        println!("{}", self.stats.format_overall());

        Ok(())
    }

    /// Run a single training episode
    pub fn run_episode(&mut self) -> Result<EpisodeOutcome> {
        let mut state = self.env.reset();
        let mut outcome = EpisodeOutcome {
            reward: 0.0,
            steps: 0,
            foods: 0,
            crashed: false,
        };

        for _ in 0..self.config.max_steps_per_episode {
            let action = self.agent.choose_action(&state);
            let (next_state, reward, done) = self
                .env
                .step(action)
                .context("Environment rejected a step during training")?;

            if let Some(delay) = self.config.render_delay {
                self.render_step(action.symbol(), reward, delay)?;
            }

            let transition = self
                .shaper
                .shape(Transition::new(state, action, reward, next_state, done));
            let td_error = self.agent.update(&transition);
            self.stats.record_td_error(td_error);

            outcome.reward += transition.reward;
            outcome.steps += 1;
            state = next_state;

            if done {
                outcome.crashed = true;
                break;
            }
        }

        outcome.foods = self.env.score();
        Ok(outcome)
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn agent(&self) -> &QAgent {
        &self.agent
    }

    pub fn into_agent(self) -> QAgent {
        self.agent
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata::new(
            self.agent.config().clone(),
            self.config.game_config.grid_size,
            self.stats.total_steps(),
            self.stats.total_episodes(),
        )
    }

    /// Save a checkpoint next to the final save path
    fn save_checkpoint(&self) -> Result<()> {
        let Some(save_path) = &self.config.save_path else {
            return Ok(());
        };

        let checkpoint_path = save_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(format!("checkpoint_ep{}.json", self.current_episode + 1));

        save_q_table(self.agent.table(), &self.metadata(), &checkpoint_path)
            .with_context(|| format!("Failed to save checkpoint to {:?}", checkpoint_path))?;

        tracing::info!("Checkpoint saved: {:?}", checkpoint_path);

        Ok(())
    }

    /// Save the final trained table
    fn save_model(&self) -> Result<()> {
        let Some(save_path) = &self.config.save_path else {
            return Ok(());
        };

        save_q_table(self.agent.table(), &self.metadata(), save_path)
            .with_context(|| format!("Failed to save final table to {:?}", save_path))
    }

    fn render_step(&self, action: &str, reward: f64, delay: Duration) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", self.env.render())?;
        writeln!(stdout, "Action: {} Reward: {}", action, reward)?;
        stdout.flush()?;
        sleep(delay);
        Ok(())
    }

    /// Print training header information
    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Q-Learning Training - Snake");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.num_episodes);
        println!("Max steps per episode: {}", self.config.max_steps_per_episode);
        println!(
            "Grid: {0}x{0}",
            self.config.game_config.grid_size
        );
        println!("Q-learning config:");
        println!("  Alpha: {}", self.agent.config().alpha);
        println!("  Gamma: {}", self.agent.config().gamma);
        println!("  Epsilon: {}", self.agent.config().epsilon);
        println!(
            "  Terminal bootstrap: {}",
            if self.agent.config().zero_terminal_target {
                "off"
            } else {
                "on"
            }
        );
        println!("Reward shaping: {}", if self.config.shaping { "on" } else { "off" });
        if self.config.checkpoint_frequency > 0 {
            println!("Checkpoints: Every {} episodes", self.config.checkpoint_frequency);
        }
        println!("Logging: Every {} episodes", self.config.log_frequency);
        if let Some(path) = &self.config.save_path {
            println!("Save path: {:?}", path);
        }
        println!("{}", "=".repeat(70));
        println!();
    }

    fn log_progress(&self, episode: usize) {
        tracing::info!(
            "[Episode {}/{}] {}",
            episode,
            self.config.num_episodes,
            self.stats.format_summary()
        );
    }
}
