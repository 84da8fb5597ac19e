use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{stdin, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use q_snake::game::GameConfig;
use q_snake::metrics::{HighScoreStore, DEFAULT_HIGH_SCORE_FILE};
use q_snake::modes::{
    BaselineMode, ConsoleMode, HumanMode, PlayMode, TrainConfig, TrainMode, VisualizeMode,
};
use q_snake::rl::QLearningConfig;

#[derive(Parser)]
#[command(name = "q_snake")]
#[command(version, about = "Snake on a grid, learned with tabular Q-learning")]
struct Cli {
    #[arg(long, value_enum, default_value = "train")]
    mode: Mode,

    /// Side length of the square grid (defaults to the saved size for play/watch)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Episodes to run (train, baseline)
    #[arg(long, default_value = "2000")]
    episodes: usize,

    /// Steps before an episode is cut off
    #[arg(long, default_value = "200")]
    max_steps: usize,

    /// Learning rate
    #[arg(long, default_value = "0.1")]
    alpha: f64,

    /// Discount factor
    #[arg(long, default_value = "0.9")]
    gamma: f64,

    /// Exploration rate
    #[arg(long, default_value = "0.1")]
    epsilon: f64,

    /// Train on raw rewards, without the distance bonus
    #[arg(long)]
    no_shaping: bool,

    /// Do not bootstrap from the next state on terminal transitions
    #[arg(long)]
    zero_terminal_target: bool,

    /// Seed for food placement and exploration
    #[arg(long)]
    seed: Option<u64>,

    /// Value table to save to (train) or load from (play, watch)
    #[arg(long, default_value = "models/q_table.json")]
    table: PathBuf,

    /// Pause between rendered steps, in milliseconds
    #[arg(long, default_value = "300")]
    delay_ms: u64,

    /// Print the grid after every training step
    #[arg(long)]
    render: bool,

    /// Save a checkpoint every N episodes (0 disables)
    #[arg(long, default_value = "0")]
    checkpoint_frequency: usize,

    /// Log progress every N episodes
    #[arg(long, default_value = "100")]
    log_frequency: usize,

    /// High score file for human modes
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Train a value table
    Train,
    /// Greedy playback of a saved table in the console
    Play,
    /// Greedy playback in the terminal UI
    Watch,
    /// Random-action reference run
    Baseline,
    /// Play by typing w/a/s/d
    Console,
    /// Play with keyboard controls in the terminal UI
    Human,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            grid_size: self.grid_size.unwrap_or(GameConfig::default().grid_size),
            seed: self.seed,
        }
    }

    fn q_config(&self) -> QLearningConfig {
        QLearningConfig {
            alpha: self.alpha,
            gamma: self.gamma,
            epsilon: self.epsilon,
            zero_terminal_target: self.zero_terminal_target,
            seed: self.game_config().policy_seed(),
        }
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.mode {
        Mode::Train => {
            let mut config = TrainConfig::new(cli.episodes);
            config.max_steps_per_episode = cli.max_steps;
            config.save_path = Some(cli.table.clone());
            config.checkpoint_frequency = cli.checkpoint_frequency;
            config.log_frequency = cli.log_frequency;
            config.shaping = !cli.no_shaping;
            config.render_delay = cli.render.then(|| cli.delay());
            config.game_config = cli.game_config();
            config.q_config = cli.q_config();

            let mut train_mode = TrainMode::new(config)?;
            train_mode.run()?;
        }
        Mode::Play => {
            let mut play_mode =
                PlayMode::from_file(&cli.table, cli.grid_size, cli.seed, cli.delay(), cli.max_steps)?;
            play_mode.run(&mut stdout().lock())?;
        }
        Mode::Watch => {
            let mut visualize_mode =
                VisualizeMode::from_file(&cli.table, cli.grid_size, cli.seed, cli.max_steps)?;
            visualize_mode.run().await?;
        }
        Mode::Baseline => {
            let game_config = cli.game_config();
            let action_seed = game_config.policy_seed();
            let mut baseline =
                BaselineMode::new(game_config, cli.episodes, cli.max_steps, action_seed)?;
            baseline.run()?;
            baseline.print_report();
        }
        Mode::Console => {
            let mut console_mode = ConsoleMode::new(cli.game_config())?;
            let score = console_mode
                .run(stdin().lock(), &mut stdout().lock())
                .context("Console game failed")?;
            println!("Final score: {}", score);
        }
        Mode::Human => {
            let store = HighScoreStore::new(cli.high_score_file.clone());
            let mut human_mode = HumanMode::new(cli.game_config(), store)?;
            human_mode.run().await?;
        }
    }

    Ok(())
}
