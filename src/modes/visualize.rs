//! Terminal UI for watching a learned table play
//!
//! The agent acts greedily; finished episodes restart on their own so the
//! screen keeps running until the viewer quits.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: New episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{stderr, Stderr},
    path::Path,
    time::Duration,
};
use tokio::time::{interval, Interval};

use crate::game::{GameConfig, Observation};
use crate::input::{InputHandler, KeyAction};
use crate::render::{PlaybackStatus, Renderer};
use crate::rl::{load_q_table, QAgent, QTable, SnakeEnvironment};

use super::human::cleanup_terminal;

/// Visualization speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationSpeed {
    /// 2 Hz
    Slow,
    /// 8 Hz, same as human mode
    Normal,
    /// 20 Hz
    Fast,
    /// ~60 Hz
    VeryFast,
}

impl VisualizationSpeed {
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }

    /// Speed for a number key, 1 to 4
    fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Self::Slow),
            2 => Some(Self::Normal),
            3 => Some(Self::Fast),
            4 => Some(Self::VeryFast),
            _ => None,
        }
    }
}

pub struct VisualizeMode {
    agent: QAgent,
    env: SnakeEnvironment,
    observation: Observation,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
    speed: VisualizationSpeed,
    /// Episodes started so far, the current one included
    episode_count: usize,
    best_score: u32,
    /// Episodes are restarted after this many steps
    max_steps: usize,
}

impl VisualizeMode {
    pub fn new(table: QTable, config: GameConfig, max_steps: usize) -> Result<Self> {
        let mut env = SnakeEnvironment::new(config).context("Failed to create environment")?;
        let observation = env.reset();

        Ok(Self {
            agent: QAgent::greedy(table),
            env,
            observation,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
            speed: VisualizationSpeed::Normal,
            episode_count: 1,
            best_score: 0,
            max_steps: max_steps.max(1),
        })
    }

    /// Load a saved table; `grid_size` overrides the size it was trained on
    pub fn from_file(
        path: &Path,
        grid_size: Option<usize>,
        seed: Option<u64>,
        max_steps: usize,
    ) -> Result<Self> {
        let (table, metadata) = load_q_table(path)
            .with_context(|| format!("Failed to load value table from {:?}", path))?;

        let grid_size = grid_size
            .or(metadata.as_ref().map(|m| m.grid_size))
            .unwrap_or(GameConfig::default().grid_size);

        println!("{}", "=".repeat(60));
        println!("Loaded Value Table");
        println!("{}", "=".repeat(60));
        println!("Table path: {:?}", path);
        println!("Entries: {}", table.len());
        if let Some(metadata) = &metadata {
            println!("Episodes trained: {}", metadata.episodes_trained);
            println!("Training steps: {}", metadata.training_steps);
            println!("Version: {}", metadata.version);
        }
        println!("Grid size: {}x{}", grid_size, grid_size);
        println!("{}", "=".repeat(60));

        Self::new(table, GameConfig { grid_size, seed }, max_steps)
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_visualization_loop(&mut terminal).await;

        cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_visualization_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.speed.tick_interval());
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.tick()?;
                    }
                }

                _ = render_timer.tick() => {
                    let status = self.status();
                    terminal.draw(|frame| {
                        self.renderer.render_playback(frame, self.env.state(), &status);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance one step, or start the next episode when the last one ended
    fn tick(&mut self) -> Result<()> {
        if self.env.is_done() || self.env.state().steps as usize >= self.max_steps {
            self.new_episode();
            return Ok(());
        }

        let action = self.agent.greedy_action(&self.observation);
        let (next, _, done) = self.env.step(action)?;
        self.observation = next;
        self.best_score = self.best_score.max(self.env.score());

        if done {
            tracing::debug!(
                episode = self.episode_count,
                score = self.env.score(),
                "episode finished"
            );
        }

        Ok(())
    }

    fn new_episode(&mut self) {
        self.observation = self.env.reset();
        self.episode_count += 1;
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::TogglePause => self.paused = !self.paused,
            KeyAction::Restart => self.new_episode(),
            KeyAction::Speed(slot) => {
                if let Some(speed) = VisualizationSpeed::from_slot(slot) {
                    self.speed = speed;
                    tick_timer.reset_after(speed.tick_interval());
                }
            }
            KeyAction::Move(_) | KeyAction::ToggleControl | KeyAction::None => {}
        }
    }

    fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            episode: self.episode_count,
            speed: self.speed.as_str(),
            paused: self.paused,
            best_score: self.best_score,
        }
    }
}
