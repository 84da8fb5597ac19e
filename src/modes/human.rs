use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{autopilot_direction, Action, GameConfig};
use crate::input::{ControlMode, InputHandler, KeyAction};
use crate::metrics::{GameMetrics, HighScoreStore};
use crate::render::Renderer;
use crate::rl::SnakeEnvironment;

/// Keyboard-driven play in the terminal UI
///
/// The snake keeps moving in the last chosen direction, one cell per tick.
/// Pressing C hands the steering to the food-seeking autopilot and back.
/// Scores beating the stored high score are written back when a game ends.
pub struct HumanMode {
    env: SnakeEnvironment,
    metrics: GameMetrics,
    high_scores: HighScoreStore,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    heading: Action,
    pending_direction: Option<Action>,
    control: ControlMode,
}

impl HumanMode {
    pub fn new(config: GameConfig, high_scores: HighScoreStore) -> Result<Self> {
        let env = SnakeEnvironment::new(config).context("Failed to create environment")?;
        let metrics = GameMetrics::with_high_score(high_scores.load());

        Ok(Self {
            env,
            metrics,
            high_scores,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            heading: Action::Up,
            pending_direction: None,
            control: ControlMode::Human,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at 8 Hz (125ms per tick)
        let mut tick_timer = interval(Duration::from_millis(125));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.env.is_done() {
                        self.update_game()?;
                    }
                }

                _ = render_timer.tick() => {
                    if !self.env.is_done() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.env.state(), &self.metrics, self.control);
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

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Move(direction) => self.pending_direction = Some(direction),
            KeyAction::Restart => self.reset_game(),
            KeyAction::ToggleControl => {
                self.control = self.control.toggled();
                self.pending_direction = None;
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::TogglePause | KeyAction::Speed(_) | KeyAction::None => {}
        }
    }

    fn update_game(&mut self) -> Result<()> {
        match self.control {
            ControlMode::Human => {
                if let Some(direction) = self.pending_direction.take() {
                    // A longer snake cannot turn back into its own neck.
                    if self.env.snake().len() == 1 || !direction.is_opposite(self.heading) {
                        self.heading = direction;
                    }
                }
            }
            ControlMode::Ai => {
                self.pending_direction = None;
                self.heading = autopilot_direction(self.env.state(), self.heading);
            }
        }

        let (_, _, done) = self.env.step(self.heading)?;

        if done {
            let score = self.env.score();
            self.metrics.on_game_over(score);
            self.high_scores.record(score);
            tracing::debug!(score, "game over");
        }

        Ok(())
    }

    fn reset_game(&mut self) {
        self.env.reset();
        self.metrics.on_game_start();
        self.heading = Action::Up;
        self.pending_direction = None;
    }
}

pub(crate) fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
