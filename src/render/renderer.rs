use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{GameState, Position};
use crate::input::ControlMode;
use crate::metrics::GameMetrics;

/// Status figures for the agent playback screen
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackStatus {
    pub episode: usize,
    pub speed: &'static str,
    pub paused: bool,
    /// Best score over the episodes watched so far
    pub best_score: u32,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Human play screen: score bar, grid or game-over panel, key help
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        control: ControlMode,
    ) {
        let [header, body, footer] = Self::split(frame.area());

        let stats = Line::from(vec![
            label("Score: "),
            value(state.score.to_string()),
            Span::raw("    "),
            label("High: "),
            value(metrics.high_score.to_string()),
            Span::raw("    "),
            label("Time: "),
            value(metrics.format_time()),
            Span::raw("    "),
            label("Mode: "),
            value(control.as_str().to_string()),
        ]);
        frame.render_widget(Paragraph::new(stats).alignment(Alignment::Center), header);

        let area = Self::center(body);
        if state.done {
            frame.render_widget(self.render_game_over(state, metrics.high_score), area);
        } else {
            frame.render_widget(self.render_grid(state, " Snake "), area);
        }

        let controls = Line::from(vec![
            key("↑↓←→"),
            Span::raw(" or "),
            key("WASD"),
            Span::raw(" to move | "),
            key("C"),
            Span::raw(" autopilot | "),
            key("R"),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);
        frame.render_widget(Paragraph::new(controls).alignment(Alignment::Center), footer);
    }

    /// Agent playback screen
    pub fn render_playback(&self, frame: &mut Frame, state: &GameState, status: &PlaybackStatus) {
        let [header, body, footer] = Self::split(frame.area());

        let mut spans = vec![
            label("Episode: "),
            value(status.episode.to_string()),
            Span::raw("    "),
            label("Score: "),
            value(state.score.to_string()),
            Span::raw("    "),
            label("Best: "),
            value(status.best_score.to_string()),
            Span::raw("    "),
            label("Steps: "),
            value(state.steps.to_string()),
            Span::raw("    "),
            label("Speed: "),
            value(status.speed.to_string()),
        ];
        if status.paused {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            header,
        );

        frame.render_widget(self.render_grid(state, " Greedy agent "), Self::center(body));

        let controls = Line::from(vec![
            key("Space"),
            Span::raw(" pause | "),
            key("R"),
            Span::raw(" new episode | "),
            key("1-4"),
            Span::raw(" speed | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);
        frame.render_widget(Paragraph::new(controls).alignment(Alignment::Center), footer);
    }

    fn split(area: Rect) -> [Rect; 3] {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(area);
        [chunks[0], chunks[1], chunks[2]]
    }

    fn center(area: Rect) -> Rect {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(area)[1]
    }

    fn render_grid<'a>(&self, state: &GameState, title: &'a str) -> Paragraph<'a> {
        let n = state.grid_size as i32;
        let head = state.snake.head();

        let lines: Vec<Line> = (0..n)
            .map(|y| {
                let spans: Vec<Span> = (0..n)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if pos == head {
                            Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else if state.snake.occupies(pos) {
                            Span::styled("□ ", Style::default().fg(Color::Green))
                        } else if pos == state.food {
                            Span::styled(
                                "O ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled(". ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, high_score: u32) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![label("Final Score: "), value(state.score.to_string())]),
            Line::from(vec![label("High Score: "), value(high_score.to_string())]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::Yellow))
}

fn value(text: String) -> Span<'static> {
    Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
}

fn key(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::Cyan))
}
