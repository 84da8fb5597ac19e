use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Action;

/// What a key press means to a terminal front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Action),
    Restart,
    TogglePause,
    /// Switch between keyboard and autopilot steering
    ToggleControl,
    /// Playback speed slot, 1 (slowest) to 4
    Speed(u8),
    Quit,
    None,
}

/// Who steers the snake in the human front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    #[default]
    Human,
    Ai,
}

impl ControlMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Human => Self::Ai,
            Self::Ai => Self::Human,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "HUMAN",
            Self::Ai => "AI",
        }
    }
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Move(Action::Up),
            KeyCode::Down => KeyAction::Move(Action::Down),
            KeyCode::Left => KeyAction::Move(Action::Left),
            KeyCode::Right => KeyAction::Move(Action::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => KeyAction::Move(Action::Up),
                's' => KeyAction::Move(Action::Down),
                'a' => KeyAction::Move(Action::Left),
                'd' => KeyAction::Move(Action::Right),
                'q' => KeyAction::Quit,
                'r' => KeyAction::Restart,
                'c' => KeyAction::ToggleControl,
                ' ' | 'p' => KeyAction::TogglePause,
                '1'..='4' => KeyAction::Speed(c as u8 - b'0'),
                _ => KeyAction::None,
            },

            KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// A line typed into the text console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Move(Action),
    Quit,
    /// Anything else, kept for the error message
    Invalid(String),
}

/// Parse a console line: w/a/s/d move, q quits
pub fn parse_console_command(line: &str) -> ConsoleCommand {
    match line.trim() {
        "w" => ConsoleCommand::Move(Action::Up),
        "s" => ConsoleCommand::Move(Action::Down),
        "a" => ConsoleCommand::Move(Action::Left),
        "d" => ConsoleCommand::Move(Action::Right),
        "q" => ConsoleCommand::Quit,
        other => ConsoleCommand::Invalid(other.to_string()),
    }
}
