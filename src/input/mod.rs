pub mod handler;

pub use handler::{parse_console_command, ConsoleCommand, ControlMode, InputHandler, KeyAction};
