//! q_snake - Snake on a square grid, learned with tabular Q-learning
//!
//! This library provides:
//! - Core game logic with an episode API (game and rl::environment)
//! - A lazily populated value table and epsilon-greedy agent (rl)
//! - Text and terminal UI rendering (render)
//! - Training, playback, baseline and human play drivers (modes)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;

pub use error::{GameError, GameResult};
