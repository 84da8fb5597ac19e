//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It can be driven programmatically by the human front ends and by the learning loop.

pub mod action;
pub mod autopilot;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use autopilot::autopilot_direction;
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult, DEATH_PENALTY, FOOD_REWARD, MOVE_REWARD};
pub use state::{CollisionType, GameState, Observation, Position, Snake};
