//! Reinforcement learning over the Snake game
//!
//! Provides:
//! - The episode API (`reset`, `step`, `get_state`, `render`) over a
//!   4-integer observation
//! - A lazily populated value table and an epsilon-greedy Q-learning agent
//! - Transition shaping kept separate from both
//! - JSON persistence of learned tables

pub mod agent;
pub mod config;
pub mod environment;
pub mod persistence;
pub mod q_table;
pub mod transition;

pub use agent::QAgent;
pub use config::QLearningConfig;
pub use environment::SnakeEnvironment;
pub use persistence::{load_q_table, save_q_table, ModelMetadata};
pub use q_table::{QEntry, QTable};
pub use transition::{DistanceShaping, NoShaping, RewardShaper, Transition};
