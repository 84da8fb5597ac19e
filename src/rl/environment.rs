use std::collections::HashSet;

use crate::error::{GameError, GameResult};
use crate::game::{Action, GameConfig, GameEngine, GameState, Observation, Position, Snake};
use crate::render::render_text;

/// Snake environment for reinforcement learning
///
/// Wraps the game engine and exposes the episode API used by every driver:
/// - `reset` / `step` / `get_state` over the 4-integer observation
/// - Discrete action space (Up, Down, Left, Right)
/// - `render` plus read-only accessors for front ends
pub struct SnakeEnvironment {
    engine: GameEngine,
    state: GameState,
}

impl SnakeEnvironment {
    /// Create a new Snake environment with a fresh episode
    pub fn new(config: GameConfig) -> GameResult<Self> {
        let mut engine = GameEngine::new(config)?;
        let state = engine.reset();
        Ok(Self { engine, state })
    }

    /// Resume from an existing state, e.g. a scripted scenario
    ///
    /// The state must match the configured grid, keep every segment in
    /// bounds without overlaps, and keep the food off the body. Food under
    /// the head is accepted only when the snake fills the grid.
    pub fn from_state(config: GameConfig, state: GameState) -> GameResult<Self> {
        let engine = GameEngine::new(config)?;

        if state.grid_size != engine.config().grid_size {
            return Err(GameError::InvalidConfig(format!(
                "state grid size {} does not match configured {}",
                state.grid_size,
                engine.config().grid_size
            )));
        }
        Self::check_layout(&state)?;

        Ok(Self { engine, state })
    }

    fn check_layout(state: &GameState) -> GameResult<()> {
        let mut seen = HashSet::with_capacity(state.snake.len());
        for &segment in &state.snake.body {
            if !state.is_in_bounds(segment) {
                return Err(GameError::InvalidConfig(format!(
                    "snake segment {:?} is outside the grid",
                    segment
                )));
            }
            if !seen.insert(segment) {
                return Err(GameError::InvalidConfig(format!(
                    "snake segment {:?} appears twice",
                    segment
                )));
            }
        }

        if !state.is_in_bounds(state.food) {
            return Err(GameError::InvalidConfig(format!(
                "food {:?} is outside the grid",
                state.food
            )));
        }

        let grid_full = state.snake.len() >= state.grid_size * state.grid_size;
        let food_allowed = grid_full && state.food == state.snake.head();
        if state.snake.occupies(state.food) && !food_allowed {
            return Err(GameError::InvalidConfig(format!(
                "food {:?} lies on the snake",
                state.food
            )));
        }

        Ok(())
    }

    /// Reset the environment and return the initial observation
    pub fn reset(&mut self) -> Observation {
        self.state = self.engine.reset();
        self.state.observation()
    }

    /// Step the environment with one action
    ///
    /// Returns: (observation, reward, done). On a collision the observation
    /// is the one from before the move.
    pub fn step(&mut self, action: Action) -> GameResult<(Observation, f64, bool)> {
        let result = self.engine.step(&mut self.state, action)?;
        Ok((self.state.observation(), result.reward, result.terminated))
    }

    /// Step with a textual action symbol ("UP", "DOWN", "LEFT", "RIGHT")
    pub fn step_symbol(&mut self, symbol: &str) -> GameResult<(Observation, f64, bool)> {
        let action: Action = symbol.parse()?;
        self.step(action)
    }

    /// Current observation, without side effects
    pub fn get_state(&self) -> Observation {
        self.state.observation()
    }

    /// Textual snapshot of the grid
    pub fn render(&self) -> String {
        render_text(&self.state)
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }

    pub fn grid_size(&self) -> usize {
        self.state.grid_size
    }

    pub fn snake(&self) -> &Snake {
        &self.state.snake
    }

    pub fn food(&self) -> Position {
        self.state.food
    }

    /// Foods eaten in the current episode
    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Get reference to current game state (for rendering/debugging)
    pub fn state(&self) -> &GameState {
        &self.state
    }
}
