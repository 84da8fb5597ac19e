use super::{
    action::Action,
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake},
};
use crate::error::{GameError, GameResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reward for eating food
pub const FOOD_REWARD: f64 = 1.0;
/// Reward for hitting a wall or the body
pub const DEATH_PENALTY: f64 = -1.0;
/// Reward for any other legal move
pub const MOVE_REWARD: f64 = 0.0;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub reward: f64,
    /// Whether the episode has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
///
/// Holds no episode state itself; every transition works on a `GameState`
/// passed in by the caller. The engine only owns the configuration and the
/// random source used for food placement.
pub struct GameEngine {
    config: GameConfig,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh episode: one segment at the center, food elsewhere
    pub fn reset(&mut self) -> GameState {
        let center = (self.config.grid_size / 2) as i32;
        let snake = Snake::new(Position::new(center, center));

        // grid_size >= 2 guarantees a free cell next to a 1-segment snake
        let food = self
            .spawn_food_avoid_snake(&snake)
            .unwrap_or(Position::new(0, 0));

        GameState::new(snake, food, self.config.grid_size)
    }

    /// Execute one step of the game
    ///
    /// Wall and body collisions end the episode without touching the snake
    /// or the food.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> GameResult<StepResult> {
        if state.done {
            return Err(GameError::EpisodeTerminated);
        }

        let new_head = state.snake.head().moved_in_direction(action);
        state.steps += 1;

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.done = true;

            return Ok(StepResult {
                reward: DEATH_PENALTY,
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            });
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        let reward = if ate_food {
            state.score += 1;
            // A full grid leaves the food under the head; the next move collides.
            if let Some(food) = self.spawn_food_avoid_snake(&state.snake) {
                state.food = food;
            }
            FOOD_REWARD
        } else {
            MOVE_REWARD
        };

        Ok(StepResult {
            reward,
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        })
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // Every segment counts, including the tail about to move away.
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a random empty position, `None` if the grid is full
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Position> {
        let n = self.config.grid_size;
        if snake.len() >= n * n {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..n) as i32;
            let y = self.rng.gen_range(0..n) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}
