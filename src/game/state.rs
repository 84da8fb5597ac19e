use serde::{Deserialize, Serialize};

use super::action::Action;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in the direction of an action
    pub fn moved_in_direction(&self, action: Action) -> Self {
        let (dx, dy) = action.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance to another position
    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// What the agent sees: head and food coordinates only
///
/// Body shape, heading and length are not part of it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Observation {
    pub head_x: i32,
    pub head_y: i32,
    pub food_x: i32,
    pub food_y: i32,
}

impl Observation {
    pub fn new(head: Position, food: Position) -> Self {
        Self {
            head_x: head.x,
            head_y: head.y,
            food_x: food.x,
            food_y: food.y,
        }
    }

    pub fn head(&self) -> Position {
        Position::new(self.head_x, self.head_y)
    }

    pub fn food(&self) -> Position {
        Position::new(self.food_x, self.food_y)
    }

    /// Manhattan distance from head to food
    pub fn food_distance(&self) -> i32 {
        self.head().manhattan_distance(self.food())
    }

    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.head_x, self.head_y, self.food_x, self.food_y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// A single-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head, keeping the tail when growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the grid
    Wall,
    /// Head moved onto the body
    SelfCollision,
}

/// Complete state of one episode
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_size: usize,
    /// Foods eaten this episode
    pub score: u32,
    pub steps: u32,
    pub done: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            grid_size,
            score: 0,
            steps: 0,
            done: false,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let n = self.grid_size as i32;
        pos.x >= 0 && pos.x < n && pos.y >= 0 && pos.y < n
    }

    /// Project the state onto what the agent observes
    pub fn observation(&self) -> Observation {
        Observation::new(self.snake.head(), self.food)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Action::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Action::Left), Position::new(4, 5));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(1, 2);
        let b = Position::new(4, 0);
        assert_eq!(a.manhattan_distance(b), 5);
        assert_eq!(b.manhattan_distance(a), 5);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn test_observation_projection() {
        let state = GameState::new(Snake::new(Position::new(3, 4)), Position::new(7, 1), 10);
        let obs = state.observation();
        assert_eq!(obs.as_tuple(), (3, 4, 7, 1));
        assert_eq!(obs.food_distance(), 7);
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5));

        snake.advance(Position::new(5, 4), false);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(5, 4));

        snake.advance(Position::new(5, 3), true);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.body, vec![Position::new(5, 3), Position::new(5, 4)]);
    }

    #[test]
    fn test_snake_from_segments() {
        assert!(Snake::from_segments(vec![]).is_none());
        let snake = Snake::from_segments(vec![Position::new(1, 1), Position::new(1, 2)]).unwrap();
        assert_eq!(snake.head(), Position::new(1, 1));
        assert!(snake.occupies(Position::new(1, 2)));
        assert!(!snake.occupies(Position::new(2, 2)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(Snake::new(Position::new(5, 5)), Position::new(1, 1), 10);

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(9, 9)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(10, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 10)));
    }
}
