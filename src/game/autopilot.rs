//! Greedy food-seeking autopilot for the human front end

use super::{action::Action, state::GameState};

/// Direction the autopilot takes from `state` while heading `heading`
///
/// Never reverses. Moves into a wall or the body are skipped, and of the
/// remaining ones the move ending closest to the food wins, earlier
/// actions in `Action::ALL` order winning ties. With no safe move the
/// snake keeps its heading.
pub fn autopilot_direction(state: &GameState, heading: Action) -> Action {
    let mut best: Option<(Action, i32)> = None;

    for action in Action::ALL {
        if action.is_opposite(heading) {
            continue;
        }

        let next = state.snake.head().moved_in_direction(action);
        if !state.is_in_bounds(next) || state.snake.occupies(next) {
            continue;
        }

        let distance = next.manhattan_distance(state.food);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((action, distance)),
        }
    }

    best.map_or(heading, |(action, _)| action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};

    fn grid_state(body: Vec<Position>, food: Position, size: usize) -> GameState {
        GameState::new(Snake::from_segments(body).unwrap(), food, size)
    }

    #[test]
    fn test_heads_for_the_food() {
        let state = grid_state(vec![Position::new(2, 2)], Position::new(2, 4), 6);
        assert_eq!(autopilot_direction(&state, Action::Left), Action::Down);
    }

    #[test]
    fn test_never_reverses() {
        // Food straight behind; reversing is not a candidate.
        let state = grid_state(vec![Position::new(3, 2)], Position::new(3, 5), 6);
        assert_ne!(autopilot_direction(&state, Action::Up), Action::Down);
    }

    #[test]
    fn test_skips_the_wall() {
        // In the top-left corner heading LEFT: UP and LEFT leave the grid.
        let state = grid_state(vec![Position::new(0, 0)], Position::new(3, 3), 6);
        assert_eq!(autopilot_direction(&state, Action::Left), Action::Down);

        let state = grid_state(vec![Position::new(0, 3)], Position::new(0, 0), 6);
        assert_eq!(autopilot_direction(&state, Action::Left), Action::Up);
    }

    #[test]
    fn test_avoids_the_body() {
        // Without the body UP would win its tie with LEFT.
        let body = vec![
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(3, 1),
            Position::new(2, 1),
        ];
        let state = grid_state(body, Position::new(1, 0), 6);

        assert_eq!(autopilot_direction(&state, Action::Left), Action::Left);
    }

    #[test]
    fn test_ties_go_to_the_earlier_action() {
        // UP and LEFT both end three cells from the food.
        let state = grid_state(vec![Position::new(3, 3)], Position::new(1, 1), 6);
        assert_eq!(autopilot_direction(&state, Action::Up), Action::Up);
    }

    #[test]
    fn test_boxed_in_keeps_heading() {
        // Heading RIGHT at the top-right corner: UP and RIGHT are walls,
        // DOWN is body, LEFT is the reverse.
        let body = vec![
            Position::new(3, 0),
            Position::new(2, 0),
            Position::new(2, 1),
            Position::new(3, 1),
        ];
        let state = grid_state(body, Position::new(0, 3), 4);

        assert_eq!(autopilot_direction(&state, Action::Right), Action::Right);
    }
}
