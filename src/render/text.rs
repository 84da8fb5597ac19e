use crate::game::{GameState, Position};

const HEAD: &str = "S";
const BODY: &str = "s";
const FOOD: &str = "F";
const EMPTY: &str = ".";

/// Plain-text snapshot of the grid, one row per line
///
/// Rows are separated by newlines and followed by a dashed separator so
/// consecutive frames printed to a console stay readable.
pub fn render_text(state: &GameState) -> String {
    let n = state.grid_size;
    let mut out = String::with_capacity(n * (2 * n + 1) + 2 * n + 1);

    for y in 0..n {
        let row: Vec<&str> = (0..n)
            .map(|x| cell(state, Position::new(x as i32, y as i32)))
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }

    out.push_str(&"-".repeat(2 * n));
    out
}

fn cell(state: &GameState, pos: Position) -> &'static str {
    if pos == state.snake.head() {
        HEAD
    } else if state.snake.occupies(pos) {
        BODY
    } else if pos == state.food {
        FOOD
    } else {
        EMPTY
    }
}
