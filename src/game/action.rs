use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// One of the four moves available to the snake
///
/// The declaration order is the enumeration order used everywhere a scan
/// over actions happens (greedy tie-breaking, table serialization).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in enumeration order
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
        }
    }

    /// The wire symbol for this action
    pub fn symbol(&self) -> &'static str {
        match self {
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
        }
    }

    /// Position of this action in [`Action::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Action) -> bool {
        matches!(
            (self, other),
            (Action::Up, Action::Down)
                | (Action::Down, Action::Up)
                | (Action::Left, Action::Right)
                | (Action::Right, Action::Left)
        )
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UP" => Ok(Action::Up),
            "DOWN" => Ok(Action::Down),
            "LEFT" => Ok(Action::Left),
            "RIGHT" => Ok(Action::Right),
            other => Err(GameError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_delta() {
        assert_eq!(Action::Up.delta(), (0, -1));
        assert_eq!(Action::Down.delta(), (0, 1));
        assert_eq!(Action::Left.delta(), (-1, 0));
        assert_eq!(Action::Right.delta(), (1, 0));
    }

    #[test]
    fn test_enumeration_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
        assert_eq!(Action::ALL[0], Action::Up);
        assert_eq!(Action::ALL[3], Action::Right);
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!("UP".parse::<Action>(), Ok(Action::Up));
        assert_eq!("DOWN".parse::<Action>(), Ok(Action::Down));
        assert_eq!("LEFT".parse::<Action>(), Ok(Action::Left));
        assert_eq!("RIGHT".parse::<Action>(), Ok(Action::Right));
    }

    #[test]
    fn test_parse_rejects_unknown_symbols() {
        assert_eq!(
            "JUMP".parse::<Action>(),
            Err(GameError::InvalidAction("JUMP".to_string()))
        );
        assert!("up".parse::<Action>().is_err());
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn test_display_matches_symbol() {
        for action in Action::ALL {
            assert_eq!(action.to_string(), action.symbol());
            assert_eq!(action.symbol().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_opposite_actions() {
        assert!(Action::Up.is_opposite(Action::Down));
        assert!(Action::Left.is_opposite(Action::Right));
        assert!(!Action::Up.is_opposite(Action::Left));
        assert!(!Action::Right.is_opposite(Action::Right));
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&Action::Right).unwrap();
        assert_eq!(json, "\"RIGHT\"");
        let back: Action = serde_json::from_str("\"DOWN\"").unwrap();
        assert_eq!(back, Action::Down);
    }
}
