use thiserror::Error;

/// Errors raised by the environment and its configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// An action symbol outside UP, DOWN, LEFT, RIGHT
    #[error("unknown action: {0:?}")]
    InvalidAction(String),

    /// `step` was called after the episode ended without a `reset`
    #[error("episode is over, call reset() before step()")]
    EpisodeTerminated,

    /// Configuration rejected by validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type GameResult<T> = Result<T, GameError>;
