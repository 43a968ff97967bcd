use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cell index")]
    InvalidCell,
    #[error("Player name is empty")]
    EmptyName,
    #[error("No confirmed player identity")]
    NotReady,
    #[error("A round is already in progress")]
    RoundInProgress,
    #[error("Game is not in the playing phase, clicks are not accepted")]
    NotPlaying,
}

pub type Result<T> = core::result::Result<T, GameError>;
