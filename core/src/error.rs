use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Puzzle text must contain at least one letter")]
    InvalidInput,
    #[error("Puzzle state is corrupt: {0}")]
    CorruptState(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
