use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Cannot place {requested} mines, only {available} cells are available")]
    InsufficientSpace {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    InvalidStateTransition,
}

pub type Result<T> = core::result::Result<T, GameError>;
