//! Error types for the game core

use thiserror::Error;

/// Failure turning raw dataset text into movie records.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Malformed movie data: {0}")]
    Parse(#[from] csv::Error),
}

/// Failure reading or writing the persisted round cursor.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage encoding error: {0}")]
    Encoding(String),
}

/// Why a submitted order was not evaluated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("slot {0} is empty")]
    EmptySlot(usize),

    #[error("the same movie appears in more than one slot")]
    DuplicateMovie,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("slot {0} does not exist")]
    SlotOutOfRange(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No round is being played")]
    NotPlaying,

    #[error("Movie {0} is not part of this round")]
    UnknownMovie(usize),

    #[error(transparent)]
    Move(#[from] MoveError),
}
