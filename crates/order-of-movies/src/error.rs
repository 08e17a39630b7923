//! Application error types

use movies_core::{DataError, SessionError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load movie data: {0}")]
    Fetch(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{0}")]
    InvalidCommand(String),
}
