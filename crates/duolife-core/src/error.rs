//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("seed load failed: {0}")]
    Load(String),

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("invalid cell value: {0}")]
    InvalidCell(u8),

    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Load(err.to_string())
    }
}
