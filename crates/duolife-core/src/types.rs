//! Core type definitions for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a simulation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of a single grid cell.
///
/// The wire encoding is the bare integer: 0 dead, 1 sad, 2 happy.
/// Any other stored value is a data-integrity error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellState {
    Dead,
    Sad,
    Happy,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        !matches!(self, CellState::Dead)
    }
}

impl TryFrom<u8> for CellState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CellState::Dead),
            1 => Ok(CellState::Sad),
            2 => Ok(CellState::Happy),
            other => Err(Error::InvalidCell(other)),
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> u8 {
        match state {
            CellState::Dead => 0,
            CellState::Sad => 1,
            CellState::Happy => 2,
        }
    }
}

/// Coordinate of the next cell the stepper will evaluate.
///
/// Stays in bounds while a session is active; advances in row-major
/// order and wraps to the origin past the last cell of the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub y: usize,
    pub x: usize,
}

impl Cursor {
    pub const ORIGIN: Cursor = Cursor { y: 0, x: 0 };

    pub fn new(y: usize, x: usize) -> Self {
        Self { y, x }
    }

    /// Next cursor position on a `rows` x `cols` grid.
    pub fn advance(self, rows: usize, cols: usize) -> Cursor {
        let x = self.x + 1;
        if x < cols {
            return Cursor { y: self.y, x };
        }
        if self.y + 1 < rows {
            Cursor { y: self.y + 1, x: 0 }
        } else {
            Cursor::ORIGIN
        }
    }
}
