//! 2D cell grid for the simulation.

use duolife_core::{CellState, Error, Result};
use rand::Rng;

/// A rectangular grid of cell states, stored row-major.
///
/// Dimensions are fixed at construction. The stepper mutates cells in
/// place; a reseed replaces the grid wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Build a grid from nested rows, validating shape.
    ///
    /// The input must be non-empty and rectangular.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::InvalidGrid("no rows".to_string()));
        }
        let cols = rows[0].len();
        if cols == 0 {
            return Err(Error::InvalidGrid("empty first row".to_string()));
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::InvalidGrid(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.len(),
                    cols
                )));
            }
        }

        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self {
            rows: height,
            cols,
            cells,
        })
    }

    /// Seeded random soup, roughly a third of the cells alive with the
    /// two species evenly split.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let mut seeded = Vec::with_capacity(rows);
        for _ in 0..rows {
            let mut row = Vec::with_capacity(cols);
            for _ in 0..cols {
                let state = if rng.gen_bool(0.35) {
                    if rng.gen_bool(0.5) {
                        CellState::Sad
                    } else {
                        CellState::Happy
                    }
                } else {
                    CellState::Dead
                };
                row.push(state);
            }
            seeded.push(row);
        }
        Self::from_rows(seeded)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell state at `(y, x)`. Callers keep coordinates in bounds.
    pub fn get(&self, y: usize, x: usize) -> CellState {
        self.cells[y * self.cols + x]
    }

    /// Overwrite the cell at `(y, x)`.
    pub fn set(&mut self, y: usize, x: usize, state: CellState) {
        self.cells[y * self.cols + x] = state;
    }

    /// Iterator over rows, for rendering.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.cols)
    }
}
