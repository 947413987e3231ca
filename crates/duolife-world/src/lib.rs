//! Two-species life simulation engine.
//!
//! This crate implements the grid, the per-cell rule evaluator, and the
//! one-cell-per-tick stepping session together with its tick scheduler.

pub mod grid;
pub mod rules;
pub mod scheduler;
pub mod session;

pub use grid::Grid;
pub use rules::{count_neighbors, evaluate, NeighborCounts};
pub use scheduler::Scheduler;
pub use session::{Session, SessionState};
