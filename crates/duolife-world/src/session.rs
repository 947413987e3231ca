//! Simulation session: one grid, one cursor, one lifecycle.

use crate::grid::Grid;
use crate::rules;
use duolife_core::{Cursor, Error, Result, SessionId, StepMode};
use tracing::{debug, info};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Paused,
}

/// Mutable simulation state, owned by exactly one driver at a time.
///
/// The scheduler is the only writer while the simulation runs; readers
/// (the UI) observe the latest committed state between ticks.
pub struct Session {
    id: SessionId,
    grid: Grid,
    cursor: Cursor,
    state: SessionState,
    mode: StepMode,
    ticks: u64,
}

impl Session {
    pub fn new(grid: Grid, mode: StepMode) -> Self {
        Self {
            id: SessionId::new(),
            grid,
            cursor: Cursor::ORIGIN,
            state: SessionState::Idle,
            mode,
            ticks: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ticks applied since the last (re)seed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Idle -> Running.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            SessionState::Idle => {
                info!(session = %self.id, "session started");
                self.state = SessionState::Running;
                Ok(())
            }
            other => Err(Error::InvalidState(format!(
                "cannot start a {other:?} session"
            ))),
        }
    }

    /// Running -> Paused. The grid and cursor are retained.
    pub fn pause(&mut self) -> Result<()> {
        match self.state {
            SessionState::Running => {
                info!(session = %self.id, ticks = self.ticks, "session paused");
                self.state = SessionState::Paused;
                Ok(())
            }
            other => Err(Error::InvalidState(format!(
                "cannot pause a {other:?} session"
            ))),
        }
    }

    /// Paused -> Running.
    pub fn resume(&mut self) -> Result<()> {
        match self.state {
            SessionState::Paused => {
                info!(session = %self.id, "session resumed");
                self.state = SessionState::Running;
                Ok(())
            }
            other => Err(Error::InvalidState(format!(
                "cannot resume a {other:?} session"
            ))),
        }
    }

    /// Replace the grid wholesale, reset the cursor to the origin and
    /// return to Idle. The only way back to Idle.
    pub fn reseed(&mut self, grid: Grid) {
        info!(
            session = %self.id,
            rows = grid.rows(),
            cols = grid.cols(),
            "session reseeded"
        );
        self.grid = grid;
        self.cursor = Cursor::ORIGIN;
        self.state = SessionState::Idle;
        self.ticks = 0;
    }

    /// Advance the simulation by one tick.
    ///
    /// In incremental mode this evaluates the cursor cell only, writes
    /// it in place, and advances the cursor. The write is visible to
    /// cells evaluated later in the same sweep.
    pub fn tick(&mut self) -> Result<()> {
        if self.state != SessionState::Running {
            return Err(Error::InvalidState(format!(
                "tick on a {:?} session",
                self.state
            )));
        }
        if self.grid.rows() == 0 || self.grid.cols() == 0 {
            return Err(Error::InvalidGrid("cannot step an empty grid".to_string()));
        }

        match self.mode {
            StepMode::Incremental => self.step_cell(),
            StepMode::Generation => self.step_generation(),
        }
        self.ticks += 1;
        Ok(())
    }

    fn step_cell(&mut self) {
        let Cursor { y, x } = self.cursor;
        let next = rules::evaluate(&self.grid, y, x);
        self.grid.set(y, x, next);

        self.cursor = self.cursor.advance(self.grid.rows(), self.grid.cols());
        if self.cursor == Cursor::ORIGIN {
            debug!(session = %self.id, ticks = self.ticks + 1, "sweep complete");
        }
    }

    /// Recompute every cell from a snapshot and swap the result in.
    fn step_generation(&mut self) {
        let snapshot = self.grid.clone();
        for y in 0..snapshot.rows() {
            for x in 0..snapshot.cols() {
                self.grid.set(y, x, rules::evaluate(&snapshot, y, x));
            }
        }
    }
}
