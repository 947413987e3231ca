//! Terminal rendering and controls.
//!
//! Each cell is drawn as a colored block with the cursor cell marked;
//! a status line carries the run state, tick period and key help.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use duolife_core::{CellState, ViewerConfig};
use duolife_world::{Scheduler, Session};
use futures::StreamExt;
use parking_lot::RwLock;
use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

/// Speed adjustment step for the +/- controls, in milliseconds.
const SPEED_STEP_MS: u64 = 10;

/// Fixed palette indexed by cell state.
fn cell_color(state: CellState) -> Color {
    match state {
        CellState::Dead => Color::Rgb {
            r: 0xA3,
            g: 0xA3,
            b: 0xA3,
        },
        CellState::Sad => Color::Rgb {
            r: 0x5D,
            g: 0xAA,
            b: 0xFF,
        },
        CellState::Happy => Color::Rgb {
            r: 0x2C,
            g: 0xB4,
            b: 0x8A,
        },
    }
}

/// Run the render/input loop until the user quits.
pub async fn run(
    session: Arc<RwLock<Session>>,
    scheduler: &Scheduler,
    config: &ViewerConfig,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = event_loop(&mut stdout, &session, scheduler, config).await;

    execute!(stdout, LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;

    result
}

async fn event_loop(
    stdout: &mut Stdout,
    session: &Arc<RwLock<Session>>,
    scheduler: &Scheduler,
    config: &ViewerConfig,
) -> anyhow::Result<()> {
    let mut frames = interval(Duration::from_millis(config.frame_ms));
    let mut events = EventStream::new();

    loop {
        tokio::select! {
            _ = frames.tick() => {
                draw(stdout, &session.read(), scheduler)?;
            }
            Some(event) = events.next() => {
                if let Event::Key(key) = event? {
                    if key.kind == KeyEventKind::Press && handle_key(key, scheduler)? {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Returns true when the user asked to quit.
fn handle_key(key: KeyEvent, scheduler: &Scheduler) -> anyhow::Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(true);
        }
        KeyCode::Char(' ') => scheduler.toggle()?,
        KeyCode::Char('+') | KeyCode::Char('=') => {
            // Faster: shorter period, clamped at the floor.
            let period = scheduler.period_ms().saturating_sub(SPEED_STEP_MS);
            scheduler.set_period_ms(period);
        }
        KeyCode::Char('-') => {
            scheduler.set_period_ms(scheduler.period_ms() + SPEED_STEP_MS);
        }
        _ => {}
    }
    Ok(false)
}

fn draw(stdout: &mut Stdout, session: &Session, scheduler: &Scheduler) -> anyhow::Result<()> {
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;

    let cursor = session.cursor();
    for (y, row) in session.grid().iter_rows().enumerate() {
        queue!(stdout, MoveTo(0, y as u16))?;
        for (x, &state) in row.iter().enumerate() {
            let marker = if cursor.y == y && cursor.x == x {
                "[]"
            } else {
                "  "
            };
            queue!(
                stdout,
                SetBackgroundColor(cell_color(state)),
                SetForegroundColor(Color::Black),
                Print(marker),
            )?;
        }
        queue!(stdout, ResetColor)?;
    }

    let status = format!(
        "{:?}  period {}ms  ticks {}   space: play/pause  +/-: speed  q: quit",
        session.state(),
        scheduler.period_ms(),
        session.ticks(),
    );
    queue!(
        stdout,
        MoveTo(0, session.grid().rows() as u16 + 1),
        Print(status),
    )?;

    stdout.flush()?;
    Ok(())
}
