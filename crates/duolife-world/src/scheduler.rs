//! Periodic tick driver for a session.

use crate::session::{Session, SessionState};
use duolife_core::{Result, SimConfig, MIN_TICK_MS};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Runtime-adjustable knobs, pushed to the tick loop over a watch
/// channel so changes apply between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Control {
    period_ms: u64,
    paused: bool,
}

/// Drives `Session::tick` from a single cancellable periodic task.
///
/// That task is the only writer of the session while it runs, so ticks
/// are strictly sequential: one fully applies its cell write and cursor
/// advance before the next can begin. While paused no timer is armed at
/// all; resuming re-creates the interval, so suspended time never
/// burst-fires missed ticks.
pub struct Scheduler {
    session: Arc<RwLock<Session>>,
    control: watch::Sender<Control>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Scheduler {
    /// Start the session and spawn its tick loop.
    pub fn spawn(session: Arc<RwLock<Session>>, config: &SimConfig) -> Result<Self> {
        session.write().start()?;

        let (control, control_rx) = watch::channel(Control {
            period_ms: config.effective_tick_ms(),
            paused: false,
        });
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_loop(session.clone(), control_rx, cancel.clone()));

        Ok(Self {
            session,
            control,
            cancel,
            handle,
        })
    }

    /// Current tick period in milliseconds.
    pub fn period_ms(&self) -> u64 {
        self.control.borrow().period_ms
    }

    /// Change the tick period. Takes effect between ticks, without
    /// touching the grid or cursor; values below the floor are clamped.
    pub fn set_period_ms(&self, period_ms: u64) {
        let clamped = period_ms.max(MIN_TICK_MS);
        self.control.send_modify(|control| control.period_ms = clamped);
    }

    pub fn is_paused(&self) -> bool {
        self.control.borrow().paused
    }

    /// Suspend the timer. The pending tick registration is dropped;
    /// grid and cursor stay as they are.
    pub fn pause(&self) -> Result<()> {
        self.session.write().pause()?;
        self.control.send_modify(|control| control.paused = true);
        Ok(())
    }

    pub fn resume(&self) -> Result<()> {
        self.session.write().resume()?;
        self.control.send_modify(|control| control.paused = false);
        Ok(())
    }

    /// The play/pause control.
    pub fn toggle(&self) -> Result<()> {
        if self.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Cancel the tick loop and wait for it to wind down.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            error!(error = %e, "tick loop did not shut down cleanly");
        }
    }
}

async fn run_loop(
    session: Arc<RwLock<Session>>,
    mut control_rx: watch::Receiver<Control>,
    cancel: CancellationToken,
) {
    let mut control = *control_rx.borrow();

    loop {
        if control.paused {
            // No timer armed while paused; just wait for the next
            // control change or shutdown.
            tokio::select! {
                _ = cancel.cancelled() => return,
                changed = control_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    control = *control_rx.borrow();
                }
            }
            continue;
        }

        let mut ticker = interval(Duration::from_millis(control.period_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // A fresh interval fires immediately; push the first tick one
        // full period out instead.
        ticker.reset();

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    info!("tick loop cancelled");
                    return;
                }
                changed = control_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    control = *control_rx.borrow();
                    // Rebuild the ticker with the new settings.
                    break;
                }
                _ = ticker.tick() => {
                    let mut guard = session.write();
                    if guard.state() != SessionState::Running {
                        // A pause landed between the timer firing and
                        // this tick; the control change is picked up on
                        // the next loop turn.
                        continue;
                    }
                    if let Err(e) = guard.tick() {
                        // Precondition violations abort the session
                        // rather than retrying.
                        error!(error = %e, "tick failed, stopping scheduler");
                        return;
                    }
                }
            }
        }
    }
}
