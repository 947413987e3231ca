//! Terminal viewer for the two-species life simulation.
//!
//! Fetches the initial grid, hands it to a session, and drives the tick
//! scheduler while rendering the evolving grid.

mod client;
mod telemetry;
mod ui;

use anyhow::Result;
use duolife_core::ViewerConfig;
use duolife_world::{Scheduler, Session};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let config = ViewerConfig::from_env();
    info!(seed = ?config.seed, tick_ms = config.sim.tick_ms, "starting viewer");

    let client = client::SeedClient::new()?;
    let grid = match client.load(&config.seed).await {
        Ok(grid) => grid,
        Err(e) => {
            // Load failures are terminal: report them and never start
            // stepping.
            error!(error = %e, "could not load the initial grid");
            eprintln!("There was a problem when trying to get the data: {e}");
            std::process::exit(1);
        }
    };

    let session = Arc::new(RwLock::new(Session::new(grid, config.sim.mode)));
    let scheduler = Scheduler::spawn(session.clone(), &config.sim)?;

    ui::run(session, &scheduler, &config).await?;

    scheduler.shutdown().await;
    info!("viewer stopped");

    Ok(())
}
