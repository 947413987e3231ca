//! Configuration types for the simulation.

use serde::{Deserialize, Serialize};

/// Smallest accepted tick period, in milliseconds.
///
/// Speed inputs below this are coerced up to it.
pub const MIN_TICK_MS: u64 = 10;

/// How the stepper advances the grid on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// Evaluate one cell per tick and write it in place, so cells later
    /// in the sweep observe the update. This is the default behavior.
    #[default]
    Incremental,
    /// Recompute the whole grid from a snapshot each tick.
    Generation,
}

/// Simulation cadence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Tick period in milliseconds (runtime-mutable via the scheduler)
    pub tick_ms: u64,
    /// Stepping mode
    pub mode: StepMode,
}

impl SimConfig {
    /// Tick period with the floor clamp applied.
    pub fn effective_tick_ms(&self) -> u64 {
        self.tick_ms.max(MIN_TICK_MS)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            mode: StepMode::Incremental,
        }
    }
}

/// Where the viewer gets its initial grid from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// Fetch `{ data: { state } }` from an HTTP endpoint
    Url(String),
    /// Use the built-in fixture
    Fixture,
    /// Seeded random soup
    Random { rows: usize, cols: usize, seed: u64 },
}

impl SeedSource {
    /// Parse a seed selector: `fixture`, `random`, or a URL.
    pub fn parse(value: &str) -> Self {
        match value {
            "fixture" => SeedSource::Fixture,
            "random" => SeedSource::Random {
                rows: 24,
                cols: 48,
                seed: 0,
            },
            url => SeedSource::Url(url.to_string()),
        }
    }
}

/// Viewer configuration
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Initial grid source
    pub seed: SeedSource,
    /// Simulation cadence
    pub sim: SimConfig,
    /// UI redraw period in milliseconds, decoupled from the tick period
    pub frame_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            seed: SeedSource::Fixture,
            sim: SimConfig::default(),
            frame_ms: 50,
        }
    }
}

impl ViewerConfig {
    /// Environment overrides: `DUOLIFE_SEED` (a URL, `fixture`, or
    /// `random`) and `DUOLIFE_TICK_MS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(seed) = std::env::var("DUOLIFE_SEED") {
            config.seed = SeedSource::parse(&seed);
        }
        if let Ok(tick_ms) = std::env::var("DUOLIFE_TICK_MS") {
            if let Ok(tick_ms) = tick_ms.parse() {
                config.sim.tick_ms = tick_ms;
            }
        }
        config
    }
}

/// Seed server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: String,
    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Environment overrides: `DUOLIFE_ADDR` and `DUOLIFE_PORT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("DUOLIFE_ADDR") {
            config.bind_address = addr;
        }
        if let Ok(port) = std::env::var("DUOLIFE_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        config
    }
}
