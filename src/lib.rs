//! Bingo Rush - A round-based ball bingo engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sequences, scrolling, scoring, rounds)
//! - `engine`: Public game surface wiring the sim to its collaborators
//! - `account`: Balance provider and notification collaborators
//! - `platform`: Clock abstraction driving the fixed-step tick
//! - `settings`: Data-driven game tuning

pub mod account;
pub mod engine;
pub mod error;
pub mod history;
pub mod platform;
pub mod settings;
pub mod settlement;
pub mod sim;

pub use account::{BalanceKey, BalanceProvider, MemoryLedger, Notifier, UserRecord};
pub use engine::{Command, GameEngine};
pub use error::{AccountError, GameError, HistoryError, TuningError};
pub use history::PayoutHistory;
pub use platform::{Clock, FrameClock, ManualClock};
pub use settings::{SpeedPreset, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation ticks per second
    pub const TICK_HZ: u64 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board dimensions
    pub const GRID_ROWS: usize = 5;
    pub const GRID_COLS: usize = 3;
    /// First and last rows of the scoring band (rows 0 and 4 are visual only)
    pub const SCORING_FIRST_ROW: usize = 1;
    pub const SCORING_LAST_ROW: usize = 3;

    /// Tiles per column sequence
    pub const SEQUENCE_LENGTH: usize = 50;
    /// Height of one tile in presentation units
    pub const TILE_HEIGHT: f64 = 100.0;
    /// Scroll offsets wrap at this percentage
    pub const SCROLL_WRAP: f64 = 100.0;

    /// Rounds per game
    pub const ATTEMPTS_PER_GAME: u32 = 10;
    /// Pause between round resolution and the next round (or game end)
    pub const SETTLE_DELAY_MS: u64 = 2000;
    /// Longest settle delay a tuning file may ask for
    pub const MAX_SETTLE_DELAY_MS: u64 = 60_000;
    /// reward = deposit * total_score / DIVIDE_THRESHOLD
    pub const DIVIDE_THRESHOLD: u64 = 1800;

    /// Pattern multipliers
    pub const MULT_3H: u64 = 10;
    pub const MULT_2H: u64 = 2;
    pub const MULT_3D: u64 = 30;
}

/// Convert a delay in milliseconds to whole simulation ticks (rounded up)
#[inline]
pub fn ms_to_ticks(ms: u64) -> u32 {
    let ticks = ms.saturating_mul(consts::TICK_HZ).div_ceil(1000);
    u32::try_from(ticks).unwrap_or(u32::MAX)
}
