//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - No wall clock, collaborators, or platform dependencies

pub mod grid;
pub mod reward;
pub mod round;
pub mod schedule;
pub mod score;
pub mod scroll;
pub mod sequence;
pub mod state;
pub mod tiles;

pub use grid::{CellPos, Grid, MatchedCells};
pub use reward::{estimated_reward, reward_for};
pub use round::{ClickOutcome, TickOutcome, begin_game, click_column, restart, stop_tasks, tick};
pub use schedule::{Scheduler, TaskHandle, TimerAction};
pub use score::{PatternHit, PatternKind, ScoreResult, ScoringRules, score_grid};
pub use scroll::{ScrollState, resolve_window, start_index};
pub use sequence::{ColumnSequence, generate, generate_columns};
pub use state::{GameEvent, GameState, RoundState};
pub use tiles::{TileId, TileSet, TileSpec};
