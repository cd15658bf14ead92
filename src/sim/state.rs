//! Game state and core simulation types
//!
//! Everything a single game needs lives here. One instance per player; nothing is
//! shared between instances.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, MatchedCells};
use super::schedule::{Scheduler, TaskHandle};
use super::scroll::ScrollState;
use super::sequence::ColumnSequence;
use super::tiles::TileId;
use crate::consts::*;

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundState {
    /// Waiting for a deposit
    #[default]
    Idle,
    /// Columns spinning, resolving, or settling between rounds
    Playing,
    /// All attempts used
    Finished,
}

/// Notifications queued for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted { deposit: f64 },
    ColumnFrozen { col: usize, window: [TileId; GRID_ROWS] },
    RoundResolved { round: u32, score: u64, total_score: u64, attempts_left: u32 },
    RoundStarted { round: u32 },
    GameFinished { total_score: u64, reward: f64 },
    BalanceSynced { balance: f64 },
    SettlementFailed { reason: String },
    Restarted,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub round_state: RoundState,
    /// Visible board
    pub grid: Grid,
    /// One strip per column, redrawn each round
    pub sequences: [ColumnSequence; GRID_COLS],
    /// Scroll offsets and pause flags
    pub scroll: ScrollState,
    /// Rounds remaining in this game
    pub attempts_left: u32,
    /// Sum of round scores this game
    pub total_score: u64,
    /// Score of the most recently resolved round
    pub last_round_score: u64,
    /// Rounds resolved this game
    pub rounds_played: u32,
    /// Cells highlighted by the last scoring pass
    pub matched: MatchedCells,
    /// Wager for the current game
    pub deposit: f64,
    /// Reward fixed when the last attempt resolves
    pub pending_reward: Option<f64>,
    /// Frame loop and settle timer
    pub schedule: Scheduler,
    /// Scroll driver, while a game is running
    pub frame_loop: Option<TaskHandle>,
    /// Pending settle delay, between round resolution and the next round
    pub settle_timer: Option<TaskHandle>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Queued events (drained by the host)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh idle state with a cosmetic random board
    pub fn new<R: Rng + ?Sized>(rng: &mut R, tile_count: usize, attempts: u32) -> Self {
        Self {
            round_state: RoundState::Idle,
            grid: Grid::random(rng, tile_count),
            sequences: Default::default(),
            scroll: ScrollState::new(),
            attempts_left: attempts,
            total_score: 0,
            last_round_score: 0,
            rounds_played: 0,
            matched: MatchedCells::new(),
            deposit: 0.0,
            pending_reward: None,
            schedule: Scheduler::new(),
            frame_loop: None,
            settle_timer: None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.round_state == RoundState::Playing
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
