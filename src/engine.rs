//! Game engine
//!
//! Wires the deterministic simulation to the account collaborators. Every input goes
//! through [`GameEngine::transition`], so all state changes are enumerable:
//!
//! | from       | command        | to                                   |
//! |------------|----------------|--------------------------------------|
//! | idle       | `StartGame`    | playing (deposit validated)          |
//! | finished   | `StartGame`    | playing (fresh game)                 |
//! | playing    | `ClickColumn`  | playing (round resolves on 3rd stop) |
//! | playing    | `Tick`         | playing, or finished + settlement    |
//! | any        | `Restart`      | idle                                 |
//! | any        | `Teardown`     | torn down, every later command fails |

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::account::{BalanceKey, BalanceProvider, Notifier, UserRecord};
use crate::consts::*;
use crate::error::{GameError, TuningError};
use crate::history::PayoutHistory;
use crate::platform::Clock;
use crate::settings::Tuning;
use crate::settlement::{Settlement, settle};
use crate::sim::{self, GameEvent, GameState, Grid, MatchedCells, RoundState, TickOutcome};

/// Inputs accepted by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    StartGame { deposit: f64, key: BalanceKey },
    ClickColumn(usize),
    Tick,
    Restart,
    Teardown,
}

/// One player's game
pub struct GameEngine<B, N> {
    tuning: Tuning,
    state: GameState,
    rng: Pcg32,
    provider: B,
    notifier: N,
    address: String,
    /// Last user record received from the provider
    user: Option<UserRecord>,
    /// Where the current game's deposit came from, and what was left after escrow
    escrow: Option<(BalanceKey, f64)>,
    history: PayoutHistory,
    torn_down: bool,
}

impl<B: BalanceProvider, N: Notifier> GameEngine<B, N> {
    /// Create an idle engine. `seed` drives every random draw.
    ///
    /// The tuning is validated first; the engine never runs with one that fails
    /// [`Tuning::validate`].
    pub fn new(tuning: Tuning, seed: u64, address: &str, provider: B, notifier: N) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(&mut rng, tuning.tiles.len(), tuning.attempts_per_game);
        Ok(Self {
            tuning,
            state,
            rng,
            provider,
            notifier,
            address: address.to_string(),
            user: None,
            escrow: None,
            history: PayoutHistory::new(),
            torn_down: false,
        })
    }

    /// Replace the payout history (e.g. one loaded from disk)
    pub fn with_history(mut self, history: PayoutHistory) -> Self {
        self.history = history;
        self
    }

    /// Single entry point for every state change
    pub fn transition(&mut self, command: Command) -> Result<(), GameError> {
        if self.torn_down {
            return match command {
                Command::Tick | Command::Teardown => Ok(()),
                _ => Err(GameError::TornDown),
            };
        }

        match command {
            Command::StartGame { deposit, key } => self.handle_start(deposit, key),
            Command::ClickColumn(col) => {
                sim::click_column(&mut self.state, &self.tuning, col);
                Ok(())
            }
            Command::Tick => {
                self.handle_tick();
                Ok(())
            }
            Command::Restart => {
                sim::restart(&mut self.state, &self.tuning);
                self.escrow = None;
                Ok(())
            }
            Command::Teardown => {
                sim::stop_tasks(&mut self.state);
                self.torn_down = true;
                log::info!("Engine torn down");
                Ok(())
            }
        }
    }

    fn handle_start(&mut self, deposit: f64, key: BalanceKey) -> Result<(), GameError> {
        if self.state.is_playing() {
            log::debug!("Start ignored: game already in progress");
            return Err(GameError::GameInProgress);
        }

        let validated = if !(deposit.is_finite() && deposit > 0.0) {
            Err(GameError::NonPositiveDeposit)
        } else {
            match self.provider.balance(&key) {
                Ok(available) if deposit > available => {
                    Err(GameError::InsufficientBalance { deposit, available })
                }
                Ok(available) => Ok(available),
                Err(e) => Err(GameError::Account(e)),
            }
        };

        let available = match validated {
            Ok(available) => available,
            Err(e) => {
                log::warn!("Start rejected: {e}");
                self.notifier.report_validation_error("Invalid deposit", &e.to_string());
                return Err(e);
            }
        };

        self.escrow = Some((key, available - deposit));
        sim::begin_game(&mut self.state, &mut self.rng, &self.tuning, deposit);
        Ok(())
    }

    fn handle_tick(&mut self) {
        if let TickOutcome::Finished { reward } = sim::tick(&mut self.state, &mut self.rng, &self.tuning) {
            self.finish_game(reward);
        }
    }

    /// `finished` is already committed; the sync only affects the external balance
    fn finish_game(&mut self, reward: f64) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        if let Some(rank) =
            self.history
                .add_result(reward, self.state.total_score, self.state.deposit, timestamp)
        {
            log::info!("Payout ranked #{rank} in history");
        }

        let Some((key, current_balance)) = self.escrow.take() else {
            log::warn!("Game finished without an escrowed deposit; nothing to settle");
            return;
        };
        let settlement = Settlement {
            key,
            current_balance,
            reward,
        };
        match settle(&settlement, &self.address, &mut self.provider, &mut self.notifier) {
            Ok(record) => {
                self.user = Some(record);
                self.state.push_event(GameEvent::BalanceSynced {
                    balance: settlement.new_balance(),
                });
            }
            Err(e) => self.state.push_event(GameEvent::SettlementFailed {
                reason: e.to_string(),
            }),
        }
    }

    pub fn start_game(&mut self, deposit: f64, network: &str, currency: &str) -> Result<(), GameError> {
        self.transition(Command::StartGame {
            deposit,
            key: BalanceKey::new(network, currency),
        })
    }

    /// Stop a column. Ignored unless playing and the column is still spinning.
    pub fn on_column_click(&mut self, col: usize) {
        // only fails after teardown, where a click is meaningless anyway
        let _ = self.transition(Command::ClickColumn(col));
    }

    pub fn restart(&mut self) {
        let _ = self.transition(Command::Restart);
    }

    pub fn tick(&mut self) {
        let _ = self.transition(Command::Tick);
    }

    /// Run every tick the clock says is due. Returns how many ran.
    pub fn pump<C: Clock + ?Sized>(&mut self, clock: &mut C) -> u32 {
        let due = clock.due_ticks();
        for _ in 0..due {
            self.tick();
        }
        due
    }

    /// Cancel the frame loop and timers; the engine accepts nothing afterwards
    pub fn teardown(&mut self) {
        let _ = self.transition(Command::Teardown);
    }

    // === Observables ===

    pub fn round_state(&self) -> RoundState {
        self.state.round_state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn column_paused(&self) -> [bool; GRID_COLS] {
        *self.state.scroll.paused()
    }

    pub fn scroll_offsets(&self) -> [f64; GRID_COLS] {
        *self.state.scroll.offsets()
    }

    pub fn attempts_left(&self) -> u32 {
        self.state.attempts_left
    }

    pub fn total_score(&self) -> u64 {
        self.state.total_score
    }

    pub fn last_round_score(&self) -> u64 {
        self.state.last_round_score
    }

    pub fn rounds_played(&self) -> u32 {
        self.state.rounds_played
    }

    pub fn matched_cells(&self) -> &MatchedCells {
        &self.state.matched
    }

    pub fn deposit(&self) -> f64 {
        self.state.deposit
    }

    /// Reward the current total would pay
    pub fn estimated_reward(&self) -> f64 {
        sim::estimated_reward(
            self.state.deposit,
            self.state.total_score,
            self.tuning.divide_threshold,
            self.tuning.min_qualifying_score,
        )
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn history(&self) -> &PayoutHistory {
        &self.history
    }

    pub fn provider(&self) -> &B {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut B {
        &mut self.provider
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

impl<B, N> Drop for GameEngine<B, N> {
    fn drop(&mut self) {
        sim::stop_tasks(&mut self.state);
    }
}
