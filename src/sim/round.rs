//! Round lifecycle
//!
//! idle -> playing -> (three column freezes) -> resolve -> settle delay ->
//! next round, or finished once the attempts run out. All transitions happen
//! synchronously on the caller's thread.

use rand::Rng;

use super::reward::reward_for;
use super::schedule::TimerAction;
use super::score::score_grid;
use super::scroll::resolve_window;
use super::sequence::generate_columns;
use super::state::{GameEvent, GameState, RoundState};
use crate::consts::*;
use crate::settings::Tuning;

/// Result of a column click
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Not playing, out of range, or already paused
    Ignored,
    /// Column stopped, others still spinning
    Frozen,
    /// Third column stopped and the round was scored
    RoundResolved { score: u64 },
}

/// Result of one simulation tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing runs outside `playing`
    Inactive,
    Advanced,
    /// Settle delay elapsed and a fresh round began
    NextRound,
    /// Settle delay elapsed on the last attempt
    Finished { reward: f64 },
}

fn regenerate<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, tuning: &Tuning) {
    state.sequences = generate_columns(rng, tuning.sequence_length, tuning.tiles.len());
}

/// Enter `playing` with a validated deposit
pub fn begin_game<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, tuning: &Tuning, deposit: f64) {
    stop_tasks(state);
    state.deposit = deposit;
    state.attempts_left = tuning.attempts_per_game;
    state.total_score = 0;
    state.last_round_score = 0;
    state.rounds_played = 0;
    state.pending_reward = None;
    state.matched.clear();
    state.scroll.release_all();
    regenerate(state, rng, tuning);
    state.frame_loop = Some(state.schedule.start_frame_loop());
    state.round_state = RoundState::Playing;

    log::info!(
        "Game started: deposit={}, attempts={}",
        deposit,
        state.attempts_left
    );
    state.push_event(GameEvent::GameStarted { deposit });
}

/// Freeze a column at its current offset
pub fn click_column(state: &mut GameState, tuning: &Tuning, col: usize) -> ClickOutcome {
    if !state.is_playing() {
        log::debug!("Click on column {col} ignored: not playing");
        return ClickOutcome::Ignored;
    }
    if col >= GRID_COLS || state.scroll.is_paused(col) {
        log::debug!("Click on column {col} ignored: out of range or already stopped");
        return ClickOutcome::Ignored;
    }

    // sample once; the same value fills the window
    let offset = state.scroll.freeze(col);
    let window = resolve_window(offset, &state.sequences[col], tuning.tile_height);
    state.grid.set_column(col, window);
    log::debug!("Column {col} frozen at {offset:.3}%");
    state.push_event(GameEvent::ColumnFrozen { col, window });

    if state.scroll.all_paused() {
        let score = resolve_round(state, tuning);
        ClickOutcome::RoundResolved { score }
    } else {
        ClickOutcome::Frozen
    }
}

/// Score the board and start the settle delay. Runs once per round.
fn resolve_round(state: &mut GameState, tuning: &Tuning) -> u64 {
    let result = score_grid(&state.grid, &tuning.tiles, &tuning.scoring);
    state.total_score += result.score;
    state.last_round_score = result.score;
    state.matched = result.matched;
    state.attempts_left = state.attempts_left.saturating_sub(1);
    state.rounds_played += 1;

    if state.attempts_left == 0 {
        let reward = reward_for(state.deposit, state.total_score, tuning.divide_threshold);
        state.pending_reward = Some(reward);
    }

    log::info!(
        "Round {} resolved: score={}, total={}, attempts_left={}",
        state.rounds_played,
        result.score,
        state.total_score,
        state.attempts_left
    );
    state.push_event(GameEvent::RoundResolved {
        round: state.rounds_played,
        score: result.score,
        total_score: state.total_score,
        attempts_left: state.attempts_left,
    });

    let settle = state.schedule.schedule(tuning.settle_ticks(), TimerAction::SettleRound);
    state.settle_timer = Some(settle);
    result.score
}

/// Advance the simulation by one fixed step
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, tuning: &Tuning) -> TickOutcome {
    if !state.is_playing() {
        return TickOutcome::Inactive;
    }

    state.time_ticks += 1;

    if state.schedule.frame_loop_active() {
        state.scroll.advance(tuning.scroll_step());
    }

    let mut outcome = TickOutcome::Advanced;
    for action in state.schedule.advance() {
        match action {
            TimerAction::SettleRound => {
                state.settle_timer = None;
                outcome = settle_round(state, rng, tuning);
            }
        }
    }
    outcome
}

fn settle_round<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, tuning: &Tuning) -> TickOutcome {
    if state.attempts_left == 0 {
        let reward = state
            .pending_reward
            .unwrap_or_else(|| reward_for(state.deposit, state.total_score, tuning.divide_threshold));
        stop_tasks(state);
        state.round_state = RoundState::Finished;
        log::info!(
            "Game finished: total_score={}, reward={}",
            state.total_score,
            reward
        );
        state.push_event(GameEvent::GameFinished {
            total_score: state.total_score,
            reward,
        });
        TickOutcome::Finished { reward }
    } else {
        state.matched.clear();
        state.scroll.release_all();
        regenerate(state, rng, tuning);
        let round = state.rounds_played + 1;
        state.push_event(GameEvent::RoundStarted { round });
        TickOutcome::NextRound
    }
}

/// Cancel the frame loop and any pending settle delay
pub fn stop_tasks(state: &mut GameState) {
    if let Some(handle) = state.settle_timer.take() {
        state.schedule.cancel(handle);
    }
    if let Some(handle) = state.frame_loop.take() {
        state.schedule.cancel(handle);
    }
}

/// Back to `idle` from any phase. The deposit is left as is.
pub fn restart(state: &mut GameState, tuning: &Tuning) {
    stop_tasks(state);
    state.round_state = RoundState::Idle;
    state.attempts_left = tuning.attempts_per_game;
    state.total_score = 0;
    state.last_round_score = 0;
    state.rounds_played = 0;
    state.pending_reward = None;
    state.matched.clear();
    state.scroll.reset();
    log::info!("Game reset to idle");
    state.push_event(GameEvent::Restarted);
}
