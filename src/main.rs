//! Bingo Rush entry point
//!
//! Headless autoplay: runs full games against an in-memory ledger, stopping each
//! column after a random number of ticks, and prints a summary per game.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use bingo_rush::account::LogNotifier;
use bingo_rush::consts::GRID_COLS;
use bingo_rush::sim::{GameEvent, RoundState};
use bingo_rush::{
    BalanceKey, GameEngine, ManualClock, MemoryLedger, PayoutHistory, SpeedPreset, Tuning, UserRecord,
};

/// Round-based ball bingo simulator.
#[derive(Debug, Parser)]
#[command(name = "bingo-rush", version, about)]
struct Args {
    /// RNG seed (engine and autoplayer)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Wager per game
    #[arg(long, default_value_t = 10.0)]
    deposit: f64,

    /// Starting balance in the in-memory ledger
    #[arg(long, default_value_t = 100.0)]
    balance: f64,

    #[arg(long, default_value = "tron")]
    network: String,

    #[arg(long, default_value = "USDT")]
    currency: String,

    /// Scroll speed preset: slow, normal or fast (overrides the tuning file)
    #[arg(long, value_parser = parse_speed)]
    speed: Option<SpeedPreset>,

    /// Tuning JSON file (defaults are used if omitted or unreadable)
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,

    /// Payout history JSON file, loaded and updated
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Number of games to play back to back
    #[arg(long, default_value_t = 1)]
    games: u32,
}

fn parse_speed(s: &str) -> Result<SpeedPreset, String> {
    SpeedPreset::parse(s).ok_or_else(|| format!("unknown speed '{s}' (expected slow, normal or fast)"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut tuning = args
        .tuning
        .as_deref()
        .map(Tuning::load_or_default)
        .unwrap_or_default();
    if let Some(speed) = args.speed {
        tuning.speed = speed;
    }
    log::info!("Scroll speed: {}", tuning.speed.as_str());
    let history = args
        .history
        .as_deref()
        .map(PayoutHistory::load_or_new)
        .unwrap_or_default();

    let key = BalanceKey::new(&args.network, &args.currency);
    let address = "local-player";
    let ledger = MemoryLedger::new(UserRecord::new(address).with_balance(&key, args.balance));
    let mut engine = GameEngine::new(tuning, args.seed, address, ledger, LogNotifier)
        .context("invalid tuning")?
        .with_history(history);
    let mut player = Pcg32::seed_from_u64(args.seed.wrapping_add(1));

    log::info!("Bingo Rush (headless) starting...");
    for game in 1..=args.games {
        engine
            .start_game(args.deposit, &args.network, &args.currency)
            .with_context(|| format!("starting game {game}"))?;

        while engine.round_state() == RoundState::Playing {
            for col in 0..GRID_COLS {
                let mut clock = ManualClock::new();
                clock.advance(player.random_range(5..90));
                engine.pump(&mut clock);
                engine.on_column_click(col);
            }
            let mut clock = ManualClock::new();
            clock.advance_ms(engine.tuning().settle_delay_ms);
            engine.pump(&mut clock);

            for event in engine.drain_events() {
                match event {
                    GameEvent::RoundResolved { round, score, total_score, attempts_left } => println!(
                        "  round {round:>2}: score {score:>5}  total {total_score:>6}  attempts left {attempts_left}"
                    ),
                    GameEvent::SettlementFailed { reason } => println!("  settlement failed: {reason}"),
                    _ => {}
                }
            }
        }

        let balance = engine.provider().record().balance(&key).unwrap_or(0.0);
        println!(
            "Game {game}: total score {}, reward {:.4}, balance {:.4}",
            engine.total_score(),
            engine.estimated_reward(),
            balance
        );
        engine.restart();
    }

    if let Some(path) = &args.history {
        engine.history().save(path).with_context(|| format!("saving {}", path.display()))?;
    }
    engine.teardown();
    Ok(())
}
