//! Error types

use thiserror::Error;

/// Failures from the balance provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    #[error("unknown user {0}")]
    UnknownUser(String),
    #[error("no balance for {0}")]
    UnknownBalance(String),
    #[error("balance sync failed: {0}")]
    Sync(String),
}

/// Errors surfaced by the game engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("deposit must be greater than zero")]
    NonPositiveDeposit,
    #[error("deposit {deposit} exceeds available balance {available}")]
    InsufficientBalance { deposit: f64, available: f64 },
    #[error("a game is already in progress")]
    GameInProgress,
    #[error("engine has been torn down")]
    TornDown,
    #[error(transparent)]
    Account(#[from] AccountError),
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to access payout history: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt payout history: {0}")]
    Parse(#[from] serde_json::Error),
}
