//! Payout history
//!
//! Keeps the best finished games by reward, persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// Maximum number of games to keep
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// One finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutEntry {
    pub reward: f64,
    pub total_score: u64,
    pub deposit: f64,
    /// Unix timestamp (ms) when the game finished
    pub timestamp: u64,
}

/// Best payouts, sorted by reward descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PayoutHistory {
    pub entries: Vec<PayoutEntry>,
}

impl PayoutHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a reward makes the list
    pub fn qualifies(&self, reward: f64) -> bool {
        if !(reward > 0.0) {
            return false;
        }
        if self.entries.len() < MAX_HISTORY_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| reward > e.reward).unwrap_or(true)
    }

    /// Rank a reward would reach (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, reward: f64) -> Option<usize> {
        if !self.qualifies(reward) {
            return None;
        }
        let rank = self.entries.iter().position(|e| reward > e.reward);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished game. Returns the rank achieved, if any.
    pub fn add_result(&mut self, reward: f64, total_score: u64, deposit: f64, timestamp: u64) -> Option<usize> {
        let rank = self.potential_rank(reward)?;
        self.entries.insert(
            rank - 1,
            PayoutEntry {
                reward,
                total_score,
                deposit,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best_reward(&self) -> Option<f64> {
        self.entries.first().map(|e| e.reward)
    }

    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let json = std::fs::read_to_string(path)?;
        let history: PayoutHistory = serde_json::from_str(&json)?;
        log::info!("Loaded {} payout entries", history.entries.len());
        Ok(history)
    }

    /// Load history, starting fresh if the file is missing or unreadable
    pub fn load_or_new(path: &Path) -> Self {
        match Self::load(path) {
            Ok(history) => history,
            Err(e) => {
                log::info!("No payout history at {} ({e}), starting fresh", path.display());
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Payout history saved ({} entries)", self.entries.len());
        Ok(())
    }
}
