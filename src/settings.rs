//! Game tuning
//!
//! Data-driven balance: ball weights, pattern multipliers, timings and the reward
//! divisor. Loaded from a JSON file; anything missing falls back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::ms_to_ticks;
use crate::sim::score::ScoringRules;
use crate::sim::tiles::TileSet;

/// Scroll speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Fast => "Fast",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedPreset::Slow),
            "normal" | "norm" => Some(SpeedPreset::Normal),
            "fast" => Some(SpeedPreset::Fast),
            _ => None,
        }
    }

    /// Scroll advance per tick, in percent of the strip
    pub fn scroll_step(&self) -> f64 {
        match self {
            SpeedPreset::Slow => 0.1,
            SpeedPreset::Normal => 0.2,
            SpeedPreset::Fast => 0.4,
        }
    }
}

/// Engine tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scroll speed preset
    pub speed: SpeedPreset,
    /// Explicit per-tick scroll step (overrides the preset)
    pub scroll_step: Option<f64>,

    // === Board ===
    /// Balls per column strip
    pub sequence_length: usize,
    /// Tile height in presentation units
    pub tile_height: f64,
    /// Ball types and weights
    pub tiles: TileSet,
    /// Pattern multipliers
    pub scoring: ScoringRules,

    // === Game ===
    /// Rounds per game
    pub attempts_per_game: u32,
    /// Pause after each round resolves
    pub settle_delay_ms: u64,
    /// reward = deposit * total_score / divide_threshold
    pub divide_threshold: u64,
    /// Estimated reward stays at zero below this total (None = always shown)
    pub min_qualifying_score: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed: SpeedPreset::Normal,
            scroll_step: None,

            sequence_length: SEQUENCE_LENGTH,
            tile_height: TILE_HEIGHT,
            tiles: TileSet::default_balls(),
            scoring: ScoringRules::default(),

            attempts_per_game: ATTEMPTS_PER_GAME,
            settle_delay_ms: SETTLE_DELAY_MS,
            divide_threshold: DIVIDE_THRESHOLD,
            min_qualifying_score: None,
        }
    }
}

impl Tuning {
    /// Tuning with a speed preset applied
    pub fn from_preset(preset: SpeedPreset) -> Self {
        Self {
            speed: preset,
            ..Self::default()
        }
    }

    /// Effective scroll step per tick
    pub fn scroll_step(&self) -> f64 {
        self.scroll_step.unwrap_or_else(|| self.speed.scroll_step())
    }

    /// Settle delay in simulation ticks
    pub fn settle_ticks(&self) -> u32 {
        ms_to_ticks(self.settle_delay_ms)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.tiles.is_empty() {
            return Err(TuningError::Invalid("tile set is empty".into()));
        }
        if self.tiles.len() > 256 {
            return Err(TuningError::Invalid(format!(
                "{} tile types, at most 256 supported",
                self.tiles.len()
            )));
        }
        if let Some(tile) = self.tiles.tiles.iter().find(|t| t.weight == 0) {
            return Err(TuningError::Invalid(format!("tile '{}' has zero weight", tile.name)));
        }
        if self.sequence_length < GRID_ROWS {
            return Err(TuningError::Invalid(format!(
                "sequence length {} is shorter than the board ({GRID_ROWS} rows)",
                self.sequence_length
            )));
        }
        if self.attempts_per_game == 0 {
            return Err(TuningError::Invalid("attempts_per_game must be at least 1".into()));
        }
        if self.divide_threshold == 0 {
            return Err(TuningError::Invalid("divide_threshold must be positive".into()));
        }
        if !(self.tile_height.is_finite() && self.tile_height > 0.0) {
            return Err(TuningError::Invalid("tile_height must be positive".into()));
        }
        if self.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            return Err(TuningError::Invalid(format!(
                "settle delay {} ms exceeds {MAX_SETTLE_DELAY_MS} ms",
                self.settle_delay_ms
            )));
        }
        let step = self.scroll_step();
        if !(step.is_finite() && step > 0.0) {
            return Err(TuningError::Invalid(format!("invalid scroll step {step}")));
        }
        Ok(())
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Using default tuning ({}): {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), TuningError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Tuning saved to {}", path.display());
        Ok(())
    }
}
