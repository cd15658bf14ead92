//! Column scrolling and freezing
//!
//! Each column carries a cyclic scroll offset in percent of its full strip. The
//! frame loop advances unpaused columns; a click samples the offset exactly once and
//! turns it into a 5-row window of the strip.

use serde::{Deserialize, Serialize};

use super::sequence::ColumnSequence;
use super::tiles::TileId;
use crate::consts::*;

/// Scroll offsets and pause flags for all columns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    offsets: [f64; GRID_COLS],
    paused: [bool; GRID_COLS],
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offsets(&self) -> &[f64; GRID_COLS] {
        &self.offsets
    }

    pub fn paused(&self) -> &[bool; GRID_COLS] {
        &self.paused
    }

    #[inline]
    pub fn offset(&self, col: usize) -> f64 {
        self.offsets[col]
    }

    #[inline]
    pub fn is_paused(&self, col: usize) -> bool {
        self.paused[col]
    }

    pub fn all_paused(&self) -> bool {
        self.paused.iter().all(|&p| p)
    }

    /// Advance every unpaused column by `step` percent, wrapping at 100
    pub fn advance(&mut self, step: f64) {
        for (offset, paused) in self.offsets.iter_mut().zip(self.paused) {
            if !paused {
                *offset = wrap_offset(*offset + step);
            }
        }
    }

    /// Pause a column and return the offset it stopped at
    pub fn freeze(&mut self, col: usize) -> f64 {
        self.paused[col] = true;
        self.offsets[col]
    }

    /// Unpause all columns (next round), offsets carry over
    pub fn release_all(&mut self) {
        self.paused = [false; GRID_COLS];
    }

    /// Back to the initial position (restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub(crate) fn set_offset(&mut self, col: usize, offset: f64) {
        self.offsets[col] = wrap_offset(offset);
    }
}

#[inline]
fn wrap_offset(offset: f64) -> f64 {
    let wrapped = offset.rem_euclid(SCROLL_WRAP);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= SCROLL_WRAP { 0.0 } else { wrapped }
}

/// Index of the strip tile sitting in the top row at `offset`
pub fn start_index(offset: f64, sequence_len: usize, tile_height: f64) -> usize {
    let total_height = tile_height * sequence_len as f64;
    let position = (offset / SCROLL_WRAP) * total_height;
    let index = (position / tile_height).floor();
    if index.is_finite() && index > 0.0 {
        (index as usize) % sequence_len
    } else {
        0
    }
}

/// The 5 tiles a column shows when frozen at `offset`
pub fn resolve_window(offset: f64, sequence: &ColumnSequence, tile_height: f64) -> [TileId; GRID_ROWS] {
    let start = start_index(offset, sequence.len(), tile_height);
    std::array::from_fn(|row| sequence.at(start + row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(len: usize) -> ColumnSequence {
        ColumnSequence::new((0..len).map(|i| TileId((i % 256) as u8)).collect())
    }

    #[test]
    fn test_advance_wraps() {
        let mut scroll = ScrollState::new();
        scroll.set_offset(0, 99.5);
        scroll.advance(1.0);
        assert!((scroll.offset(0) - 0.5).abs() < 1e-9);
        assert!((scroll.offset(1) - 1.0).abs() < 1e-9);
        assert!(scroll.offsets().iter().all(|&o| (0.0..100.0).contains(&o)));
    }

    #[test]
    fn test_paused_column_does_not_move() {
        let mut scroll = ScrollState::new();
        scroll.advance(10.0);
        let stopped = scroll.freeze(1);
        for _ in 0..50 {
            scroll.advance(3.3);
        }
        assert_eq!(scroll.offset(1), stopped);
        assert_ne!(scroll.offset(0), stopped);
        assert!(!scroll.all_paused());
    }

    #[test]
    fn test_release_keeps_offsets() {
        let mut scroll = ScrollState::new();
        scroll.advance(12.0);
        for col in 0..GRID_COLS {
            scroll.freeze(col);
        }
        assert!(scroll.all_paused());
        scroll.release_all();
        assert!(!scroll.is_paused(0));
        assert_eq!(scroll.offset(2), 12.0);
        scroll.reset();
        assert_eq!(scroll.offset(2), 0.0);
    }

    #[test]
    fn test_start_index() {
        // 50 tiles: each tile spans 2%
        assert_eq!(start_index(0.0, 50, TILE_HEIGHT), 0);
        assert_eq!(start_index(1.99, 50, TILE_HEIGHT), 0);
        assert_eq!(start_index(2.0, 50, TILE_HEIGHT), 1);
        assert_eq!(start_index(50.0, 50, TILE_HEIGHT), 25);
        assert_eq!(start_index(99.99, 50, TILE_HEIGHT), 49);
    }

    #[test]
    fn test_window_wraps_around_strip() {
        let seq = strip(50);
        let window = resolve_window(98.0, &seq, TILE_HEIGHT);
        assert_eq!(window, [TileId(49), TileId(0), TileId(1), TileId(2), TileId(3)]);

        let window = resolve_window(10.0, &seq, TILE_HEIGHT);
        assert_eq!(window, [TileId(5), TileId(6), TileId(7), TileId(8), TileId(9)]);
    }
}
