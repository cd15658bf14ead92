//! The committed 5x3 board
//!
//! Row 0 is the top. Rows 1-3 form the scoring band; rows 0 and 4 are shown for
//! context only.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tiles::TileId;
use crate::consts::*;

/// A (row, col) board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_scoring_band(&self) -> bool {
        (SCORING_FIRST_ROW..=SCORING_LAST_ROW).contains(&self.row) && self.col < GRID_COLS
    }
}

/// The visible board, indexed `cells[row][col]`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[TileId; GRID_COLS]; GRID_ROWS],
}

impl Grid {
    pub fn from_rows(cells: [[TileId; GRID_COLS]; GRID_ROWS]) -> Self {
        Self { cells }
    }

    /// Uniform random board shown before the first round (cosmetic only)
    pub fn random<R: Rng + ?Sized>(rng: &mut R, tile_count: usize) -> Self {
        let mut cells = [[TileId::default(); GRID_COLS]; GRID_ROWS];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = TileId(rng.random_range(0..tile_count) as u8);
            }
        }
        Self { cells }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> TileId {
        self.cells[row][col]
    }

    #[inline]
    pub fn at(&self, pos: CellPos) -> TileId {
        self.cells[pos.row][pos.col]
    }

    pub fn set(&mut self, row: usize, col: usize, tile: TileId) {
        self.cells[row][col] = tile;
    }

    /// Overwrite one column top to bottom
    pub fn set_column(&mut self, col: usize, window: [TileId; GRID_ROWS]) {
        for (row, tile) in window.into_iter().enumerate() {
            self.cells[row][col] = tile;
        }
    }

    pub fn column(&self, col: usize) -> [TileId; GRID_ROWS] {
        std::array::from_fn(|row| self.cells[row][col])
    }

    pub fn rows(&self) -> &[[TileId; GRID_COLS]; GRID_ROWS] {
        &self.cells
    }
}

/// Cells highlighted by the last scoring pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchedCells(BTreeSet<CellPos>);

impl MatchedCells {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: CellPos) {
        self.0.insert(pos);
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.0.contains(&CellPos::new(row, col))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellPos> {
        self.0.iter()
    }
}

impl FromIterator<CellPos> for MatchedCells {
    fn from_iter<I: IntoIterator<Item = CellPos>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_set_column() {
        let mut grid = Grid::default();
        let window = [TileId(1), TileId(2), TileId(3), TileId(4), TileId(5)];
        grid.set_column(2, window);
        assert_eq!(grid.column(2), window);
        assert_eq!(grid.get(0, 2), TileId(1));
        assert_eq!(grid.get(4, 2), TileId(5));
        assert_eq!(grid.column(0), [TileId(0); GRID_ROWS]);
    }

    #[test]
    fn test_random_grid_in_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        let grid = Grid::random(&mut rng, 4);
        assert!(grid.rows().iter().flatten().all(|t| t.index() < 4));
    }

    #[test]
    fn test_scoring_band() {
        assert!(!CellPos::new(0, 1).in_scoring_band());
        assert!(CellPos::new(1, 0).in_scoring_band());
        assert!(CellPos::new(3, 2).in_scoring_band());
        assert!(!CellPos::new(4, 2).in_scoring_band());
    }

    #[test]
    fn test_matched_cells_dedup() {
        let mut m = MatchedCells::new();
        m.insert(CellPos::new(2, 1));
        m.insert(CellPos::new(2, 1));
        assert_eq!(m.len(), 1);
        assert!(m.contains(2, 1));
        m.clear();
        assert!(m.is_empty());
    }
}
