//! Round scoring
//!
//! Only the scoring band (rows 1-3) is inspected. Patterns are checked in strict
//! priority order:
//!
//! 1. Three in a row horizontally claims its cells.
//! 2. Two adjacent equal cells in a row score unless both cells are already claimed.
//! 3. The two 3-cell diagonals through the centre cell.
//!
//! Diagonals are not gated by horizontal claims, so a cell can pay out for a row and
//! a diagonal in the same round.

use serde::{Deserialize, Serialize};

use super::grid::{CellPos, Grid, MatchedCells};
use super::tiles::{TileId, TileSet};
use crate::consts::*;

/// Pattern multipliers applied to a ball's weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub three_horizontal: u64,
    pub two_horizontal: u64,
    pub three_diagonal: u64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            three_horizontal: MULT_3H,
            two_horizontal: MULT_2H,
            three_diagonal: MULT_3D,
        }
    }
}

/// Which pattern paid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    ThreeHorizontal,
    TwoHorizontal,
    /// Top-left to bottom-right
    DiagonalDown,
    /// Top-right to bottom-left
    DiagonalUp,
}

/// One paying pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternHit {
    pub kind: PatternKind,
    pub tile: TileId,
    pub points: u64,
    pub cells: Vec<CellPos>,
}

/// Result of scoring one board
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u64,
    pub matched: MatchedCells,
    pub hits: Vec<PatternHit>,
}

impl ScoreResult {
    fn record(&mut self, kind: PatternKind, tile: TileId, points: u64, cells: &[CellPos]) {
        self.score += points;
        for &cell in cells {
            self.matched.insert(cell);
        }
        self.hits.push(PatternHit {
            kind,
            tile,
            points,
            cells: cells.to_vec(),
        });
    }
}

const DIAGONAL_DOWN: [CellPos; 3] = [CellPos::new(1, 0), CellPos::new(2, 1), CellPos::new(3, 2)];
const DIAGONAL_UP: [CellPos; 3] = [CellPos::new(1, 2), CellPos::new(2, 1), CellPos::new(3, 0)];

/// Score the scoring band of `grid`. Pure: reads the board only.
pub fn score_grid(grid: &Grid, tiles: &TileSet, rules: &ScoringRules) -> ScoreResult {
    let mut result = ScoreResult::default();
    let mut claimed = [[false; GRID_COLS]; GRID_ROWS];

    // 3-horizontal
    for row in SCORING_FIRST_ROW..=SCORING_LAST_ROW {
        let tile = grid.get(row, 0);
        if (1..GRID_COLS).all(|col| grid.get(row, col) == tile) {
            let cells: Vec<CellPos> = (0..GRID_COLS).map(|col| CellPos::new(row, col)).collect();
            for cell in &cells {
                claimed[cell.row][cell.col] = true;
            }
            let points = tiles.weight(tile) as u64 * rules.three_horizontal;
            result.record(PatternKind::ThreeHorizontal, tile, points, &cells);
        }
    }

    // 2-horizontal, claims evaluated per pair
    for row in SCORING_FIRST_ROW..=SCORING_LAST_ROW {
        for col in 0..GRID_COLS - 1 {
            if claimed[row][col] && claimed[row][col + 1] {
                continue;
            }
            let tile = grid.get(row, col);
            if grid.get(row, col + 1) == tile {
                let points = tiles.weight(tile) as u64 * rules.two_horizontal;
                let cells = [CellPos::new(row, col), CellPos::new(row, col + 1)];
                result.record(PatternKind::TwoHorizontal, tile, points, &cells);
            }
        }
    }

    for (kind, diagonal) in [
        (PatternKind::DiagonalDown, DIAGONAL_DOWN),
        (PatternKind::DiagonalUp, DIAGONAL_UP),
    ] {
        let tile = grid.at(diagonal[0]);
        if diagonal.iter().all(|&cell| grid.at(cell) == tile) {
            // weight comes from the shared centre cell
            let centre = grid.get(2, 1);
            let points = tiles.weight(centre) as u64 * rules.three_diagonal;
            result.record(kind, centre, points, &diagonal);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const A: TileId = TileId(6); // weight 70
    const B: TileId = TileId(0); // weight 10
    const C: TileId = TileId(1); // weight 20
    const D: TileId = TileId(2); // weight 30
    const E: TileId = TileId(3); // weight 40

    fn score(rows: [[TileId; GRID_COLS]; GRID_ROWS]) -> ScoreResult {
        score_grid(&Grid::from_rows(rows), &TileSet::default_balls(), &ScoringRules::default())
    }

    /// Band rows with no horizontal or diagonal matches
    fn blank() -> [[TileId; GRID_COLS]; GRID_ROWS] {
        [[A, A, A], [B, C, D], [D, E, B], [C, B, E], [A, A, A]]
    }

    #[test]
    fn test_empty_board_scores_nothing() {
        let result = score(blank());
        assert_eq!(result.score, 0);
        assert!(result.matched.is_empty());
        assert!(result.hits.is_empty());
    }

    #[test]
    fn test_edge_rows_are_ignored() {
        // rows 0 and 4 hold three-of-a-kind but are outside the band
        let result = score(blank());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_single_three_horizontal() {
        let mut rows = blank();
        rows[2] = [A, A, A];
        let result = score(rows);
        assert_eq!(result.score, 700);
        assert_eq!(result.matched.len(), 3);
        assert!(result.matched.contains(2, 0));
        assert!(result.matched.contains(2, 2));
        assert_eq!(result.hits.len(), 1);
        assert_eq!(result.hits[0].kind, PatternKind::ThreeHorizontal);
    }

    #[test]
    fn test_three_horizontal_excludes_pairs() {
        let mut rows = blank();
        rows[1] = [D, D, D];
        let result = score(rows);
        // 30 * 10 only, not also 2 * (30 * 2)
        assert_eq!(result.score, 300);
        assert!(result.hits.iter().all(|h| h.kind != PatternKind::TwoHorizontal));
    }

    #[test]
    fn test_two_horizontal_left_and_right() {
        let mut rows = blank();
        rows[1] = [C, C, D];
        rows[3] = [B, E, E];
        let result = score(rows);
        assert_eq!(result.score, 20 * 2 + 40 * 2);
        assert_eq!(result.matched.len(), 4);
        assert!(result.matched.contains(1, 0));
        assert!(result.matched.contains(1, 1));
        assert!(!result.matched.contains(1, 2));
        assert!(result.matched.contains(3, 2));
    }

    #[test]
    fn test_diagonal_down() {
        let mut rows = blank();
        rows[1][0] = E;
        rows[2][1] = E;
        rows[3][2] = E;
        let result = score(rows);
        assert_eq!(result.score, 40 * 30);
        assert!(result.hits.iter().any(|h| h.kind == PatternKind::DiagonalDown));
    }

    #[test]
    fn test_both_diagonals_count() {
        let t = TileId(7); // weight 100
        let rows = [
            [A, B, A],
            [t, C, t],
            [D, t, E],
            [t, B, t],
            [A, B, A],
        ];
        let result = score(rows);
        assert_eq!(result.score, 2 * 100 * 30);
        assert_eq!(result.matched.len(), 5);
        assert_eq!(result.hits.len(), 2);
    }

    #[test]
    fn test_diagonal_double_counts_horizontal_cells() {
        let rows = [
            [B, C, D],
            [A, A, A],
            [C, A, E],
            [D, B, A],
            [B, C, D],
        ];
        let result = score(rows);
        // row 1 pays, and so does the down diagonal sharing (1,0)
        assert_eq!(result.score, 70 * 10 + 70 * 30);
        assert!(result.matched.contains(3, 2));
        assert!(!result.matched.contains(3, 0));
    }

    #[test]
    fn test_custom_multipliers() {
        let mut rows = blank();
        rows[2] = [A, A, A];
        let rules = ScoringRules {
            three_horizontal: 1,
            two_horizontal: 1,
            three_diagonal: 1,
        };
        let result = score_grid(&Grid::from_rows(rows), &TileSet::default_balls(), &rules);
        assert_eq!(result.score, 70);
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        proptest::array::uniform5(proptest::array::uniform3((0u8..8).prop_map(TileId)))
            .prop_map(Grid::from_rows)
    }

    proptest! {
        #[test]
        fn prop_scoring_is_deterministic(grid in arb_grid()) {
            let tiles = TileSet::default_balls();
            let rules = ScoringRules::default();
            let before = grid.clone();
            let first = score_grid(&grid, &tiles, &rules);
            let second = score_grid(&grid, &tiles, &rules);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(grid, before);
        }

        #[test]
        fn prop_matched_cells_stay_in_band(grid in arb_grid()) {
            let result = score_grid(&grid, &TileSet::default_balls(), &ScoringRules::default());
            prop_assert!(result.matched.iter().all(|c| c.in_scoring_band()));
            prop_assert_eq!(result.score, result.hits.iter().map(|h| h.points).sum::<u64>());
            prop_assert_eq!(result.score == 0, result.matched.is_empty());
        }

        #[test]
        fn prop_full_row_pays_exactly_three_horizontal(
            grid in arb_grid(),
            row in 1usize..=3,
            tile in 0u8..8,
        ) {
            let mut grid = grid;
            for col in 0..GRID_COLS {
                grid.set(row, col, TileId(tile));
            }
            let result = score_grid(&grid, &TileSet::default_balls(), &ScoringRules::default());
            let row_hits: Vec<_> = result
                .hits
                .iter()
                .filter(|h| h.kind != PatternKind::DiagonalDown && h.kind != PatternKind::DiagonalUp)
                .filter(|h| h.cells[0].row == row)
                .collect();
            prop_assert_eq!(row_hits.len(), 1);
            prop_assert_eq!(row_hits[0].kind, PatternKind::ThreeHorizontal);
        }
    }
}
