//! Column sequence generation
//!
//! Each column spins through its own long strip of balls. Strips are redrawn at the
//! start of every round and only ever read through modular indexing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tiles::TileId;

/// A fixed-length strip of balls for one column
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnSequence {
    tiles: Vec<TileId>,
}

impl ColumnSequence {
    pub fn new(tiles: Vec<TileId>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at `index` wrapped into the strip
    ///
    /// Panics on an empty strip.
    #[inline]
    pub fn at(&self, index: usize) -> TileId {
        self.tiles[index % self.tiles.len()]
    }

    pub fn as_slice(&self) -> &[TileId] {
        &self.tiles
    }
}

/// Draw `length` independent, uniformly distributed balls out of `tile_count` types
pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: usize, tile_count: usize) -> ColumnSequence {
    debug_assert!(tile_count > 0 && tile_count <= 256);
    let tiles = (0..length)
        .map(|_| TileId(rng.random_range(0..tile_count) as u8))
        .collect();
    ColumnSequence { tiles }
}

/// Draw one fresh sequence per column
pub fn generate_columns<R: Rng + ?Sized, const COLS: usize>(
    rng: &mut R,
    length: usize,
    tile_count: usize,
) -> [ColumnSequence; COLS] {
    std::array::from_fn(|_| generate(&mut *rng, length, tile_count))
}
