//! Ball types and their scoring weights
//!
//! The engine only ever looks at a tile's id and weight. The asset key is carried
//! through untouched for the presentation layer.

use serde::{Deserialize, Serialize};

/// Identifier of a ball type, an index into the [`TileSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u8);

impl TileId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single ball type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub name: String,
    /// Scoring weight (positive)
    pub weight: u32,
    /// Opaque asset reference for the renderer
    pub asset: String,
}

impl TileSpec {
    pub fn new(name: &str, weight: u32, asset: &str) -> Self {
        Self {
            name: name.to_string(),
            weight,
            asset: asset.to_string(),
        }
    }
}

/// The full set of ball types in play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    pub tiles: Vec<TileSpec>,
}

impl Default for TileSet {
    fn default() -> Self {
        Self::default_balls()
    }
}

impl TileSet {
    /// The standard eight-ball set
    pub fn default_balls() -> Self {
        Self {
            tiles: vec![
                TileSpec::new("red", 10, "balls/red.png"),
                TileSpec::new("orange", 20, "balls/orange.png"),
                TileSpec::new("yellow", 30, "balls/yellow.png"),
                TileSpec::new("green", 40, "balls/green.png"),
                TileSpec::new("blue", 50, "balls/blue.png"),
                TileSpec::new("purple", 60, "balls/purple.png"),
                TileSpec::new("pink", 70, "balls/pink.png"),
                TileSpec::new("gold", 100, "balls/gold.png"),
            ],
        }
    }

    /// Build a set from bare weights (asset keys derived from the index)
    pub fn from_weights(weights: &[u32]) -> Self {
        Self {
            tiles: weights
                .iter()
                .enumerate()
                .map(|(i, &w)| TileSpec::new(&format!("ball{i}"), w, &format!("balls/{i}.png")))
                .collect(),
        }
    }

    /// Number of distinct ball types
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Weight of a tile; unknown ids weigh nothing
    pub fn weight(&self, id: TileId) -> u32 {
        self.tiles.get(id.index()).map(|t| t.weight).unwrap_or(0)
    }

    pub fn asset(&self, id: TileId) -> Option<&str> {
        self.tiles.get(id.index()).map(|t| t.asset.as_str())
    }

    /// All valid ids in order
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tiles.len()).map(|i| TileId(i as u8))
    }
}
