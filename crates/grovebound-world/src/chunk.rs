use grovebound_core::types::{ChunkCoord, TileCoord};

/// Terrain features generated for one chunk. All tiles are absolute, and
/// tree clusters may spill into neighbouring chunks' tile space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFeatures {
    /// Chunk coordinate in chunk-space.
    pub coord: ChunkCoord,
    /// Tree tiles in draw order. May repeat and may overlap ponds.
    pub trees: Vec<TileCoord>,
    /// Pond blob tiles.
    pub ponds: Vec<TileCoord>,
    /// Bush tiles, never on a pond tile of this chunk.
    pub bushes: Vec<TileCoord>,
}

impl ChunkFeatures {
    pub fn empty(coord: ChunkCoord) -> Self {
        Self {
            coord,
            trees: Vec::new(),
            ponds: Vec::new(),
            bushes: Vec::new(),
        }
    }

    pub fn is_pond(&self, tile: TileCoord) -> bool {
        self.ponds.contains(&tile)
    }

    /// Trees that are drawn, i.e. not covered by this chunk's pond.
    pub fn visible_trees(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.trees.iter().copied().filter(|t| !self.is_pond(*t))
    }

    /// Total feature tiles, counting duplicates.
    pub fn feature_count(&self) -> usize {
        self.trees.len() + self.ponds.len() + self.bushes.len()
    }
}
