pub mod arena;
pub mod chunk;
pub mod chunk_map;
pub mod terrain;
pub mod viewport;

use std::sync::Arc;

use chunk::ChunkFeatures;
use chunk_map::ChunkMap;
use grovebound_core::config::WorldGenConfig;
use grovebound_core::types::{ChunkCoord, TileCoord, TileRect};
use terrain::{tree_variant, TerrainGenerator, TreeVariant};

/// A tree tile returned by a region query, with its sprite variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedTree {
    pub tile: TileCoord,
    pub variant: TreeVariant,
}

/// Features visible inside a tile rectangle, in draw order per layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionFeatures {
    pub ponds: Vec<TileCoord>,
    pub bushes: Vec<TileCoord>,
    pub trees: Vec<PlacedTree>,
}

/// Primary public struct for the grovebound-world crate.
/// Owns the seed, the generator, and the chunk cache.
///
/// `World` is `Sync`: a renderer thread may query regions while the
/// simulation thread does the same, and each chunk is still generated once.
pub struct World {
    terrain: TerrainGenerator,
    chunk_map: ChunkMap,
}

impl World {
    /// Create a world. Uses `params.seed` or draws a random one.
    pub fn new(params: WorldGenConfig) -> Self {
        let seed = params.seed.unwrap_or_else(rand::random::<u32>);
        log::info!("World created with seed {seed}");
        Self {
            terrain: TerrainGenerator::new(seed, params),
            chunk_map: ChunkMap::new(),
        }
    }

    /// Create a world with default generation parameters and a fixed seed.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(WorldGenConfig {
            seed: Some(seed),
            ..WorldGenConfig::default()
        })
    }

    pub fn seed(&self) -> u32 {
        self.terrain.seed()
    }

    /// Features of one chunk, generated on first request and cached for the
    /// lifetime of the world.
    pub fn get_chunk(&self, coord: ChunkCoord) -> Arc<ChunkFeatures> {
        self.chunk_map
            .get_or_generate(coord, |c| self.terrain.generate_chunk(c))
    }

    /// Everything visible inside `rect`, gathered from all overlapping chunks.
    ///
    /// Features that spill out of their chunk are clipped here, not at
    /// generation time. Trees standing on their own chunk's pond are dropped.
    pub fn query_region(&self, rect: TileRect) -> RegionFeatures {
        let mut out = RegionFeatures::default();
        for coord in rect.chunk_coords() {
            let chunk = self.get_chunk(coord);
            out.ponds
                .extend(chunk.ponds.iter().copied().filter(|t| rect.contains(*t)));
            out.bushes
                .extend(chunk.bushes.iter().copied().filter(|t| rect.contains(*t)));
            out.trees.extend(
                chunk
                    .visible_trees()
                    .filter(|t| rect.contains(*t))
                    .map(|tile| PlacedTree {
                        tile,
                        variant: tree_variant(tile, self.seed()),
                    }),
            );
        }
        out
    }

    /// Number of chunk generations performed so far.
    pub fn generation_count(&self) -> u64 {
        self.chunk_map.generation_count()
    }

    /// Get the chunk map for reading.
    pub fn chunk_map(&self) -> &ChunkMap {
        &self.chunk_map
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_same_seed_chunk_identical() {
        let world = World::with_seed(42);
        let a = world.get_chunk(IVec2::new(0, 0));
        let b = world.get_chunk(IVec2::new(0, 0));
        assert_eq!(a.trees, b.trees);
        assert_eq!(a.ponds, b.ponds);
        assert_eq!(a.bushes, b.bushes);

        let other = World::with_seed(42);
        assert_eq!(*other.get_chunk(IVec2::new(0, 0)), *a);
    }

    #[test]
    fn test_generation_order_does_not_matter() {
        let forward = World::with_seed(9);
        let backward = World::with_seed(9);
        let coords: Vec<_> = (-3..3).map(|i| IVec2::new(i, -i)).collect();
        for c in &coords {
            forward.get_chunk(*c);
        }
        for c in coords.iter().rev() {
            backward.get_chunk(*c);
        }
        for c in &coords {
            assert_eq!(forward.get_chunk(*c), backward.get_chunk(*c));
        }
    }

    #[test]
    fn test_repeated_queries_do_not_regenerate() {
        let world = World::with_seed(1);
        let rect = TileRect::new(IVec2::new(-20, -20), IVec2::new(20, 20));
        let first = world.query_region(rect);
        let count = world.generation_count();
        assert_eq!(count, rect.chunk_coords().count() as u64);
        assert_eq!(count, 16);

        let again = world.query_region(rect);
        assert_eq!(world.generation_count(), count);
        assert_eq!(first, again);

        // Overlapping sub-rect touches only cached chunks.
        world.query_region(TileRect::new(IVec2::new(-5, -5), IVec2::new(5, 5)));
        assert_eq!(world.generation_count(), count);
    }

    #[test]
    fn test_query_clips_to_rect() {
        let world = World::with_seed(77);
        let rect = TileRect::new(IVec2::new(3, 3), IVec2::new(12, 9));
        let region = world.query_region(rect);
        assert!(region.ponds.iter().all(|t| rect.contains(*t)));
        assert!(region.bushes.iter().all(|t| rect.contains(*t)));
        assert!(region.trees.iter().all(|t| rect.contains(t.tile)));
    }

    #[test]
    fn test_query_drops_trees_on_ponds_and_tags_variant() {
        let world = World::new(WorldGenConfig {
            seed: Some(5),
            pond_chance: 1.0,
            ..WorldGenConfig::default()
        });
        let rect = TileRect::new(IVec2::new(-64, -64), IVec2::new(63, 63));
        let region = world.query_region(rect);

        let mut expected = Vec::new();
        let mut hidden = 0;
        for coord in rect.chunk_coords() {
            let chunk = world.get_chunk(coord);
            hidden += chunk.trees.iter().filter(|t| chunk.is_pond(**t)).count();
            expected.extend(chunk.visible_trees().filter(|t| rect.contains(*t)));
        }
        let got: Vec<_> = region.trees.iter().map(|t| t.tile).collect();
        assert_eq!(got, expected);
        assert!(hidden > 0, "with a pond in every chunk some trees should be hidden");

        for tree in &region.trees {
            assert_eq!(tree.variant, tree_variant(tree.tile, 5));
        }
    }

    #[test]
    fn test_query_matches_chunk_contents() {
        let world = World::with_seed(123);
        let coord = IVec2::new(2, -1);
        let chunk = world.get_chunk(coord);
        let origin = coord * grovebound_core::constants::CHUNK_SIZE;
        let rect = TileRect::new(origin, origin + IVec2::splat(15));
        let region = world.query_region(rect);
        // Bushes never leave their chunk, so the whole chunk rect returns all of them.
        assert_eq!(region.bushes, chunk.bushes);
        assert_eq!(region.ponds.len(), chunk.ponds.iter().filter(|t| rect.contains(**t)).count());
    }

    #[test]
    fn test_random_seed_when_unset() {
        let world = World::new(WorldGenConfig::default());
        // Whatever seed was drawn, it is stable for the world's lifetime.
        assert_eq!(world.seed(), world.terrain().seed());
    }

    #[test]
    fn test_concurrent_queries_share_cache() {
        let world = World::with_seed(8);
        let rect = TileRect::new(IVec2::new(-40, -40), IVec2::new(40, 40));
        let results: Vec<RegionFeatures> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| world.query_region(rect))).collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("query thread panicked"))
                .collect()
        });
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(world.generation_count(), rect.chunk_coords().count() as u64);
    }
}
