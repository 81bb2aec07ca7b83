use grovebound_core::config::WorldGenConfig;
use grovebound_core::constants::*;
use grovebound_core::math::chunk_origin;
use grovebound_core::types::{ChunkCoord, TileCoord};
use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::chunk::ChunkFeatures;

/// Sprite variant for a tree tile, picked by coordinate parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeVariant {
    Pine,
    Oak,
}

/// Pine when `x + y + seed` is even, oak otherwise.
pub fn tree_variant(tile: TileCoord, seed: u32) -> TreeVariant {
    let sum = (tile.x as i64) + (tile.y as i64) + seed as i64;
    if sum & 1 == 0 {
        TreeVariant::Pine
    } else {
        TreeVariant::Oak
    }
}

/// Deterministic chunk feature generator.
///
/// Each chunk draws from two independent streams: one for tree clusters and
/// the pond, one for bushes. Both are seeded only from the chunk coordinate
/// and the world seed, so output never depends on generation order.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    seed: u32,
    params: WorldGenConfig,
}

impl TerrainGenerator {
    pub fn new(seed: u32, params: WorldGenConfig) -> Self {
        Self { seed, params }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn params(&self) -> &WorldGenConfig {
        &self.params
    }

    /// Seed of the tree/pond stream for a chunk.
    pub fn feature_seed(&self, coord: ChunkCoord) -> u32 {
        mix_seed(coord, FEATURE_SEED_MUL_X, FEATURE_SEED_MUL_Y, 0, self.seed)
    }

    /// Seed of the bush stream for a chunk.
    pub fn bush_seed(&self, coord: ChunkCoord) -> u32 {
        mix_seed(
            coord,
            BUSH_SEED_MUL_X,
            BUSH_SEED_MUL_Y,
            BUSH_SEED_OFFSET,
            self.seed,
        )
    }

    /// Generate the features of one chunk. Pure in `(coord, seed, params)`.
    ///
    /// Draws come from ChaCha8, so layouts are stable across platforms and
    /// releases but do not match worlds made by other generators for the
    /// same seed.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> ChunkFeatures {
        let origin = chunk_origin(coord);

        let mut rng = ChaCha8Rng::seed_from_u64(self.feature_seed(coord) as u64);
        let trees = self.scatter_trees(&mut rng, origin);
        let ponds = self.carve_pond(&mut rng, origin);

        let mut bush_rng = ChaCha8Rng::seed_from_u64(self.bush_seed(coord) as u64);
        let bushes = self.scatter_bushes(&mut bush_rng, origin, &ponds);

        ChunkFeatures {
            coord,
            trees,
            ponds,
            bushes,
        }
    }

    /// Tree clusters around random anchors. Offsets are not clipped to the chunk.
    fn scatter_trees(&self, rng: &mut ChaCha8Rng, origin: TileCoord) -> Vec<TileCoord> {
        let p = &self.params;
        let clusters = rng.gen_range(1..=p.max_tree_clusters.max(1));
        let mut trees = Vec::new();
        for _ in 0..clusters {
            let anchor = origin
                + IVec2::new(rng.gen_range(0..CHUNK_SIZE), rng.gen_range(0..CHUNK_SIZE));
            let count = rng.gen_range(p.cluster_trees.min..=p.cluster_trees.max);
            let radius = rng.gen_range(p.cluster_radius.min..=p.cluster_radius.max);
            for _ in 0..count {
                let dx = rng.gen_range(-radius..=radius);
                let dy = rng.gen_range(-radius..=radius);
                trees.push(anchor + IVec2::new(dx, dy));
            }
        }
        trees
    }

    /// Irregular pond blob: every offset inside the radius survives only if it
    /// also fits inside a per-offset jittered radius.
    fn carve_pond(&self, rng: &mut ChaCha8Rng, origin: TileCoord) -> Vec<TileCoord> {
        let p = &self.params;
        let mut ponds = Vec::new();
        if rng.gen::<f64>() >= p.pond_chance {
            return ponds;
        }

        let center =
            origin + IVec2::new(rng.gen_range(0..CHUNK_SIZE), rng.gen_range(0..CHUNK_SIZE));
        let radius = rng.gen_range(p.pond_radius.min..=p.pond_radius.max);
        let r2 = radius * radius;
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let dist2 = dx * dx + dy * dy;
                if dist2 > r2 {
                    continue;
                }
                let noise = rng.gen_range(p.pond_noise.min..=p.pond_noise.max);
                let jittered = radius as f64 * noise;
                if dist2 as f64 <= jittered * jittered {
                    ponds.push(center + IVec2::new(dx, dy));
                }
            }
        }
        ponds
    }

    /// Independent per-tile bush roll. The roll is always consumed, even on
    /// pond tiles, so the stream stays aligned across pond layouts.
    fn scatter_bushes(
        &self,
        rng: &mut ChaCha8Rng,
        origin: TileCoord,
        ponds: &[TileCoord],
    ) -> Vec<TileCoord> {
        let mut bushes = Vec::new();
        for tx in origin.x..origin.x + CHUNK_SIZE {
            for ty in origin.y..origin.y + CHUNK_SIZE {
                let tile = IVec2::new(tx, ty);
                let roll = rng.gen::<f64>();
                if roll < self.params.bush_chance && !ponds.contains(&tile) {
                    bushes.push(tile);
                }
            }
        }
        bushes
    }
}

/// `(cx * mul_x + cy * mul_y + seed + offset) mod 2^32`.
fn mix_seed(coord: ChunkCoord, mul_x: i64, mul_y: i64, offset: i64, seed: u32) -> u32 {
    (coord.x as i64)
        .wrapping_mul(mul_x)
        .wrapping_add((coord.y as i64).wrapping_mul(mul_y))
        .wrapping_add(seed as i64)
        .wrapping_add(offset) as u32
}
