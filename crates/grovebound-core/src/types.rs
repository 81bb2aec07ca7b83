use glam::{IVec2, Vec2};

use crate::math::tile_to_chunk;

/// Chunk coordinate in chunk-space (each unit = CHUNK_SIZE tiles).
pub type ChunkCoord = IVec2;

/// Absolute tile coordinate.
pub type TileCoord = IVec2;

/// Inclusive rectangle in tile-space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRect {
    pub min: TileCoord,
    pub max: TileCoord,
}

impl TileRect {
    /// Panics if `min` exceeds `max` on either axis; an inverted rect is a caller bug.
    pub fn new(min: TileCoord, max: TileCoord) -> Self {
        assert!(
            min.x <= max.x && min.y <= max.y,
            "inverted tile rect: min {min} max {max}"
        );
        Self { min, max }
    }

    pub fn contains(&self, tile: TileCoord) -> bool {
        tile.x >= self.min.x && tile.x <= self.max.x && tile.y >= self.min.y && tile.y <= self.max.y
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// First and last chunk touched by this rect, inclusive.
    pub fn chunk_span(&self) -> (ChunkCoord, ChunkCoord) {
        (tile_to_chunk(self.min), tile_to_chunk(self.max))
    }

    /// Every chunk coordinate overlapping this rect, row by row.
    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> {
        let (lo, hi) = self.chunk_span();
        (lo.y..=hi.y).flat_map(move |cy| (lo.x..=hi.x).map(move |cx| IVec2::new(cx, cy)))
    }
}

/// Axis-aligned box in pixel space, stored as center and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Square box of side `size`.
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::from_center_size(center, Vec2::splat(size))
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Open-interval overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        d.x < reach.x && d.y < reach.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }
}
