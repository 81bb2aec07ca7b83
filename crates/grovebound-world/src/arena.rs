use grovebound_core::constants::TILE_SIZE;
use grovebound_core::math::{pixel_offset_to_tile, tile_center_px};
use grovebound_core::types::{TileCoord, TileRect};
use glam::{IVec2, Vec2};

/// Kind of tile inside the boss arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaTile {
    Floor,
    Wall,
}

/// Bounded rectangular arena for the boss encounter.
///
/// The arena spans `center ± width/2` horizontally and `center ± height/2`
/// vertically (inclusive), with its outermost ring drawn as wall.
#[derive(Debug, Clone, PartialEq)]
pub struct BossArena {
    center: TileCoord,
    bounds: TileRect,
}

impl BossArena {
    pub fn new(center: TileCoord, width_tiles: i32, height_tiles: i32) -> Self {
        let half = IVec2::new(width_tiles / 2, height_tiles / 2);
        Self {
            center,
            bounds: TileRect::new(center - half, center + half),
        }
    }

    /// Arena centred on the middle of the current screen.
    pub fn around_view(offset: IVec2, screen: IVec2, width_tiles: i32, height_tiles: i32) -> Self {
        let center = pixel_offset_to_tile(offset) + pixel_offset_to_tile(screen / 2);
        Self::new(center, width_tiles, height_tiles)
    }

    pub fn center_tile(&self) -> TileCoord {
        self.center
    }

    pub fn center_px(&self) -> Vec2 {
        tile_center_px(self.center)
    }

    pub fn tile_bounds(&self) -> TileRect {
        self.bounds
    }

    pub fn tile_at(&self, tile: TileCoord) -> Option<ArenaTile> {
        if !self.bounds.contains(tile) {
            return None;
        }
        let b = &self.bounds;
        let on_edge = tile.x == b.min.x || tile.x == b.max.x || tile.y == b.min.y || tile.y == b.max.y;
        Some(if on_edge {
            ArenaTile::Wall
        } else {
            ArenaTile::Floor
        })
    }

    /// Every arena tile, column-major, with its kind.
    pub fn tiles(&self) -> impl Iterator<Item = (TileCoord, ArenaTile)> + '_ {
        let b = self.bounds;
        (b.min.x..=b.max.x).flat_map(move |x| {
            (b.min.y..=b.max.y).filter_map(move |y| {
                let t = IVec2::new(x, y);
                self.tile_at(t).map(|k| (t, k))
            })
        })
    }

    pub fn wall_tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.tiles()
            .filter(|(_, k)| *k == ArenaTile::Wall)
            .map(|(t, _)| t)
    }

    /// Pixel box that clamped entities are confined to.
    pub fn clamp_bounds(&self) -> (Vec2, Vec2) {
        let ts = TILE_SIZE as f32;
        let b = &self.bounds;
        let min = Vec2::new(b.min.x as f32 * ts - ts, b.min.y as f32 * ts - ts);
        let max = Vec2::new((b.max.x + 1) as f32 * ts - ts, (b.max.y + 1) as f32 * ts - ts);
        (min, max)
    }

    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        let (min, max) = self.clamp_bounds();
        pos.clamp(min, max)
    }

    /// Boss enters at the centre of the top edge.
    pub fn boss_spawn_px(&self) -> Vec2 {
        tile_center_px(IVec2::new(self.center.x, self.bounds.min.y))
    }

    /// Player enters at the centre of the bottom edge.
    pub fn player_spawn_px(&self) -> Vec2 {
        tile_center_px(IVec2::new(self.center.x, self.bounds.max.y))
    }
}
