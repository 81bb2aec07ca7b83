use crate::constants::{CHUNK_SIZE, TILE_SIZE};
use crate::types::{ChunkCoord, TileCoord};
use glam::{IVec2, Vec2};

/// Largest chunk coordinate magnitude whose tile origin still fits in an i32.
pub const MAX_CHUNK_COORD: i32 = i32::MAX / CHUNK_SIZE - 1;

/// Convert a tile coordinate to its containing chunk coordinate.
pub fn tile_to_chunk(tile: TileCoord) -> ChunkCoord {
    IVec2::new(tile.x.div_euclid(CHUNK_SIZE), tile.y.div_euclid(CHUNK_SIZE))
}

/// Convert a tile coordinate to its local offset within a chunk.
pub fn tile_to_local(tile: TileCoord) -> IVec2 {
    IVec2::new(tile.x.rem_euclid(CHUNK_SIZE), tile.y.rem_euclid(CHUNK_SIZE))
}

/// Absolute tile coordinate of a chunk's top-left tile.
///
/// Panics when the chunk lies so far out that its tiles are not addressable.
pub fn chunk_origin(chunk: ChunkCoord) -> TileCoord {
    assert!(
        chunk.x.abs() <= MAX_CHUNK_COORD && chunk.y.abs() <= MAX_CHUNK_COORD,
        "chunk coordinate {chunk} out of addressable range"
    );
    chunk * CHUNK_SIZE
}

/// Convert a chunk coordinate and local offset back to tile-space.
pub fn chunk_local_to_tile(chunk: ChunkCoord, local: IVec2) -> TileCoord {
    chunk_origin(chunk) + local
}

/// Tile containing a pixel position.
pub fn pixel_to_tile(px: Vec2) -> TileCoord {
    (px / TILE_SIZE as f32).floor().as_ivec2()
}

/// Integer pixel offset to tile, flooring toward negative infinity.
pub fn pixel_offset_to_tile(px: IVec2) -> TileCoord {
    IVec2::new(px.x.div_euclid(TILE_SIZE), px.y.div_euclid(TILE_SIZE))
}

/// Pixel position of a tile's center.
pub fn tile_center_px(tile: TileCoord) -> Vec2 {
    (tile.as_vec2() + Vec2::splat(0.5)) * TILE_SIZE as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_to_chunk_positive() {
        assert_eq!(tile_to_chunk(IVec2::new(0, 0)), IVec2::ZERO);
        assert_eq!(tile_to_chunk(IVec2::new(15, 15)), IVec2::ZERO);
        assert_eq!(tile_to_chunk(IVec2::new(16, 0)), IVec2::new(1, 0));
    }

    #[test]
    fn test_tile_to_chunk_negative() {
        assert_eq!(tile_to_chunk(IVec2::new(-1, 0)), IVec2::new(-1, 0));
        assert_eq!(tile_to_chunk(IVec2::new(-16, 0)), IVec2::new(-1, 0));
        assert_eq!(tile_to_chunk(IVec2::new(-17, -33)), IVec2::new(-2, -3));
    }

    #[test]
    fn test_tile_to_local_negative() {
        assert_eq!(tile_to_local(IVec2::new(-1, 0)), IVec2::new(15, 0));
        assert_eq!(tile_to_local(IVec2::new(-16, 17)), IVec2::new(0, 1));
    }

    #[test]
    fn test_chunk_local_roundtrip() {
        let tile = IVec2::new(-50, 103);
        let back = chunk_local_to_tile(tile_to_chunk(tile), tile_to_local(tile));
        assert_eq!(back, tile);
    }

    #[test]
    #[should_panic(expected = "out of addressable range")]
    fn test_chunk_origin_rejects_overflowing_coord() {
        chunk_origin(IVec2::new(i32::MAX, 0));
    }

    #[test]
    fn test_pixel_to_tile_floors() {
        assert_eq!(pixel_to_tile(Vec2::new(63.9, 64.0)), IVec2::new(0, 1));
        assert_eq!(pixel_to_tile(Vec2::new(-0.5, -64.0)), IVec2::new(-1, -1));
        assert_eq!(pixel_offset_to_tile(IVec2::new(-1, 127)), IVec2::new(-1, 1));
    }

    #[test]
    fn test_tile_center_px() {
        assert_eq!(tile_center_px(IVec2::new(0, -1)), Vec2::new(32.0, -32.0));
    }
}
