use grovebound_core::constants::{SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
use grovebound_core::math::pixel_offset_to_tile;
use grovebound_core::types::TileRect;
use glam::{IVec2, Vec2};

/// Camera window over the world, in integer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// World pixel at the top-left corner of the view.
    pub offset: IVec2,
    /// Visible size in world pixels (screen size divided by zoom).
    pub size: IVec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: IVec2::ZERO,
            size: IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }
}

impl Viewport {
    /// Follow-camera: center the zoomed view on `focus`.
    pub fn centered_on(focus: Vec2, screen: IVec2, zoom: f32) -> Self {
        let zoom = if zoom > 0.0 { zoom } else { 1.0 };
        let size = IVec2::new(
            (screen.x as f32 / zoom) as i32,
            (screen.y as f32 / zoom) as i32,
        );
        let offset = IVec2::new(
            (focus.x - (size.x / 2) as f32) as i32,
            (focus.y - (size.y / 2) as f32) as i32,
        );
        Self { offset, size }
    }

    /// Tiles touched by the view, inclusive on both ends.
    pub fn visible_tiles(&self) -> TileRect {
        let last = self.offset + (self.size - IVec2::ONE).max(IVec2::ZERO);
        TileRect::new(
            pixel_offset_to_tile(self.offset),
            pixel_offset_to_tile(last),
        )
    }

    /// Pixel rectangle covered by the view as (min, max).
    pub fn pixel_bounds(&self) -> (IVec2, IVec2) {
        (self.offset, self.offset + self.size)
    }

    /// Screen-space position of a world tile's top-left corner.
    pub fn tile_to_screen(&self, tile: IVec2) -> IVec2 {
        tile * TILE_SIZE - self.offset
    }
}
