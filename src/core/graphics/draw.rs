//=========================================================================
// Draw Commands
//=========================================================================
//
// The draw list recorded between `begin_drawing` and `end_drawing`.
// Commands reference textures by handle and carry everything needed to
// rasterize them later.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::{Color, TextureId};

//=== Rect ================================================================

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

//=== DrawCommand =========================================================

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),

    /// Texture region `source` drawn into `dest`, rotated by `rotation`
    /// degrees around `origin` (relative to `dest`'s top-left).
    Texture {
        texture: TextureId,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    },

    Rectangle { rect: Rect, color: Color },

    RectangleLines { rect: Rect, thickness: f32, color: Color },

    Text { text: String, position: Vec2, font_size: f32, color: Color },
}
