//=========================================================================
// Sprite
//=========================================================================
//
// A texture drawn as one cell of a rows × columns sprite sheet.
//
// Frame indices run row-major:
//   |---|---|---|
//   | 0 | 1 | 2 |
//   | 3 | 4 | 5 |
//   |---|---|---|
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::graphics::{Color, Rect, TextureId};
use crate::core::resource::{ResourceError, Texture};
use crate::core::scene::{SceneError, SceneResult};
use crate::core::Context;

//=== Sprite ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub position: Vec2,
    /// Degrees, clockwise, about `origin`.
    pub rotation: f32,
    pub scale: Vec2,
    /// Rotation pivot relative to the top-left of the scaled frame.
    pub origin: Vec2,
    pub tint: Color,
    pub frame_index: usize,

    texture: TextureId,
    frame_size: Vec2,
    rows: u32,
    columns: u32,
}

impl Sprite {
    /// Creates a sprite over a loaded texture split into a frame grid.
    ///
    /// The origin defaults to the centre of one frame.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `columns` is zero.
    pub fn new(texture: &Texture, rows: u32, columns: u32) -> Result<Self, ResourceError> {
        assert!(rows > 0 && columns > 0, "Sprite grid must be at least 1x1");

        let id = texture.id().ok_or(ResourceError::NotReady("Texture"))?;
        let frame_size = Vec2::new(
            (texture.width() / columns) as f32,
            (texture.height() / rows) as f32,
        );

        Ok(Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            origin: frame_size / 2.0,
            tint: Color::WHITE,
            frame_index: 0,
            texture: id,
            frame_size,
            rows,
            columns,
        })
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    //--- Geometry ---------------------------------------------------------

    pub fn frame_count(&self) -> usize {
        (self.rows * self.columns) as usize
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Size of one frame after scaling.
    pub fn size(&self) -> Vec2 {
        self.frame_size * self.scale
    }

    /// Sheet region of the current frame.
    ///
    /// # Errors
    ///
    /// [`SceneError::FrameOutOfRange`] if `frame_index` is past the grid.
    pub fn source_rect(&self) -> Result<Rect, SceneError> {
        let count = self.frame_count();
        if self.frame_index >= count {
            return Err(SceneError::FrameOutOfRange { index: self.frame_index, count });
        }

        let columns = self.columns as usize;
        let column = (self.frame_index % columns) as f32;
        let row = (self.frame_index / columns) as f32;
        Ok(Rect::new(
            self.frame_size.x * column,
            self.frame_size.y * row,
            self.frame_size.x,
            self.frame_size.y,
        ))
    }

    /// Screen-space rectangle covered by the unrotated sprite.
    pub fn bounding_rect(&self) -> Rect {
        let size = self.size();
        Rect::new(
            self.position.x - self.origin.x,
            self.position.y - self.origin.y,
            size.x,
            size.y,
        )
    }

    //--- Drawing ----------------------------------------------------------

    pub fn draw(&self, ctx: &mut Context) -> SceneResult {
        let source = self.source_rect()?;
        let size = self.size();
        let dest = Rect::new(self.position.x, self.position.y, size.x, size.y);
        ctx.graphics
            .draw_texture_pro(self.texture, source, dest, self.origin, self.rotation, self.tint);
        Ok(())
    }

    /// Outlines the bounding rectangle, for debugging.
    pub fn draw_bounding_rect(&self, ctx: &mut Context) {
        ctx.graphics
            .draw_rectangle_lines(self.bounding_rect(), 1.0, Color::GREEN);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::DrawCommand;
    use crate::core::resource::Image;
    use crate::core::WindowConfig;

    /// 96×64 sheet, 2 rows × 3 columns of 32×32 frames.
    fn sheet(ctx: &mut Context) -> Texture {
        let mut texture = Texture::default();
        texture
            .load_from_image(&Image::gen_color(96, 64, Color::WHITE), ctx)
            .unwrap();
        texture
    }

    #[test]
    fn frames_are_laid_out_row_major() {
        let mut ctx = Context::headless(WindowConfig::default());
        let mut sprite = Sprite::new(&sheet(&mut ctx), 2, 3).unwrap();

        sprite.frame_index = 4;
        assert_eq!(sprite.source_rect().unwrap(), Rect::new(32.0, 32.0, 32.0, 32.0));

        sprite.frame_index = 2;
        assert_eq!(sprite.source_rect().unwrap(), Rect::new(64.0, 0.0, 32.0, 32.0));
    }

    #[test]
    fn out_of_range_frame_fails_to_draw() {
        let mut ctx = Context::headless(WindowConfig::default());
        let mut sprite = Sprite::new(&sheet(&mut ctx), 2, 3).unwrap();
        sprite.frame_index = 6;

        ctx.graphics.begin_drawing();
        assert_eq!(
            sprite.draw(&mut ctx),
            Err(SceneError::FrameOutOfRange { index: 6, count: 6 })
        );
        assert_eq!(ctx.graphics.end_drawing(), 0);
    }

    #[test]
    fn origin_defaults_to_frame_centre() {
        let mut ctx = Context::headless(WindowConfig::default());
        let mut sprite = Sprite::new(&sheet(&mut ctx), 2, 3)
            .unwrap()
            .with_position(Vec2::new(100.0, 100.0));
        sprite.scale = Vec2::splat(2.0);

        assert_eq!(sprite.origin, Vec2::new(16.0, 16.0));
        assert_eq!(sprite.size(), Vec2::new(64.0, 64.0));
        assert_eq!(sprite.bounding_rect(), Rect::new(84.0, 84.0, 64.0, 64.0));
    }

    #[test]
    fn draw_records_texture_command() {
        let mut ctx = Context::headless(WindowConfig::default());
        let sprite = Sprite::new(&sheet(&mut ctx), 1, 1).unwrap();

        ctx.graphics.begin_drawing();
        sprite.draw(&mut ctx).unwrap();
        ctx.graphics.end_drawing();

        match &ctx.graphics.last_frame()[0] {
            DrawCommand::Texture { texture, source, origin, .. } => {
                assert_eq!(*texture, sprite.texture());
                assert_eq!(*source, Rect::new(0.0, 0.0, 96.0, 64.0));
                assert_eq!(*origin, Vec2::new(48.0, 32.0));
            }
            other => panic!("expected texture command, got {:?}", other),
        }
    }

    #[test]
    fn unloaded_texture_is_rejected() {
        assert_eq!(
            Sprite::new(&Texture::default(), 1, 1).err(),
            Some(ResourceError::NotReady("Texture"))
        );
    }
}
