//=========================================================================
// Graphics
//=========================================================================
//
// Texture handle table and per-frame draw list.
//
// Architecture:
//   Graphics
//     ├─ textures: HashMap<TextureId, GpuTexture>   (owned pixel storage)
//     └─ frame: Option<Vec<DrawCommand>>            (open between begin/end)
//
// Texture resources own exactly one `TextureId`; releasing the id is the
// only way pixel storage leaves the table. Ids are never reused, so a
// stale handle fails with `InvalidHandle` instead of aliasing a new
// texture.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::Vec2;
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::resource::ResourceError;

//=== Module Declarations =================================================

pub mod collision;
mod color;
mod draw;

//=== Public API ==========================================================

pub use color::Color;
pub use draw::{DrawCommand, Rect};

//=== Handles & Modes =====================================================

/// Handle to a texture stored in [`Graphics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Texture scaling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    /// Nearest neighbour.
    Point,
    #[default]
    Bilinear,
    Trilinear,
}

/// Texture coordinate wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureWrap {
    Repeat,
    #[default]
    Clamp,
    MirrorRepeat,
}

/// Pixel storage and sampling state for one texture.
#[derive(Debug, Clone)]
pub struct GpuTexture {
    pub width: u32,
    pub height: u32,
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
    pub mipmaps: u32,
    pixels: Vec<u8>,
}

impl GpuTexture {
    /// RGBA8 pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

//--- Text metrics (built-in font) ----------------------------------------

const GLYPH_ADVANCE_RATIO: f32 = 0.5;
const GLYPH_SPACING_RATIO: f32 = 0.1;

//=== Graphics ============================================================

/// Texture table and draw-list recorder.
pub struct Graphics {
    textures: HashMap<TextureId, GpuTexture>,
    next_texture: u32,
    frame: Option<Vec<DrawCommand>>,
    last_frame: Vec<DrawCommand>,
    frames_drawn: u64,
}

impl Graphics {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            next_texture: 1,
            frame: None,
            last_frame: Vec::new(),
            frames_drawn: 0,
        }
    }

    //--- Texture Table ----------------------------------------------------

    /// Stores RGBA8 pixels and returns the new texture's handle.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SizeMismatch`] if `pixels.len() != width * height * 4`.
    pub fn upload_texture(
        &mut self,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<TextureId, ResourceError> {
        let expected = rgba_len(width, height);
        if pixels.len() != expected {
            return Err(ResourceError::SizeMismatch { expected, found: pixels.len() });
        }

        let id = TextureId(self.next_texture);
        self.next_texture += 1;

        self.textures.insert(
            id,
            GpuTexture {
                width,
                height,
                filter: TextureFilter::default(),
                wrap: TextureWrap::default(),
                mipmaps: 1,
                pixels,
            },
        );

        debug!(target: "graphics", "Texture {} uploaded ({}x{})", id.0, width, height);
        Ok(id)
    }

    /// Replaces the whole pixel buffer of an existing texture.
    pub fn update_texture(&mut self, id: TextureId, pixels: &[u8]) -> Result<(), ResourceError> {
        let texture = self.texture_mut(id)?;
        let expected = rgba_len(texture.width, texture.height);
        if pixels.len() != expected {
            return Err(ResourceError::SizeMismatch { expected, found: pixels.len() });
        }
        texture.pixels.copy_from_slice(pixels);
        Ok(())
    }

    /// Frees a texture's storage. The handle is dead afterwards.
    pub fn release_texture(&mut self, id: TextureId) -> Result<(), ResourceError> {
        match self.textures.remove(&id) {
            Some(_) => {
                debug!(target: "graphics", "Texture {} released", id.0);
                Ok(())
            }
            None => Err(ResourceError::InvalidHandle(format!("texture {}", id.0))),
        }
    }

    pub fn set_texture_filter(&mut self, id: TextureId, filter: TextureFilter) -> Result<(), ResourceError> {
        self.texture_mut(id)?.filter = filter;
        Ok(())
    }

    pub fn set_texture_wrap(&mut self, id: TextureId, wrap: TextureWrap) -> Result<(), ResourceError> {
        self.texture_mut(id)?.wrap = wrap;
        Ok(())
    }

    /// Computes the full mip chain length for a texture and records it.
    pub fn gen_mipmaps(&mut self, id: TextureId) -> Result<u32, ResourceError> {
        let texture = self.texture_mut(id)?;
        let largest = texture.width.max(texture.height).max(1);
        texture.mipmaps = 32 - largest.leading_zeros();
        Ok(texture.mipmaps)
    }

    pub fn texture(&self, id: TextureId) -> Option<&GpuTexture> {
        self.textures.get(&id)
    }

    /// Number of live textures.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn texture_mut(&mut self, id: TextureId) -> Result<&mut GpuTexture, ResourceError> {
        self.textures
            .get_mut(&id)
            .ok_or_else(|| ResourceError::InvalidHandle(format!("texture {}", id.0)))
    }

    //--- Frame Recording --------------------------------------------------

    /// Opens a new draw list. An unfinished previous frame is discarded.
    pub fn begin_drawing(&mut self) {
        if self.frame.is_some() {
            warn!(target: "graphics", "begin_drawing() called twice, discarding open frame");
        }
        self.frame = Some(Vec::new());
    }

    /// Closes the draw list and returns the number of commands recorded.
    pub fn end_drawing(&mut self) -> usize {
        match self.frame.take() {
            Some(commands) => {
                self.frames_drawn += 1;
                trace!(target: "graphics", "Frame {} recorded {} commands", self.frames_drawn, commands.len());
                self.last_frame = commands;
                self.last_frame.len()
            }
            None => {
                warn!(target: "graphics", "end_drawing() without begin_drawing()");
                0
            }
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.frame.is_some()
    }

    /// Commands of the most recently completed frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    //--- Drawing ----------------------------------------------------------

    pub fn clear_background(&mut self, color: Color) {
        self.push(DrawCommand::Clear(color));
    }

    /// Draws a whole texture with its top-left corner at `position`.
    pub fn draw_texture(&mut self, texture: TextureId, position: Vec2, tint: Color) {
        // A dead handle still records a command; draw_texture_pro warns.
        let size = self.texture_size(texture).unwrap_or(Vec2::ZERO);
        let source = Rect::new(0.0, 0.0, size.x, size.y);
        let dest = Rect::new(position.x, position.y, size.x, size.y);
        self.draw_texture_pro(texture, source, dest, Vec2::ZERO, 0.0, tint);
    }

    /// Draws the `source` region of a texture at `position`, unscaled.
    pub fn draw_texture_rec(&mut self, texture: TextureId, source: Rect, position: Vec2, tint: Color) {
        let dest = Rect::new(position.x, position.y, source.width.abs(), source.height.abs());
        self.draw_texture_pro(texture, source, dest, Vec2::ZERO, 0.0, tint);
    }

    /// Draws `source` into `dest`, rotated `rotation` degrees about `origin`.
    pub fn draw_texture_pro(
        &mut self,
        texture: TextureId,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    ) {
        if !self.textures.contains_key(&texture) {
            warn!(target: "graphics", "Drawing dead texture {}", texture.0);
        }
        self.push(DrawCommand::Texture { texture, source, dest, origin, rotation, tint });
    }

    pub fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::Rectangle { rect, color });
    }

    pub fn draw_rectangle_lines(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.push(DrawCommand::RectangleLines { rect, thickness, color });
    }

    /// Draws text with the built-in font.
    pub fn draw_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        self.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            font_size,
            color,
        });
    }

    /// Measures text drawn with the built-in font.
    ///
    /// Single line only; the height is the font size.
    pub fn measure_text(&self, text: &str, font_size: f32) -> Vec2 {
        let glyphs = text.chars().count();
        if glyphs == 0 {
            return Vec2::new(0.0, font_size);
        }
        let advance = font_size * GLYPH_ADVANCE_RATIO;
        let spacing = font_size * GLYPH_SPACING_RATIO;
        let width = glyphs as f32 * (advance + spacing) - spacing;
        Vec2::new(width, font_size)
    }

    fn texture_size(&self, id: TextureId) -> Option<Vec2> {
        self.textures
            .get(&id)
            .map(|t| Vec2::new(t.width as f32, t.height as f32))
    }

    fn push(&mut self, command: DrawCommand) {
        match &mut self.frame {
            Some(commands) => commands.push(command),
            None => warn!(target: "graphics", "Draw call outside begin_drawing()/end_drawing() ignored"),
        }
    }
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

//=========================================================================
// Unit Tests
//=========================================================================
