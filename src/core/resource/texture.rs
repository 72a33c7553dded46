//=========================================================================
// Texture
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Image, Resource, ResourceError};
use crate::core::graphics::{Rect, TextureFilter, TextureId, TextureWrap};
use crate::core::Context;

//=== Texture =============================================================

/// Image data uploaded to the graphics backend.
///
/// A texture owns one [`TextureId`] while loaded. Loading into a texture
/// that already holds a handle releases the old one first.
#[derive(Debug, Default)]
pub struct Texture {
    id: Option<TextureId>,
    width: u32,
    height: u32,
}

impl Texture {
    //--- Loading ----------------------------------------------------------

    /// Decodes `path` and uploads it.
    pub fn load(&mut self, path: impl AsRef<Path>, ctx: &mut Context) -> Result<&mut Self, ResourceError> {
        let path = path.as_ref();
        let image = Image::load(path)?;
        self.load_from_image(&image, ctx)?;
        debug!(target: "resource", "Texture {} loaded from {}", self.raw_id(), path.display());
        Ok(self)
    }

    /// Uploads the pixels of a loaded image.
    pub fn load_from_image(&mut self, image: &Image, ctx: &mut Context) -> Result<&mut Self, ResourceError> {
        let pixels = image.as_rgba()?.to_vec();
        let id = ctx.graphics.upload_texture(image.width(), image.height(), pixels)?;

        if let Some(old) = self.id.replace(id) {
            warn!(target: "resource", "Texture reloaded, releasing previous handle {}", old.raw());
            ctx.graphics.release_texture(old)?;
        }
        self.width = image.width();
        self.height = image.height();
        Ok(self)
    }

    /// Replaces the pixel contents; the size must match.
    pub fn update(&mut self, pixels: &[u8], ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.graphics.update_texture(self.loaded()?, pixels)
    }

    //--- Sampling State ---------------------------------------------------

    pub fn set_filter(&mut self, filter: TextureFilter, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.graphics.set_texture_filter(self.loaded()?, filter)
    }

    pub fn set_wrap(&mut self, wrap: TextureWrap, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.graphics.set_texture_wrap(self.loaded()?, wrap)
    }

    /// Generates the mip chain, returning the level count.
    pub fn gen_mipmaps(&mut self, ctx: &mut Context) -> Result<u32, ResourceError> {
        ctx.graphics.gen_mipmaps(self.loaded()?)
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> Option<TextureId> {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whole-texture rectangle, for use as a draw source.
    pub fn source_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    fn loaded(&self) -> Result<TextureId, ResourceError> {
        self.id.ok_or(ResourceError::NotReady("Texture"))
    }

    fn raw_id(&self) -> u32 {
        self.id.map_or(0, |id| id.raw())
    }
}

impl Resource for Texture {
    fn is_ready(&self) -> bool {
        self.id.is_some()
    }

    fn unload(&mut self, ctx: &mut Context) -> Result<(), ResourceError> {
        let id = self.id.take().ok_or(ResourceError::NotReady("Texture"))?;
        self.width = 0;
        self.height = 0;
        ctx.graphics.release_texture(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
