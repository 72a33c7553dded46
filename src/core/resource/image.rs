//=========================================================================
// Image
//=========================================================================
//
// CPU-side RGBA8 pixel buffer. Decoding goes through the `image` crate;
// the editing operations work directly on `image::RgbaImage`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use image::{imageops, RgbaImage};
use log::debug;

//=== Internal Dependencies ===============================================

use super::{Resource, ResourceError};
use crate::core::graphics::{Color, Rect};
use crate::core::Context;

//=== Image ===============================================================

/// Pixel data in CPU memory.
///
/// Images are used to build textures and window icons. Unlike the other
/// resources they own no backend handle: unloading just frees the pixels.
#[derive(Debug, Clone, Default)]
pub struct Image {
    pixels: Option<RgbaImage>,
}

impl Image {
    //--- Loading ----------------------------------------------------------

    /// Decodes an image file (PNG) into RGBA8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ResourceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let image = Self::load_from_memory(&bytes)?;
        debug!(target: "resource", "Image {} loaded ({}x{})", path.display(), image.width(), image.height());
        Ok(image)
    }

    /// Decodes an in-memory encoded image (PNG) into RGBA8.
    pub fn load_from_memory(bytes: &[u8]) -> Result<Self, ResourceError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| ResourceError::Decode(e.to_string()))?;
        Ok(Self { pixels: Some(decoded.to_rgba8()) })
    }

    /// Wraps raw RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ResourceError> {
        let expected = width as usize * height as usize * 4;
        let found = rgba.len();
        RgbaImage::from_raw(width, height, rgba)
            .map(|pixels| Self { pixels: Some(pixels) })
            .ok_or(ResourceError::SizeMismatch { expected, found })
    }

    //--- Generation -------------------------------------------------------

    /// Solid color image.
    pub fn gen_color(width: u32, height: u32, color: Color) -> Self {
        let pixel = image::Rgba(color.to_array());
        Self { pixels: Some(RgbaImage::from_pixel(width, height, pixel)) }
    }

    /// Checkerboard with `checks_x × checks_y` pixel cells.
    pub fn gen_checked(
        width: u32,
        height: u32,
        checks_x: u32,
        checks_y: u32,
        first: Color,
        second: Color,
    ) -> Self {
        let checks_x = checks_x.max(1);
        let checks_y = checks_y.max(1);
        let pixels = RgbaImage::from_fn(width, height, |x, y| {
            if ((x / checks_x) + (y / checks_y)) % 2 == 0 {
                image::Rgba(first.to_array())
            } else {
                image::Rgba(second.to_array())
            }
        });
        Self { pixels: Some(pixels) }
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.pixels.as_ref().map_or(0, RgbaImage::width)
    }

    pub fn height(&self) -> u32 {
        self.pixels.as_ref().map_or(0, RgbaImage::height)
    }

    /// Whole-image rectangle.
    pub fn source_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    /// Color at `(x, y)`, `None` when out of bounds or unloaded.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let pixels = self.pixels.as_ref()?;
        (x < pixels.width() && y < pixels.height())
            .then(|| Color::from_array(pixels.get_pixel(x, y).0))
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_rgba(&self) -> Result<&[u8], ResourceError> {
        Ok(self.loaded()?.as_raw())
    }

    //--- Editing ----------------------------------------------------------

    pub fn flip_horizontal(&mut self) -> Result<(), ResourceError> {
        imageops::flip_horizontal_in_place(self.loaded_mut()?);
        Ok(())
    }

    pub fn flip_vertical(&mut self) -> Result<(), ResourceError> {
        imageops::flip_vertical_in_place(self.loaded_mut()?);
        Ok(())
    }

    /// Nearest-neighbour resize.
    pub fn resize_nearest(&mut self, width: u32, height: u32) -> Result<(), ResourceError> {
        let resized = imageops::resize(self.loaded()?, width, height, imageops::FilterType::Nearest);
        self.pixels = Some(resized);
        Ok(())
    }

    /// Crops to `rect`, clamped to the image bounds.
    pub fn crop(&mut self, rect: Rect) -> Result<(), ResourceError> {
        let pixels = self.loaded()?;
        let x = (rect.x.max(0.0) as u32).min(pixels.width());
        let y = (rect.y.max(0.0) as u32).min(pixels.height());
        let width = (rect.width.max(0.0) as u32).min(pixels.width() - x);
        let height = (rect.height.max(0.0) as u32).min(pixels.height() - y);

        let cropped = imageops::crop_imm(pixels, x, y, width, height).to_image();
        self.pixels = Some(cropped);
        Ok(())
    }

    pub fn color_tint(&mut self, tint: Color) -> Result<(), ResourceError> {
        self.map_pixels(|c| c.tint(tint))
    }

    pub fn color_invert(&mut self) -> Result<(), ResourceError> {
        self.map_pixels(Color::invert)
    }

    pub fn color_grayscale(&mut self) -> Result<(), ResourceError> {
        self.map_pixels(Color::grayscale)
    }

    //--- Internal Helpers -------------------------------------------------

    fn map_pixels(&mut self, f: impl Fn(Color) -> Color) -> Result<(), ResourceError> {
        for pixel in self.loaded_mut()?.pixels_mut() {
            pixel.0 = f(Color::from_array(pixel.0)).to_array();
        }
        Ok(())
    }

    fn loaded(&self) -> Result<&RgbaImage, ResourceError> {
        self.pixels.as_ref().ok_or(ResourceError::NotReady("Image"))
    }

    fn loaded_mut(&mut self) -> Result<&mut RgbaImage, ResourceError> {
        self.pixels.as_mut().ok_or(ResourceError::NotReady("Image"))
    }
}

impl Resource for Image {
    fn is_ready(&self) -> bool {
        self.pixels.is_some()
    }

    fn unload(&mut self, _ctx: &mut Context) -> Result<(), ResourceError> {
        self.pixels
            .take()
            .map(drop)
            .ok_or(ResourceError::NotReady("Image"))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
