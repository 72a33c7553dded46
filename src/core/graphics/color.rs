//=========================================================================
// Color
//=========================================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLANK: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const RAYWHITE: Self = Self::new(245, 245, 245, 255);
    pub const GRAY: Self = Self::new(130, 130, 130, 255);
    pub const DARKGRAY: Self = Self::new(80, 80, 80, 255);
    pub const RED: Self = Self::new(230, 41, 55, 255);
    pub const GREEN: Self = Self::new(0, 228, 48, 255);
    pub const BLUE: Self = Self::new(0, 121, 241, 255);
    pub const YELLOW: Self = Self::new(253, 249, 0, 255);
    pub const ORANGE: Self = Self::new(255, 161, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the color with alpha scaled by `alpha` (clamped to `[0, 1]`).
    pub fn fade(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self { a: (255.0 * alpha).round() as u8, ..self }
    }

    /// Component-wise multiply, as used for texture tinting.
    pub fn tint(self, other: Color) -> Self {
        fn mul(a: u8, b: u8) -> u8 {
            ((a as u16 * b as u16) / 255) as u8
        }
        Self::new(
            mul(self.r, other.r),
            mul(self.g, other.g),
            mul(self.b, other.b),
            mul(self.a, other.a),
        )
    }

    /// Inverts RGB, keeps alpha.
    pub fn invert(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// Luma-weighted grayscale, keeps alpha.
    pub fn grayscale(self) -> Self {
        let luma = 0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32;
        let v = luma.round().clamp(0.0, 255.0) as u8;
        Self::new(v, v, v, self.a)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_scales_alpha() {
        assert_eq!(Color::WHITE.fade(0.5).a, 128);
        assert_eq!(Color::WHITE.fade(2.0).a, 255);
        assert_eq!(Color::WHITE.fade(-1.0).a, 0);
    }

    #[test]
    fn tint_with_white_is_identity() {
        let c = Color::new(10, 20, 30, 40);
        assert_eq!(c.tint(Color::WHITE), c);
        assert_eq!(c.tint(Color::BLANK), Color::BLANK);
    }

    #[test]
    fn invert_and_grayscale_keep_alpha() {
        let c = Color::new(255, 0, 0, 77);
        assert_eq!(c.invert(), Color::new(0, 255, 255, 77));
        assert_eq!(c.grayscale(), Color::new(76, 76, 76, 77));
    }
}
