//=========================================================================
// Camera 2D
//=========================================================================
//
// Maps world coordinates to screen coordinates:
//
//   screen = offset + zoom * rotate(rotation) * (world - target)
//
// `target` is the world point that lands on `offset` on screen and is the
// pivot for rotation and zoom.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};

//=== Camera2D ============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// Screen-space displacement of the target, usually the screen centre.
    pub offset: Vec2,
    pub target: Vec2,
    /// Degrees, clockwise on a y-down screen.
    pub rotation: f32,
    pub zoom: f32,
}

impl Camera2D {
    pub fn new(offset: Vec2, target: Vec2, rotation: f32, zoom: f32) -> Self {
        Self { offset, target, rotation, zoom }
    }

    /// World-to-screen transform.
    pub fn matrix(&self) -> Affine2 {
        Affine2::from_translation(self.offset)
            * Affine2::from_scale(Vec2::splat(self.zoom))
            * Affine2::from_angle(self.rotation.to_radians())
            * Affine2::from_translation(-self.target)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.matrix().transform_point2(world)
    }

    /// Inverse of [`world_to_screen`](Self::world_to_screen). A zero zoom
    /// collapses the view and maps every point to the target.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        if self.zoom == 0.0 {
            return self.target;
        }
        self.matrix().inverse().transform_point2(screen)
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO, 0.0, 1.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: Vec2, b: Vec2) {
        assert!(a.abs_diff_eq(b, 1e-4), "{} != {}", a, b);
    }

    #[test]
    fn default_is_identity() {
        let camera = Camera2D::default();
        assert_near(camera.world_to_screen(Vec2::new(3.0, -7.0)), Vec2::new(3.0, -7.0));
    }

    #[test]
    fn target_lands_on_offset() {
        let camera = Camera2D::new(Vec2::new(480.0, 270.0), Vec2::new(100.0, 50.0), 33.0, 2.5);
        assert_near(camera.world_to_screen(camera.target), camera.offset);
    }

    #[test]
    fn zoom_scales_about_target() {
        let camera = Camera2D::new(Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0), 0.0, 2.0);
        assert_near(camera.world_to_screen(Vec2::new(15.0, 10.0)), Vec2::new(110.0, 100.0));
    }

    #[test]
    fn rotation_turns_clockwise_on_screen() {
        let camera = Camera2D::new(Vec2::ZERO, Vec2::ZERO, 90.0, 1.0);
        // +x in world points down (+y) on a y-down screen.
        assert_near(camera.world_to_screen(Vec2::X), Vec2::Y);
    }

    #[test]
    fn screen_to_world_inverts() {
        let camera = Camera2D::new(Vec2::new(320.0, 240.0), Vec2::new(-40.0, 12.0), -15.0, 0.75);
        let world = Vec2::new(7.0, 99.0);
        assert_near(camera.screen_to_world(camera.world_to_screen(world)), world);
    }

    #[test]
    fn zero_zoom_maps_screen_to_target() {
        let camera = Camera2D::new(Vec2::ZERO, Vec2::new(5.0, 5.0), 0.0, 0.0);
        assert_eq!(camera.screen_to_world(Vec2::new(100.0, 100.0)), Vec2::new(5.0, 5.0));
    }
}
