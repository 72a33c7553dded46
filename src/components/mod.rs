//=========================================================================
// Components
//=========================================================================
//
// Reusable building blocks for scenes: sprite-sheet sprites, frame
// animation, a 2D camera and countdown timers. Scenes own these directly and drive
// them from their own update/draw callbacks.
//
//=========================================================================

//=== Module Declarations =================================================

mod camera2d;
mod sprite;
mod sprite_animator;
mod timer;

//=== Public API ==========================================================

pub use camera2d::Camera2D;
pub use sprite::Sprite;
pub use sprite_animator::{SpriteAnimator, SpriteAnimatorController};
pub use timer::Timer;
