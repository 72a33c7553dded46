//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use pina::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application
pub use crate::application::{Application, ApplicationBuilder, ApplicationError};

// Context, window and frame loop
pub use crate::core::{
    Color, Context, FrameTime, Rect, Runtime, TickControl, WindowConfig, WindowFlags,
};

// Resources
pub use crate::core::resource::{
    Image, Music, Resource, ResourceError, ResourceManager, Sound, Texture,
};

// Scenes
pub use crate::core::scene::{Scene, SceneError, SceneManager, SceneResult, SceneTransition};

// Input
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

// Graphics
pub use crate::core::graphics::{collision, DrawCommand, TextureFilter, TextureId, TextureWrap};

// Components
pub use crate::components::{
    Camera2D, Sprite, SpriteAnimator, SpriteAnimatorController, Timer,
};

// Math
pub use glam::{IVec2, Vec2};
