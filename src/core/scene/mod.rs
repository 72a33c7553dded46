//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle and single-active-scene switching.
//
// Architecture:
//   SceneManager
//     ├─ active: (String, SceneSlot)
//     └─ inactive: HashMap<String, SceneSlot>
//
// Flow (one frame, driven by the runtime):
//   get_input() → process_transitions() → update() → process_transitions() → draw()
//
// Lifecycle per activation:
//   load() → init() → [frames] → unload() hook → ResourceManager::unload_all()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::resource::{ResourceError, ResourceManager};
use crate::core::Context;

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::SceneManager;
pub use transition_queue::{SceneTransition, TransitionQueue};

//=== SceneError ==========================================================

/// Scene registry and scene callback errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A scene is already registered under this name.
    DuplicateScene(String),

    /// No scene is registered under this name.
    SceneNotFound(String),

    /// The named scene is active and cannot be removed.
    RemoveActive(String),

    /// Sprite frame index outside the frame grid.
    FrameOutOfRange { index: usize, count: usize },

    /// A resource operation inside a scene callback failed.
    Resource(ResourceError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateScene(name) => write!(f, "Scene '{}' is already registered", name),
            Self::SceneNotFound(name) => write!(f, "Scene '{}' not found", name),
            Self::RemoveActive(name) => write!(f, "Cannot remove active scene '{}'", name),
            Self::FrameOutOfRange { index, count } => {
                write!(f, "Frame index {} out of range (0..{})", index, count)
            }
            Self::Resource(e) => write!(f, "Resource error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Resource(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResourceError> for SceneError {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}

/// Result of every fallible scene callback.
pub type SceneResult = Result<(), SceneError>;

//=== Scene Trait =========================================================

/// Per-frame contract of a scene.
///
/// A scene owns one [`ResourceManager`]. The manager calls `load` then
/// `init` on activation; on deactivation it calls `unload` and then
/// unloads every resource still registered, so `unload` only needs to
/// reset non-resource state.
///
/// Scene changes are requested through `ctx.scenes` and applied after the
/// current callback returns.
///
/// # Example
///
/// ```rust
/// # use pina::prelude::*;
/// #[derive(Default)]
/// struct Menu {
///     resources: ResourceManager,
/// }
///
/// impl Scene for Menu {
///     fn load(&mut self, ctx: &mut Context) -> SceneResult {
///         let image = Image::gen_color(16, 16, Color::ORANGE);
///         self.resources.init::<Texture>("logo")?.load_from_image(&image, ctx)?;
///         Ok(())
///     }
///
///     fn get_input(&mut self, ctx: &mut Context) -> SceneResult {
///         if ctx.input.is_key_pressed(KeyCode::Enter) {
///             ctx.scenes.change("World");
///         }
///         Ok(())
///     }
///
///     fn draw(&self, ctx: &mut Context) -> SceneResult {
///         let logo = self.resources.get::<Texture>("logo")?;
///         ctx.graphics.clear_background(Color::RAYWHITE);
///         if let Some(id) = logo.id() {
///             ctx.graphics.draw_texture(id, Vec2::new(10.0, 10.0), Color::WHITE);
///         }
///         Ok(())
///     }
///
///     fn resources(&self) -> &ResourceManager {
///         &self.resources
///     }
///
///     fn resources_mut(&mut self) -> &mut ResourceManager {
///         &mut self.resources
///     }
/// }
/// ```
pub trait Scene {
    /// Acquires resources. Called once per activation, before `init`.
    fn load(&mut self, ctx: &mut Context) -> SceneResult;

    /// Sets up state that depends on loaded resources.
    fn init(&mut self, _ctx: &mut Context) -> SceneResult {
        Ok(())
    }

    /// Polls input and applies immediate effects.
    fn get_input(&mut self, _ctx: &mut Context) -> SceneResult {
        Ok(())
    }

    /// Advances simulation by `delta` seconds (variable step).
    fn update(&mut self, _ctx: &mut Context, _delta: f32) -> SceneResult {
        Ok(())
    }

    /// Issues draw calls. Must not change logical state.
    fn draw(&self, ctx: &mut Context) -> SceneResult;

    /// Releases non-resource state. Registered resources are unloaded by
    /// the manager right after this returns.
    fn unload(&mut self, _ctx: &mut Context) {}

    fn resources(&self) -> &ResourceManager;

    fn resources_mut(&mut self) -> &mut ResourceManager;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn resource_error_converts_and_chains() {
        let err: SceneError = ResourceError::NotFound("cat".into()).into();

        assert_eq!(err.to_string(), "Resource error: Resource 'cat' not found");
        assert!(err.source().is_some());
        assert!(SceneError::SceneNotFound("x".into()).source().is_none());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            SceneError::RemoveActive("Menu".into()).to_string(),
            "Cannot remove active scene 'Menu'"
        );
        assert_eq!(
            SceneError::FrameOutOfRange { index: 4, count: 4 }.to_string(),
            "Frame index 4 out of range (0..4)"
        );
    }
}
