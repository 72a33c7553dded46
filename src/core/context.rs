//=========================================================================
// Context
//=========================================================================
//
// Everything a scene may touch during a callback.
//
// Contains:
// - window:   live window state and pending window changes
// - time:     frame delta, elapsed time, FPS
// - input:    keyboard/mouse state for the current frame
// - graphics: texture table and draw list
// - audio:    voice table and mixer
// - scenes:   deferred scene transitions
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::audio::Audio;
use crate::core::graphics::Graphics;
use crate::core::input::StateTracker;
use crate::core::scene::TransitionQueue;
use crate::core::time::FrameTime;
use crate::core::window::{WindowConfig, WindowState};

//=== Context =============================================================

/// Backend tables and per-frame state passed to every scene callback.
///
/// Owned by the runtime; scenes receive `&mut Context`.
pub struct Context {
    /// Window state. Setters are applied to the real window between frames.
    pub window: WindowState,

    pub time: FrameTime,

    /// Input state for the current frame.
    ///
    /// Fed by the platform before each frame; pressed/released edges are
    /// cleared after `draw`.
    pub input: StateTracker,

    pub graphics: Graphics,

    pub audio: Audio,

    /// Scene transitions requested during the current callback.
    pub scenes: TransitionQueue,
}

impl Context {
    /// Creates a context with empty backend tables.
    pub fn new(config: &WindowConfig, target_fps: Option<u32>) -> Self {
        Self {
            window: WindowState::new(config),
            time: FrameTime::new(target_fps),
            input: StateTracker::new(),
            graphics: Graphics::new(),
            audio: Audio::new(),
            scenes: TransitionQueue::new(),
        }
    }

    /// Context without a frame cap, for windowless runs and tests.
    pub fn headless(config: WindowConfig) -> Self {
        Self::new(&config, None)
    }
}
