//=========================================================================
// Core
//
// Windowless heart of the framework.
//
// Responsibilities:
// - Backend tables for textures (graphics) and voices (audio)
// - Resources and the per-scene resource registry
// - Scenes, the scene manager and deferred transitions
// - The explicit per-callback context and the frame runtime
//
// Notes:
// Nothing in `core` opens a window. The platform layer feeds input into
// the context and drives `Runtime::frame`; tests and headless runs do the
// same without a window.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod audio;
pub mod graphics;
pub mod input;
pub mod resource;
pub mod scene;

mod context;
mod runtime;
mod time;
mod window;

//=== Public API ==========================================================

pub use context::Context;
pub use graphics::{Color, Rect};
pub use runtime::{Runtime, TickControl};
pub use time::FrameTime;
pub use window::{WindowCommand, WindowConfig, WindowFlags, WindowState};
