//=========================================================================
// Pina Library Root
//
// Scene-driven 2D game framework.
//
// Responsibilities:
// - Expose the application entry point (`ApplicationBuilder`)
// - Expose scenes, resources and the per-callback `Context` via `core`
// - Provide reusable scene building blocks via `components`
// - Keep the Winit integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use pina::prelude::*;
//
// fn main() -> Result<(), ApplicationError> {
//     let scenes = SceneManager::new("MainMenu", MainMenu::new());
//     ApplicationBuilder::new(WindowConfig::default()).build(scenes).run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains scenes, resources, input, the backend tables and the
// frame runtime. `components` holds sprites, animators and timers built
// on top of it.
//
pub mod components;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the Winit event loop and is not part of
// the public API surface.
//
mod application;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use application::{Application, ApplicationBuilder, ApplicationError};
