//=========================================================================
// Input
//
// Portable input events and the per-frame state tracker scenes query.
//
// Notes:
// The tracker lives in `Context::input`. The platform feeds events into
// it as they arrive; the runtime finalizes and clears it around each
// frame so "pressed" means "pressed since the previous frame".
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;
