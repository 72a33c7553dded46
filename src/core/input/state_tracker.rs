//=========================================================================
// State Tracker
//=========================================================================
//
// Keyboard and mouse state with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_event() → HashSet (keys/buttons held) → query
//
// Frame lifecycle (driven by the runtime):
//   process_event()* → finalize_frame() → scene callbacks query → clear()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame deltas (keys
/// pressed/released this frame).
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: Vec2,
    modifiers: Modifiers,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
    mouse_buttons_pressed_this_frame: HashSet<MouseButton>,
    mouse_buttons_released_this_frame: HashSet<MouseButton>,
    wheel_this_frame: Vec2,

    //--- Continuous Input (calculated) -----------------------------------
    mouse_delta: Vec2,
    last_mouse_position: Vec2,
}

impl StateTracker {
    /// Creates a new state tracker with empty state.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: Vec2::ZERO,
            modifiers: Modifiers::NONE,
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
            mouse_buttons_pressed_this_frame: HashSet::new(),
            mouse_buttons_released_this_frame: HashSet::new(),
            wheel_this_frame: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
            last_mouse_position: Vec2::ZERO,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags, wheel).
    pub(crate) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.mouse_buttons_pressed_this_frame.clear();
        self.mouse_buttons_released_this_frame.clear();
        self.wheel_this_frame = Vec2::ZERO;
        self.last_mouse_position = self.mouse_position;
    }

    /// Finalizes frame calculations (mouse delta).
    pub(crate) fn finalize_frame(&mut self) {
        self.mouse_delta = self.mouse_position - self.last_mouse_position;
    }

    /// Applies a batch of input events.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Applies a single input event.
    ///
    /// Pressed/released flags only fire on real transitions: a repeated
    /// KeyDown for a held key or a KeyUp for a key that was never down
    /// leaves the deltas untouched.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.insert(*key) {
                    self.keys_pressed_this_frame.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released_this_frame.insert(*key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.mouse_buttons_down.insert(*button) {
                    self.mouse_buttons_pressed_this_frame.insert(*button);
                }
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.mouse_buttons_down.remove(button) {
                    self.mouse_buttons_released_this_frame.insert(*button);
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = Vec2::new(*x, *y);
            }

            InputEvent::MouseWheel { x, y } => {
                self.wheel_this_frame += Vec2::new(*x, *y);
            }

            InputEvent::Unidentified => {}
        }
    }

    /// Releases every held key and button.
    ///
    /// Called when the window loses focus, since the matching KeyUp
    /// events will be delivered to another window.
    pub(crate) fn release_all(&mut self) {
        for key in self.keys_down.drain() {
            self.keys_released_this_frame.insert(key);
        }
        for button in self.mouse_buttons_down.drain() {
            self.mouse_buttons_released_this_frame.insert(button);
        }
        self.modifiers = Modifiers::NONE;
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Returns `true` while key is not held.
    pub fn is_key_up(&self, key: KeyCode) -> bool {
        !self.is_key_down(key)
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed_this_frame.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Like [`is_key_released`](Self::is_key_released) but for mouse buttons.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons_released_this_frame.contains(&button)
    }

    /// Mouse position in screen coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Mouse movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Accumulated wheel movement this frame.
    pub fn mouse_wheel(&self) -> Vec2 {
        self.wheel_this_frame
    }

    //=====================================================================
    // Query API - Modifiers
    //=====================================================================

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn shift_held(&self) -> bool {
        self.modifiers.shift
    }

    pub fn ctrl_held(&self) -> bool {
        self.modifiers.ctrl
    }

    pub fn alt_held(&self) -> bool {
        self.modifiers.alt
    }

    //=====================================================================
    // Query API - Iteration
    //=====================================================================

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    /// Returns an iterator over all keys pressed this frame.
    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_pressed_this_frame.iter()
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
