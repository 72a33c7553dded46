//=========================================================================
// Input Event Types
//
// Portable representation of low-level keyboard and mouse input.
//
// The platform layer (winit) converts OS events into these types and
// feeds them to the `StateTracker`. Scenes only ever see the tracker's
// query API, never the events themselves.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (pressed / down / released)
//         ↓
//    Scene::get_input()
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, thumb buttons and anything
/// the platform reports that is not one of the three standard buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced:
/// `KeyW` is the same key on QWERTY and AZERTY layouts, which is what
/// movement bindings want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Left and right variants are not distinguished. Ctrl is Command on
/// macOS and Alt is Option, following winit's normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only.
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only.
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// Returns `true` if no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { key: KeyCode, modifiers: Modifiers },

    /// Key released.
    KeyUp { key: KeyCode, modifiers: Modifiers },

    /// Mouse button pressed.
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },

    /// Mouse button released.
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor moved. Screen space, pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// Wheel scrolled. Positive `y` scrolls away from the user.
    MouseWheel { x: f32, y: f32 },

    /// Unrecognized or unsupported event, ignored by the tracker.
    Unidentified,
}

impl InputEvent {
    /// Returns a new event with updated modifiers.
    ///
    /// Has no effect on pointer and unidentified events.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. }
            | Self::KeyUp { modifiers: m, .. }
            | Self::MouseButtonDown { modifiers: m, .. }
            | Self::MouseButtonUp { modifiers: m, .. } => {
                *m = modifiers;
            }
            _ => {}
        }
        self
    }

    /// Returns `true` for key and mouse button transitions.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Self::KeyDown { .. }
                | Self::KeyUp { .. }
                | Self::MouseButtonDown { .. }
                | Self::MouseButtonUp { .. }
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_modifiers_replaces_key_modifiers() {
        let event = InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::NONE }
            .with_modifiers(Modifiers::CTRL);

        assert_eq!(
            event,
            InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }
        );
    }

    #[test]
    fn with_modifiers_ignores_pointer_events() {
        let event = InputEvent::MouseMoved { x: 4.0, y: 2.0 }.with_modifiers(Modifiers::SHIFT);
        assert_eq!(event, InputEvent::MouseMoved { x: 4.0, y: 2.0 });
    }

    #[test]
    fn discrete_classification() {
        assert!(InputEvent::KeyUp { key: KeyCode::KeyA, modifiers: Modifiers::NONE }.is_discrete());
        assert!(InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::NONE
        }
        .is_discrete());
        assert!(!InputEvent::MouseWheel { x: 0.0, y: 1.0 }.is_discrete());
        assert!(!InputEvent::Unidentified.is_discrete());
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(Modifiers::default().is_empty());
        assert!(!Modifiers::ALT.is_empty());
    }
}
