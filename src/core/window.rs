//=========================================================================
// Window
//=========================================================================
//
// Startup configuration and runtime state of the single window.
//
// Scenes change the window through `WindowState` setters. Each setter
// updates the cached value immediately and queues a `WindowCommand`; the
// platform drains the queue once per frame and applies it to the real
// window. Headless runs simply discard the queue.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::IVec2;
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::resource::Image;

//=== Window Flags ========================================================

/// Window state flags applied at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    pub fullscreen: bool,
    pub resizable: bool,
    pub undecorated: bool,
    pub hidden: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub focused: bool,
    pub topmost: bool,
    /// Keep running frames while unfocused or minimized.
    pub always_run: bool,
    pub vsync: bool,
    pub high_dpi: bool,
    pub transparent: bool,
    pub msaa_4x: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            fullscreen: false,
            resizable: false,
            undecorated: false,
            hidden: false,
            minimized: false,
            maximized: false,
            focused: true,
            topmost: false,
            always_run: false,
            vsync: true,
            high_dpi: false,
            transparent: false,
            msaa_4x: false,
        }
    }
}

//=== Window Config =======================================================

/// Window parameters consumed once at startup.
///
/// # Example
///
/// ```rust
/// # use pina::prelude::*;
/// let config = WindowConfig::new("Cat Shooter", IVec2::new(960, 540))
///     .with_resizable(true)
///     .with_min_size(IVec2::new(320, 180))
///     .with_opacity(1.5);
///
/// assert_eq!(config.opacity, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub size: IVec2,
    /// Only honoured for resizable windows.
    pub min_size: Option<IVec2>,
    /// Only honoured for resizable windows.
    pub max_size: Option<IVec2>,
    pub position: Option<IVec2>,
    pub icon: Option<Image>,
    pub flags: WindowFlags,
    pub opacity: f32,
}

impl WindowConfig {
    /// # Panics
    ///
    /// Panics if either dimension of `size` is not positive.
    pub fn new(title: impl Into<String>, size: IVec2) -> Self {
        assert!(size.x > 0 && size.y > 0, "Window size must be positive, got {}", size);

        Self {
            title: title.into(),
            size,
            min_size: None,
            max_size: None,
            position: None,
            icon: None,
            flags: WindowFlags::default(),
            opacity: 1.0,
        }
    }

    pub fn with_min_size(mut self, size: IVec2) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn with_max_size(mut self, size: IVec2) -> Self {
        self.max_size = Some(size);
        self
    }

    pub fn with_position(mut self, position: IVec2) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_icon(mut self, icon: Image) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.flags.fullscreen = fullscreen;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.flags.resizable = resizable;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.flags.vsync = vsync;
        self
    }

    /// Window opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("Pina", IVec2::new(960, 540))
    }
}

//=== Window Commands =====================================================

/// A change to apply to the real window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    SetTitle(String),
    SetSize(IVec2),
    SetMinSize(Option<IVec2>),
    SetMaxSize(Option<IVec2>),
    SetPosition(IVec2),
    SetFullscreen(bool),
    SetResizable(bool),
    SetDecorated(bool),
    SetVisible(bool),
    SetMinimized(bool),
    SetMaximized(bool),
    SetTopmost(bool),
    SetCursorVisible(bool),
    SetCursorLocked(bool),
    Focus,
}

//=== Window State ========================================================

/// Live window state visible to scenes through `ctx.window`.
#[derive(Debug, Clone)]
pub struct WindowState {
    title: String,
    size: IVec2,
    min_size: Option<IVec2>,
    max_size: Option<IVec2>,
    position: Option<IVec2>,
    flags: WindowFlags,
    opacity: f32,
    focused: bool,
    cursor_visible: bool,
    cursor_locked: bool,
    close_requested: bool,
    commands: Vec<WindowCommand>,
}

impl WindowState {
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            size: config.size,
            min_size: config.min_size,
            max_size: config.max_size,
            position: config.position,
            flags: config.flags,
            opacity: config.opacity,
            focused: config.flags.focused,
            cursor_visible: true,
            cursor_locked: false,
            close_requested: false,
            commands: Vec::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn min_size(&self) -> Option<IVec2> {
        self.min_size
    }

    pub fn max_size(&self) -> Option<IVec2> {
        self.max_size
    }

    pub fn position(&self) -> Option<IVec2> {
        self.position
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Whether the frame loop should stop after the current frame.
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    //--- Setters ----------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.commands.push(WindowCommand::SetTitle(self.title.clone()));
    }

    /// Non-positive dimensions are ignored with a warning.
    pub fn set_size(&mut self, size: IVec2) {
        if size.x <= 0 || size.y <= 0 {
            warn!(target: "platform", "Ignoring non-positive window size {}", size);
            return;
        }
        self.size = size;
        self.commands.push(WindowCommand::SetSize(size));
    }

    /// Requires a resizable window; ignored with a warning otherwise.
    pub fn set_min_size(&mut self, size: Option<IVec2>) {
        if !self.require_resizable("min size") {
            return;
        }
        self.min_size = size;
        self.commands.push(WindowCommand::SetMinSize(size));
    }

    /// Requires a resizable window; ignored with a warning otherwise.
    pub fn set_max_size(&mut self, size: Option<IVec2>) {
        if !self.require_resizable("max size") {
            return;
        }
        self.max_size = size;
        self.commands.push(WindowCommand::SetMaxSize(size));
    }

    pub fn set_position(&mut self, position: IVec2) {
        self.position = Some(position);
        self.commands.push(WindowCommand::SetPosition(position));
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.flags.fullscreen = fullscreen;
        self.commands.push(WindowCommand::SetFullscreen(fullscreen));
    }

    pub fn toggle_fullscreen(&mut self) {
        self.set_fullscreen(!self.flags.fullscreen);
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.flags.resizable = resizable;
        self.commands.push(WindowCommand::SetResizable(resizable));
    }

    pub fn set_undecorated(&mut self, undecorated: bool) {
        self.flags.undecorated = undecorated;
        self.commands.push(WindowCommand::SetDecorated(!undecorated));
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.flags.hidden = hidden;
        self.commands.push(WindowCommand::SetVisible(!hidden));
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.flags.minimized = minimized;
        self.commands.push(WindowCommand::SetMinimized(minimized));
    }

    pub fn set_maximized(&mut self, maximized: bool) {
        self.flags.maximized = maximized;
        self.commands.push(WindowCommand::SetMaximized(maximized));
    }

    pub fn set_topmost(&mut self, topmost: bool) {
        self.flags.topmost = topmost;
        self.commands.push(WindowCommand::SetTopmost(topmost));
    }

    /// Cached only; winit exposes no per-window opacity.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn focus(&mut self) {
        self.commands.push(WindowCommand::Focus);
    }

    //--- Cursor -----------------------------------------------------------

    pub fn show_cursor(&mut self) {
        self.set_cursor_visible(true);
    }

    pub fn hide_cursor(&mut self) {
        self.set_cursor_visible(false);
    }

    /// Hides and locks the cursor to the window.
    pub fn disable_cursor(&mut self) {
        self.set_cursor_visible(false);
        self.cursor_locked = true;
        self.commands.push(WindowCommand::SetCursorLocked(true));
    }

    /// Shows and unlocks the cursor.
    pub fn enable_cursor(&mut self) {
        self.set_cursor_visible(true);
        self.cursor_locked = false;
        self.commands.push(WindowCommand::SetCursorLocked(false));
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
        self.commands.push(WindowCommand::SetCursorVisible(visible));
    }

    //--- Lifecycle --------------------------------------------------------

    /// Stops the frame loop after the current frame.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    //--- Platform Feedback ------------------------------------------------

    /// Pending window changes, oldest first.
    pub(crate) fn take_commands(&mut self) -> Vec<WindowCommand> {
        std::mem::take(&mut self.commands)
    }

    pub(crate) fn on_resized(&mut self, size: IVec2) {
        self.size = size;
    }

    pub(crate) fn on_moved(&mut self, position: IVec2) {
        self.position = Some(position);
    }

    pub(crate) fn on_focus_changed(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn require_resizable(&self, what: &str) -> bool {
        if !self.flags.resizable {
            warn!(target: "platform", "Window must be resizable to set its {}", what);
        }
        self.flags.resizable
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self::new(&WindowConfig::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
