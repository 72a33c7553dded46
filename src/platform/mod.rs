//=========================================================================
// Platform Subsystem
//
// Hosts the runtime inside the Winit event loop.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ↓                                          │
//  │  InputProcessor                              │
//  │   ├─ Converts Winit events                   │
//  │   └─ Tracks modifiers                        │
//  │   ↓                                          │
//  │  ctx.input (StateTracker)                    │
//  │   ↓                                          │
//  │  RedrawRequested                             │
//  │   ├─ Runtime::frame(measured delta)          │
//  │   └─ apply queued WindowCommands             │
//  │   ↓                                          │
//  │  about_to_wait                               │
//  │   └─ WaitUntil(next frame) or redraw now     │
//  └──────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: input arriving between redraws
//   lands in the state tracker and is seen by the next frame
// - **Sticky modifiers**: Modifier state persists across events until
//   explicitly changed (matches platform behavior)
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Application::run()`
// - **First error wins**: a failing scene callback stops the loop and the
//   error is returned from `run()` after shutdown
//
// Responsibilities:
// - Create the OS window from `WindowConfig`
// - Convert Winit types → InputEvents
// - Drive `Runtime::frame` at the target frame rate
// - Mirror window changes in both directions
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use glam::IVec2;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalPosition, LogicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Fullscreen, Icon, Window, WindowAttributes, WindowLevel},
};

//=== Internal Imports ====================================================

use crate::core::input::event::InputEvent;
use crate::core::resource::Image;
use crate::core::scene::SceneError;
use crate::core::{Runtime, TickControl, WindowCommand, WindowConfig};
use input_processor::InputProcessor;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    EventLoopExecution(winit::error::EventLoopError),

    /// The OS refused to create the window.
    WindowCreation(String),

    /// A scene callback failed; the loop stopped after shutdown.
    Scene(SceneError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::Scene(e) => write!(f, "Scene error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
            Self::Scene(e) => Some(e),
            Self::WindowCreation(_) => None,
        }
    }
}

//=== Platform ============================================================

/// Window owner and frame pacer.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(runtime, config)`
/// 2. **Execution**: `platform.run()` blocks until the loop exits
/// 3. **Startup**: `resumed()` creates the window and starts the runtime
/// 4. **Shutdown**: close request or scene error → `exiting()` unloads
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub(crate) struct Platform {
    runtime: Runtime,

    /// Creation parameters, consumed by `resumed()`.
    config: WindowConfig,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    input_processor: InputProcessor,

    /// Start of the previous frame, for delta measurement.
    last_frame: Option<Instant>,

    /// Earliest start of the next frame under the FPS cap.
    next_frame: Option<Instant>,

    /// First fatal error, returned by `run()`.
    failure: Option<PlatformError>,

    shut_down: bool,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet - that happens lazily in `resumed()`.
    pub fn new(runtime: Runtime, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            runtime,
            config,
            window: None,
            input_processor: InputProcessor::new(),
            last_frame: None,
            next_frame: None,
            failure: None,
            shut_down: false,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or a scene fails.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop or window cannot be
    /// created, or the first scene error raised while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        // Loop exits without `exiting()` on some backends.
        self.shutdown();

        match self.failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn feed(&mut self, event: InputEvent) {
        self.runtime.context_mut().input.process_event(&event);
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |window| window.scale_factor())
    }

    fn fail(&mut self, error: PlatformError, event_loop: &ActiveEventLoop) {
        error!(target: "platform", "{}", error);
        if self.failure.is_none() {
            self.failure = Some(error);
        }
        event_loop.exit();
    }

    /// Runs one frame with the time elapsed since the previous one.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame = Some(now);

        match self.runtime.frame(delta) {
            Ok(TickControl::Continue) => {}
            Ok(TickControl::Exit) => event_loop.exit(),
            Err(e) => self.fail(PlatformError::Scene(e), event_loop),
        }

        self.apply_window_commands();

        self.next_frame = self
            .runtime
            .context()
            .time
            .target_frame_duration()
            .map(|frame| now + frame);
    }

    /// Applies window changes queued by scenes during the last frame.
    fn apply_window_commands(&mut self) {
        let commands = self.runtime.context_mut().window.take_commands();
        let Some(window) = &self.window else {
            return;
        };

        for command in commands {
            trace!(target: "platform", "Applying {:?}", command);
            apply_command(window, command);
        }
    }

    fn shutdown(&mut self) {
        if self.shut_down || !self.runtime.is_started() {
            return;
        }
        self.shut_down = true;

        if let Err(e) = self.runtime.shutdown() {
            error!(target: "platform", "Shutdown failed: {}", e);
            if self.failure.is_none() {
                self.failure = Some(PlatformError::Scene(e));
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Window Setup ========================================================

/// Translates the startup configuration into Winit attributes.
///
/// `vsync`, `high_dpi` and `msaa_4x` have no Winit counterpart and are
/// left to the renderer.
fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    let flags = config.flags;

    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.size.x, config.size.y))
        .with_resizable(flags.resizable)
        .with_decorations(!flags.undecorated)
        .with_visible(!flags.hidden)
        .with_maximized(flags.maximized)
        .with_active(flags.focused)
        .with_transparent(flags.transparent);

    if flags.resizable {
        if let Some(size) = config.min_size {
            attrs = attrs.with_min_inner_size(LogicalSize::new(size.x, size.y));
        }
        if let Some(size) = config.max_size {
            attrs = attrs.with_max_inner_size(LogicalSize::new(size.x, size.y));
        }
    }
    if let Some(position) = config.position {
        attrs = attrs.with_position(LogicalPosition::new(position.x, position.y));
    }
    if flags.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }
    if flags.topmost {
        attrs = attrs.with_window_level(WindowLevel::AlwaysOnTop);
    }
    if let Some(icon) = config.icon.as_ref().and_then(window_icon) {
        attrs = attrs.with_window_icon(Some(icon));
    }

    attrs
}

fn window_icon(image: &Image) -> Option<Icon> {
    let rgba = match image.as_rgba() {
        Ok(rgba) => rgba.to_vec(),
        Err(e) => {
            warn!(target: "platform", "Window icon skipped: {}", e);
            return None;
        }
    };

    match Icon::from_rgba(rgba, image.width(), image.height()) {
        Ok(icon) => Some(icon),
        Err(e) => {
            warn!(target: "platform", "Window icon rejected: {}", e);
            None
        }
    }
}

fn apply_command(window: &Window, command: WindowCommand) {
    match command {
        WindowCommand::SetTitle(title) => window.set_title(&title),
        WindowCommand::SetSize(size) => {
            let _ = window.request_inner_size(LogicalSize::new(size.x, size.y));
        }
        WindowCommand::SetMinSize(size) => {
            window.set_min_inner_size(size.map(|size| LogicalSize::new(size.x, size.y)))
        }
        WindowCommand::SetMaxSize(size) => {
            window.set_max_inner_size(size.map(|size| LogicalSize::new(size.x, size.y)))
        }
        WindowCommand::SetPosition(position) => {
            window.set_outer_position(LogicalPosition::new(position.x, position.y))
        }
        WindowCommand::SetFullscreen(fullscreen) => {
            window.set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)))
        }
        WindowCommand::SetResizable(resizable) => window.set_resizable(resizable),
        WindowCommand::SetDecorated(decorated) => window.set_decorations(decorated),
        WindowCommand::SetVisible(visible) => window.set_visible(visible),
        WindowCommand::SetMinimized(minimized) => window.set_minimized(minimized),
        WindowCommand::SetMaximized(maximized) => window.set_maximized(maximized),
        WindowCommand::SetTopmost(topmost) => window.set_window_level(if topmost {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        }),
        WindowCommand::SetCursorVisible(visible) => window.set_cursor_visible(visible),
        WindowCommand::SetCursorLocked(locked) => {
            let result = if locked {
                // Locked is unsupported on Windows/X11; fall back to confined.
                window
                    .set_cursor_grab(CursorGrabMode::Locked)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            } else {
                window.set_cursor_grab(CursorGrabMode::None)
            };
            if let Err(e) = result {
                warn!(target: "platform", "Cursor grab failed: {}", e);
            }
        }
        WindowCommand::Focus => window.focus_window(),
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume and starts the runtime.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let window = match event_loop.create_window(window_attributes(&self.config)) {
            Ok(window) => window,
            Err(e) => {
                self.fail(PlatformError::WindowCreation(e.to_string()), event_loop);
                return;
            }
        };

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        if self.config.flags.minimized {
            window.set_minimized(true);
        }
        window.request_redraw();
        self.window = Some(window);

        // Discard startup setters; the attributes already reflect them.
        self.runtime.context_mut().window.take_commands();

        if let Err(e) = self.runtime.start() {
            self.fail(PlatformError::Scene(e), event_loop);
            return;
        }
        self.apply_window_commands();
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.runtime.context_mut().window.request_close();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<i32>(self.scale_factor());
                debug!(target: "platform", "Window resized to {}x{}", logical.width, logical.height);
                self.runtime
                    .context_mut()
                    .window
                    .on_resized(IVec2::new(logical.width, logical.height));
            }

            WindowEvent::Moved(position) => {
                let logical = position.to_logical::<i32>(self.scale_factor());
                self.runtime
                    .context_mut()
                    .window
                    .on_moved(IVec2::new(logical.x, logical.y));
            }

            WindowEvent::Focused(focused) => {
                debug!(target: "platform", "Window focus changed: {}", focused);
                let ctx = self.runtime.context_mut();
                ctx.window.on_focus_changed(*focused);
                if !focused {
                    // Key-ups are never delivered to an unfocused window.
                    ctx.input.release_all();
                }
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor());
                let event = self.input_processor.process_mouse_move(logical.x, logical.y);
                self.feed(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.input_processor.process_mouse_wheel(*delta);
                self.feed(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.feed(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.feed(event);
            }

            WindowEvent::RedrawRequested => {
                if self.runtime.is_started() {
                    self.redraw(event_loop);
                }
            }

            _ => {}
        }
    }

    /// Schedules the next frame, honouring the FPS cap.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };

        let ctx = self.runtime.context();
        if !ctx.window.is_focused() && !ctx.window.flags().always_run {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        match self.next_frame {
            Some(deadline) if Instant::now() < deadline => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Wait);
                window.request_redraw();
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(target: "platform", "Event loop exiting");
        self.shutdown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::Color;
    use crate::core::input::{KeyCode, Modifiers};
    use crate::core::resource::ResourceManager;
    use crate::core::scene::{Scene, SceneManager, SceneResult};
    use crate::core::{Context, WindowFlags};

    struct Blank {
        resources: ResourceManager,
    }

    impl Scene for Blank {
        fn load(&mut self, _ctx: &mut Context) -> SceneResult {
            Ok(())
        }

        fn draw(&self, _ctx: &mut Context) -> SceneResult {
            Ok(())
        }

        fn resources(&self) -> &ResourceManager {
            &self.resources
        }

        fn resources_mut(&mut self) -> &mut ResourceManager {
            &mut self.resources
        }
    }

    fn platform(config: WindowConfig) -> Platform {
        let scenes = SceneManager::new("Blank", Blank { resources: ResourceManager::new() });
        let runtime = Runtime::new(scenes, Context::new(&config, Some(60)));
        Platform::new(runtime, config)
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let platform = platform(WindowConfig::default());
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert!(!platform.runtime.is_started());
    }

    #[test]
    fn fed_input_reaches_state_tracker() {
        let mut platform = platform(WindowConfig::default());

        platform.feed(InputEvent::KeyDown {
            key: KeyCode::Space,
            modifiers: Modifiers::NONE,
        });

        assert!(platform.runtime.context().input.is_key_down(KeyCode::Space));
    }

    #[test]
    fn commands_are_drained_without_window() {
        let mut platform = platform(WindowConfig::default());
        platform.runtime.context_mut().window.set_title("Paused");

        platform.apply_window_commands();

        assert!(platform.runtime.context_mut().window.take_commands().is_empty());
    }

    #[test]
    fn shutdown_before_start_is_noop() {
        let mut platform = platform(WindowConfig::default());
        platform.shutdown();
        assert!(platform.failure.is_none());
        assert!(!platform.shut_down);
    }

    #[test]
    fn scale_factor_defaults_to_one() {
        assert_eq!(platform(WindowConfig::default()).scale_factor(), 1.0);
    }

    //=====================================================================
    // Window Attribute Tests
    //=====================================================================

    #[test]
    fn attributes_follow_config() {
        let config = WindowConfig::new("Cats", IVec2::new(640, 480)).with_flags(WindowFlags {
            undecorated: true,
            topmost: true,
            fullscreen: true,
            ..WindowFlags::default()
        });

        let attrs = window_attributes(&config);

        assert_eq!(attrs.title, "Cats");
        assert!(!attrs.decorations);
        assert!(!attrs.resizable);
        assert_eq!(attrs.window_level, WindowLevel::AlwaysOnTop);
        assert_eq!(attrs.fullscreen, Some(Fullscreen::Borderless(None)));
    }

    #[test]
    fn size_limits_require_resizable() {
        let fixed = WindowConfig::default().with_min_size(IVec2::new(100, 100));
        assert!(window_attributes(&fixed).min_inner_size.is_none());

        let resizable = fixed.with_resizable(true);
        assert!(window_attributes(&resizable).min_inner_size.is_some());
    }

    #[test]
    fn icon_from_generated_image() {
        let config = WindowConfig::default().with_icon(Image::gen_color(16, 16, Color::RED));
        assert!(window_attributes(&config).window_icon.is_some());
    }

    #[test]
    fn unloaded_icon_is_skipped() {
        let config = WindowConfig::default().with_icon(Image::default());
        assert!(window_attributes(&config).window_icon.is_none());
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn platform_error_display_format() {
        let error = PlatformError::Scene(SceneError::SceneNotFound("World".into()));
        assert!(error.to_string().contains("World"));

        let error = PlatformError::WindowCreation("no display".into());
        assert_eq!(error.to_string(), "Window creation failed: no display");
    }
}
