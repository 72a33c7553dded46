//=========================================================================
// Application
//
// Main entry point: configures the window and frame cap, takes the scene
// manager and runs it.
//
// Architecture:
// ```text
//  ApplicationBuilder  ──build()──>  Application  ──run()──────────>  [Platform + Runtime]
//         │                               │
//         └─ with_target_fps()            └─ run_headless()  ──>  [Runtime only]
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::scene::{SceneError, SceneManager};
use crate::core::{Context, Runtime, TickControl, WindowConfig};
use crate::platform::{Platform, PlatformError};

//=== ApplicationError ====================================================

/// Fatal errors returned from [`Application::run`] and
/// [`Application::run_headless`].
#[derive(Debug)]
pub enum ApplicationError {
    /// The event loop or the window could not be created or kept running.
    Platform(String),

    /// A scene callback or transition failed.
    Scene(SceneError),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Platform(e) => write!(f, "Platform error: {}", e),
            Self::Scene(e) => write!(f, "Scene error: {}", e),
        }
    }
}

impl std::error::Error for ApplicationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scene(e) => Some(e),
            Self::Platform(_) => None,
        }
    }
}

impl From<SceneError> for ApplicationError {
    fn from(error: SceneError) -> Self {
        Self::Scene(error)
    }
}

impl From<PlatformError> for ApplicationError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::Scene(e) => Self::Scene(e),
            other => Self::Platform(other.to_string()),
        }
    }
}

//=== ApplicationBuilder ==================================================

/// Builder for configuring and constructing an [`Application`].
///
/// # Default Values
///
/// - **Target FPS**: 60
///
/// # Examples
///
/// ```no_run
/// use pina::prelude::*;
///
/// # struct Menu { resources: ResourceManager }
/// # impl Scene for Menu {
/// #     fn load(&mut self, _ctx: &mut Context) -> SceneResult { Ok(()) }
/// #     fn draw(&self, _ctx: &mut Context) -> SceneResult { Ok(()) }
/// #     fn resources(&self) -> &ResourceManager { &self.resources }
/// #     fn resources_mut(&mut self) -> &mut ResourceManager { &mut self.resources }
/// # }
/// let scenes = SceneManager::new("Menu", Menu { resources: ResourceManager::new() });
///
/// ApplicationBuilder::new(WindowConfig::new("Cat Shooter", IVec2::new(960, 540)))
///     .with_target_fps(Some(144))
///     .build(scenes)
///     .run()?;
/// # Ok::<(), ApplicationError>(())
/// ```
pub struct ApplicationBuilder {
    config: WindowConfig,
    target_fps: Option<u32>,
}

impl ApplicationBuilder {
    pub fn new(config: WindowConfig) -> Self {
        Self { config, target_fps: Some(60) }
    }

    /// Caps the frame rate; `None` runs as fast as the event loop allows.
    ///
    /// Default: `Some(60)`
    ///
    /// # Panics
    ///
    /// Panics if `fps` is `Some(0)`.
    pub fn with_target_fps(mut self, fps: Option<u32>) -> Self {
        assert!(fps != Some(0), "Target FPS must be positive");
        self.target_fps = fps;
        self
    }

    /// Consumes the builder and the scene set. Nothing is loaded until the
    /// application runs.
    pub fn build(self, scenes: SceneManager) -> Application {
        info!(
            target: "runtime",
            "Building application '{}' ({}x{}, target FPS: {:?})",
            self.config.title, self.config.size.x, self.config.size.y, self.target_fps
        );

        let ctx = Context::new(&self.config, self.target_fps);
        Application {
            runtime: Runtime::new(scenes, ctx),
            config: self.config,
        }
    }
}

//=== Application =========================================================

/// A configured scene set ready to run, windowed or headless.
pub struct Application {
    runtime: Runtime,
    config: WindowConfig,
}

impl Application {
    //--- Execution --------------------------------------------------------

    /// Opens the window and runs until it closes or a scene fails.
    ///
    /// # Lifecycle
    ///
    /// 1. Platform creates the window and starts the runtime
    /// 2. One frame per redraw, capped at the target FPS
    /// 3. On close or error: active scene unloaded, loop exits
    ///
    /// # Errors
    ///
    /// [`ApplicationError::Platform`] if no window could be opened,
    /// [`ApplicationError::Scene`] for the first failing scene callback.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(self) -> Result<(), ApplicationError> {
        info!(target: "runtime", "Starting application");

        let platform = Platform::new(self.runtime, self.config);
        let result = platform.run().map_err(ApplicationError::from);

        match &result {
            Ok(()) => info!(target: "runtime", "Application shutdown complete"),
            Err(e) => error!(target: "runtime", "Application stopped: {}", e),
        }
        result
    }

    /// Runs up to `frames` frames of `delta` seconds without a window.
    ///
    /// Stops early when a scene requests close. The active scene is always
    /// unloaded before returning.
    ///
    /// # Errors
    ///
    /// The first scene error; shutdown still runs.
    pub fn run_headless(mut self, frames: u64, delta: f32) -> Result<(), ApplicationError> {
        info!(target: "runtime", "Starting headless run ({} frames @ {}s)", frames, delta);

        let result = self.drive(frames, delta);
        let shutdown = self.runtime.shutdown();

        result?;
        shutdown?;
        Ok(())
    }

    fn drive(&mut self, frames: u64, delta: f32) -> Result<(), SceneError> {
        self.runtime.start()?;
        for _ in 0..frames {
            if self.runtime.frame(delta)? == TickControl::Exit {
                break;
            }
        }
        Ok(())
    }

    //--- Accessors --------------------------------------------------------

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resource::ResourceManager;
    use crate::core::scene::{Scene, SceneResult};

    /// Requests close after `frames` updates.
    struct Countdown {
        frames: u32,
        fail: bool,
        resources: ResourceManager,
    }

    impl Countdown {
        fn new(frames: u32) -> Self {
            Self { frames, fail: false, resources: ResourceManager::new() }
        }
    }

    impl Scene for Countdown {
        fn load(&mut self, _ctx: &mut Context) -> SceneResult {
            Ok(())
        }

        fn update(&mut self, ctx: &mut Context, _delta: f32) -> SceneResult {
            if self.fail {
                return Err(SceneError::SceneNotFound("Nowhere".into()));
            }
            self.frames = self.frames.saturating_sub(1);
            if self.frames == 0 {
                ctx.window.request_close();
            }
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

    fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new(WindowConfig::default())
    }

    //=====================================================================
    // ApplicationBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        assert_eq!(builder().target_fps, Some(60));
    }

    #[test]
    fn builder_with_target_fps() {
        assert_eq!(builder().with_target_fps(Some(144)).target_fps, Some(144));
        assert_eq!(builder().with_target_fps(None).target_fps, None);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be positive")]
    fn builder_with_target_fps_panics_on_zero() {
        builder().with_target_fps(Some(0));
    }

    #[test]
    fn builder_build_passes_fps_to_context() {
        let app = builder()
            .with_target_fps(Some(30))
            .build(SceneManager::new("Main", Countdown::new(1)));

        assert_eq!(app.runtime().context().time.target_fps(), Some(30));
        assert_eq!(app.config().title, "Pina");
        assert!(!app.runtime().is_started());
    }

    //=====================================================================
    // Headless Run Tests
    //=====================================================================

    #[test]
    fn headless_run_stops_on_close_request() {
        let app = builder().build(SceneManager::new("Main", Countdown::new(3)));
        assert!(app.run_headless(100, 1.0 / 60.0).is_ok());
    }

    #[test]
    fn headless_run_respects_frame_limit() {
        let app = builder().build(SceneManager::new("Main", Countdown::new(1000)));
        assert!(app.run_headless(5, 1.0 / 60.0).is_ok());
    }

    #[test]
    fn headless_run_returns_scene_error() {
        let mut scene = Countdown::new(10);
        scene.fail = true;
        let app = builder().build(SceneManager::new("Main", scene));

        match app.run_headless(10, 0.016) {
            Err(ApplicationError::Scene(SceneError::SceneNotFound(name))) => {
                assert_eq!(name, "Nowhere")
            }
            other => panic!("expected scene error, got {:?}", other),
        }
    }

    //=====================================================================
    // ApplicationError Tests
    //=====================================================================

    #[test]
    fn platform_errors_keep_scene_errors_typed() {
        let error = ApplicationError::from(PlatformError::Scene(SceneError::RemoveActive("Menu".into())));
        assert!(matches!(error, ApplicationError::Scene(SceneError::RemoveActive(_))));

        let error = ApplicationError::from(PlatformError::WindowCreation("no display".into()));
        assert_eq!(
            error.to_string(),
            "Platform error: Window creation failed: no display"
        );
    }

    #[test]
    fn application_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ApplicationError>();
    }
}
