//=========================================================================
// Runtime
//=========================================================================
//
// Single-threaded frame driver for the active scene.
//
// Responsibilities:
// - Load and initialize the initial scene before the first frame
// - Run get_input → update → draw once per frame with the measured delta
// - Apply queued scene transitions between callbacks
// - Advance audio voices and record the frame's draw list
// - Tear down the active scene and report leaked handles on shutdown
//
// Notes:
// The runtime knows nothing about windows. The platform (or a headless
// driver) feeds input events into `context_mut().input` as they arrive
// and calls `frame()` with the elapsed time.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::scene::{SceneError, SceneManager, SceneResult};
use crate::core::Context;

//=== TickControl =========================================================

/// Whether the frame loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== Runtime =============================================================

/// Owns the scene manager and the context and drives one frame at a time.
pub struct Runtime {
    scenes: SceneManager,
    ctx: Context,
    started: bool,
}

impl Runtime {
    //--- Construction -----------------------------------------------------

    pub fn new(scenes: SceneManager, ctx: Context) -> Self {
        Self { scenes, ctx, started: false }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Loads and initializes the initial scene. Transitions queued during
    /// `load`/`init` are applied before returning.
    pub fn start(&mut self) -> SceneResult {
        if self.started {
            return Ok(());
        }
        info!(target: "runtime", "Runtime starting");
        self.started = true;
        self.scenes.start(&mut self.ctx)?;
        self.scenes.process_transitions(&mut self.ctx)
    }

    /// Runs one frame of `delta` seconds.
    ///
    /// # Frame Pipeline
    ///
    /// 1. **Time**: advance the frame clock, finalize mouse delta
    /// 2. **Input**: `get_input`, then apply transitions
    /// 3. **Update**: `update(delta)`, then apply transitions
    /// 4. **Audio**: advance playing voices
    /// 5. **Draw**: `draw` between `begin_drawing`/`end_drawing`
    /// 6. **Cleanup**: clear per-frame input edges
    ///
    /// Returns [`TickControl::Exit`] once a close was requested.
    pub fn frame(&mut self, delta: f32) -> Result<TickControl, SceneError> {
        let ctx = &mut self.ctx;

        //--- Step 1: Time --------------------------------------------------
        ctx.time.advance(delta);
        ctx.input.finalize_frame();
        let delta = ctx.time.delta();

        //--- Step 2: Input -------------------------------------------------
        self.scenes.get_input(ctx)?;
        self.scenes.process_transitions(ctx)?;

        //--- Step 3: Update ------------------------------------------------
        self.scenes.update(ctx, delta)?;
        self.scenes.process_transitions(ctx)?;

        //--- Step 4: Audio -------------------------------------------------
        ctx.audio.advance(delta);

        //--- Step 5: Draw --------------------------------------------------
        ctx.graphics.begin_drawing();
        let drawn = self.scenes.draw(ctx);
        let commands = ctx.graphics.end_drawing();
        drawn?;

        //--- Step 6: Cleanup -----------------------------------------------
        ctx.input.clear();

        trace!(
            target: "runtime",
            "Frame {} ({:.4}s, {} draw commands, scene '{}')",
            ctx.time.frame_count(),
            delta,
            commands,
            self.scenes.active_name()
        );

        if ctx.window.should_close() {
            info!(target: "runtime", "Close requested");
            return Ok(TickControl::Exit);
        }
        Ok(TickControl::Continue)
    }

    /// Unloads the active scene and warns about handles nobody released.
    pub fn shutdown(&mut self) -> SceneResult {
        info!(target: "runtime", "Runtime shutting down");
        let result = self.scenes.shutdown(&mut self.ctx);

        let textures = self.ctx.graphics.texture_count();
        let voices = self.ctx.audio.voice_count();
        if textures > 0 || voices > 0 {
            warn!(
                target: "runtime",
                "{} textures and {} voices still alive after shutdown",
                textures, voices
            );
        }
        result
    }

    //--- Accessors --------------------------------------------------------

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::{Color, DrawCommand};
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crate::core::resource::{Image, ResourceError, ResourceManager, Sound, Texture};
    use crate::core::scene::Scene;
    use crate::core::WindowConfig;

    use std::cell::RefCell;
    use std::rc::Rc;

    type CallLog = Rc<RefCell<Vec<String>>>;

    /// Goes to `next` on Enter, closes the window on Escape.
    struct Stage {
        name: &'static str,
        next: &'static str,
        log: CallLog,
        resources: ResourceManager,
    }

    impl Stage {
        fn new(name: &'static str, next: &'static str, log: &CallLog) -> Self {
            Self {
                name,
                next,
                log: Rc::clone(log),
                resources: ResourceManager::new(),
            }
        }

        fn record(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}.{}", self.name, hook));
        }
    }

    impl Scene for Stage {
        fn load(&mut self, ctx: &mut Context) -> SceneResult {
            self.record("load");
            let image = Image::gen_color(4, 4, Color::GREEN);
            self.resources.init::<Texture>("tile")?.load_from_image(&image, ctx)?;
            let blip = Sound::from_samples(vec![0.0; 10], 1, 10, ctx)?;
            self.resources.insert("blip", blip)?;
            Ok(())
        }

        fn init(&mut self, _ctx: &mut Context) -> SceneResult {
            self.record("init");
            Ok(())
        }

        fn get_input(&mut self, ctx: &mut Context) -> SceneResult {
            self.record("get_input");
            if ctx.input.is_key_pressed(KeyCode::Enter) {
                ctx.scenes.change(self.next);
            }
            if ctx.input.is_key_pressed(KeyCode::Escape) {
                ctx.window.request_close();
            }
            Ok(())
        }

        fn update(&mut self, _ctx: &mut Context, _delta: f32) -> SceneResult {
            self.record("update");
            Ok(())
        }

        fn draw(&self, ctx: &mut Context) -> SceneResult {
            self.record("draw");
            let tile = self.resources.get::<Texture>("tile")?;
            ctx.graphics.clear_background(Color::BLACK);
            if let Some(id) = tile.id() {
                ctx.graphics.draw_texture(id, glam::Vec2::ZERO, Color::WHITE);
            }
            Ok(())
        }

        fn unload(&mut self, _ctx: &mut Context) {
            self.record("unload");
        }

        fn resources(&self) -> &ResourceManager {
            &self.resources
        }

        fn resources_mut(&mut self) -> &mut ResourceManager {
            &mut self.resources
        }
    }

    fn runtime() -> (Runtime, CallLog) {
        let log = CallLog::default();
        let mut scenes = SceneManager::new("Menu", Stage::new("Menu", "World", &log));
        scenes.add_scene("World", Stage::new("World", "Menu", &log)).unwrap();
        let runtime = Runtime::new(scenes, Context::headless(WindowConfig::default()));
        (runtime, log)
    }

    fn press(runtime: &mut Runtime, key: KeyCode) {
        runtime.context_mut().input.process_event(&InputEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        });
    }

    fn calls(log: &CallLog) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    //=====================================================================
    // Frame Pipeline
    //=====================================================================

    #[test]
    fn frame_runs_callbacks_in_order() {
        let (mut runtime, log) = runtime();
        runtime.start().unwrap();
        calls(&log);

        assert_eq!(runtime.frame(0.016).unwrap(), TickControl::Continue);

        assert_eq!(calls(&log), vec!["Menu.get_input", "Menu.update", "Menu.draw"]);
        assert_eq!(runtime.context().time.frame_count(), 1);
        assert_eq!(
            runtime.context().graphics.last_frame().first(),
            Some(&DrawCommand::Clear(Color::BLACK))
        );
    }

    #[test]
    fn change_in_get_input_applies_before_update() {
        let (mut runtime, log) = runtime();
        runtime.start().unwrap();
        calls(&log);

        press(&mut runtime, KeyCode::Enter);
        runtime.frame(0.016).unwrap();

        assert_eq!(
            calls(&log),
            vec!["Menu.get_input", "Menu.unload", "World.load", "World.init", "World.update", "World.draw"]
        );
        assert_eq!(runtime.scenes().active_name(), "World");
        // Menu's texture and sound were released before World loaded its own.
        assert_eq!(runtime.context().graphics.texture_count(), 1);
        assert_eq!(runtime.context().audio.voice_count(), 1);
    }

    #[test]
    fn pressed_edges_last_one_frame() {
        let (mut runtime, _log) = runtime();
        runtime.start().unwrap();

        press(&mut runtime, KeyCode::Enter);
        runtime.frame(0.016).unwrap();
        runtime.frame(0.016).unwrap();

        // Held Enter does not bounce back to Menu.
        assert_eq!(runtime.scenes().active_name(), "World");
        assert!(runtime.context().input.is_key_down(KeyCode::Enter));
    }

    #[test]
    fn close_request_exits() {
        let (mut runtime, _log) = runtime();
        runtime.start().unwrap();

        press(&mut runtime, KeyCode::Escape);
        assert_eq!(runtime.frame(0.016).unwrap(), TickControl::Exit);
    }

    #[test]
    fn shutdown_leaves_no_handles() {
        let (mut runtime, _log) = runtime();
        runtime.start().unwrap();
        runtime.frame(0.016).unwrap();

        runtime.shutdown().unwrap();

        assert_eq!(runtime.context().graphics.texture_count(), 0);
        assert_eq!(runtime.context().audio.voice_count(), 0);
    }

    #[test]
    fn draw_error_still_closes_frame() {
        let (mut runtime, _log) = runtime();
        runtime.start().unwrap();
        runtime
            .scenes
            .active_scene_mut()
            .resources_mut()
            .unload("tile", &mut runtime.ctx)
            .unwrap();

        assert_eq!(
            runtime.frame(0.016),
            Err(SceneError::Resource(ResourceError::NotFound("tile".into())))
        );
        assert!(!runtime.context().graphics.is_drawing());
    }

    #[test]
    fn start_is_idempotent() {
        let (mut runtime, log) = runtime();
        runtime.start().unwrap();
        runtime.start().unwrap();

        assert!(runtime.is_started());
        assert_eq!(calls(&log), vec!["Menu.load", "Menu.init"]);
    }

    #[test]
    fn scene_error_stops_frame() {
        let (mut runtime, _log) = runtime();
        runtime.start().unwrap();
        runtime.context_mut().scenes.change("Nowhere");

        assert_eq!(
            runtime.frame(0.016),
            Err(SceneError::SceneNotFound("Nowhere".into()))
        );
    }
}
