//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, the active scene and its lifecycle.
//
// Scenes are stored by name and keep their state between activations.
// Exactly one scene is active at any time; the active slot lives outside
// the inactive map so it can never be looked up and missed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneError, SceneResult, SceneTransition};
use crate::core::Context;

//=== Scene Slot ==========================================================

struct SceneSlot {
    scene: Box<dyn Scene>,
    loaded: bool,
}

impl SceneSlot {
    fn new(scene: Box<dyn Scene>) -> Self {
        Self { scene, loaded: false }
    }

    /// `load` then `init`. The slot counts as loaded as soon as `load` has
    /// been entered so a half-loaded scene still gets torn down.
    fn activate(&mut self, name: &str, ctx: &mut Context) -> SceneResult {
        debug!(target: "scene", "Loading scene '{}'", name);
        self.loaded = true;
        self.scene.load(ctx)?;
        self.scene.init(ctx)
    }

    /// `unload` hook, then every registered resource.
    fn deactivate(&mut self, name: &str, ctx: &mut Context) -> SceneResult {
        if !self.loaded {
            return Ok(());
        }
        debug!(target: "scene", "Unloading scene '{}'", name);
        self.loaded = false;
        self.scene.unload(ctx);
        self.scene.resources_mut().unload_all(ctx)?;
        Ok(())
    }
}

//=== Scene Manager =======================================================

/// Owns the registered scenes and mediates transitions between them.
///
/// # Example
///
/// ```rust
/// # use pina::prelude::*;
/// # #[derive(Default)]
/// # struct Blank { resources: ResourceManager }
/// # impl Scene for Blank {
/// #     fn load(&mut self, _: &mut Context) -> SceneResult { Ok(()) }
/// #     fn draw(&self, _: &mut Context) -> SceneResult { Ok(()) }
/// #     fn resources(&self) -> &ResourceManager { &self.resources }
/// #     fn resources_mut(&mut self) -> &mut ResourceManager { &mut self.resources }
/// # }
/// # fn main() -> Result<(), SceneError> {
/// let mut ctx = Context::headless(WindowConfig::default());
/// let mut scenes = SceneManager::new("Menu", Blank::default());
/// scenes.add_scene("World", Blank::default())?;
///
/// scenes.start(&mut ctx)?;
/// scenes.change_scene("World", &mut ctx)?;
/// assert_eq!(scenes.active_name(), "World");
/// # Ok(())
/// # }
/// ```
pub struct SceneManager {
    active_name: String,
    active: SceneSlot,
    inactive: HashMap<String, SceneSlot>,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    /// Registers `scene` under `name` and marks it active.
    ///
    /// The scene is not loaded here; the runtime calls [`start`](Self::start)
    /// once before the first frame.
    pub fn new<T>(name: impl Into<String>, scene: T) -> Self
    where
        T: Scene + 'static,
    {
        let name = name.into();
        debug!(target: "scene", "Registered initial scene '{}'", name);
        Self {
            active_name: name,
            active: SceneSlot::new(Box::new(scene)),
            inactive: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers an inactive scene.
    ///
    /// # Errors
    ///
    /// [`SceneError::DuplicateScene`] if `name` is taken.
    pub fn add_scene<T>(&mut self, name: impl Into<String>, scene: T) -> SceneResult
    where
        T: Scene + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(SceneError::DuplicateScene(name));
        }

        debug!(target: "scene", "Registered scene '{}'", name);
        self.inactive.insert(name, SceneSlot::new(Box::new(scene)));
        Ok(())
    }

    /// Unregisters an inactive scene, unloading it first if it is still
    /// loaded. A scene already unloaded by a previous change is not
    /// unloaded again.
    ///
    /// # Errors
    ///
    /// [`SceneError::RemoveActive`] if `name` is the active scene (nothing
    /// changes), [`SceneError::SceneNotFound`] if it is not registered.
    pub fn remove_scene(&mut self, name: &str, ctx: &mut Context) -> SceneResult {
        if name == self.active_name {
            return Err(SceneError::RemoveActive(name.to_owned()));
        }

        let mut slot = self
            .inactive
            .remove(name)
            .ok_or_else(|| SceneError::SceneNotFound(name.to_owned()))?;

        debug!(target: "scene", "Removing scene '{}'", name);
        slot.deactivate(name, ctx)
    }

    //--- Transitions ------------------------------------------------------

    /// Loads and initializes the initial scene.
    pub fn start(&mut self, ctx: &mut Context) -> SceneResult {
        if self.active.loaded {
            warn!(target: "scene", "start() called twice, '{}' is already loaded", self.active_name);
            return Ok(());
        }

        info!(target: "scene", "Starting with scene '{}'", self.active_name);
        self.active.activate(&self.active_name, ctx)
    }

    /// Unloads the active scene, activates `name`, then loads and
    /// initializes it.
    ///
    /// The outgoing scene's resources are released before the incoming
    /// scene's `load` runs. Changing to the active scene reloads it.
    ///
    /// # Errors
    ///
    /// [`SceneError::SceneNotFound`] if `name` is not registered; nothing
    /// is unloaded in that case.
    pub fn change_scene(&mut self, name: &str, ctx: &mut Context) -> SceneResult {
        if !self.contains(name) {
            return Err(SceneError::SceneNotFound(name.to_owned()));
        }

        self.active.deactivate(&self.active_name, ctx)?;

        if name != self.active_name {
            if let Some(incoming) = self.inactive.remove(name) {
                let outgoing = std::mem::replace(&mut self.active, incoming);
                let outgoing_name = std::mem::replace(&mut self.active_name, name.to_owned());
                self.inactive.insert(outgoing_name, outgoing);
            }
        }

        info!(target: "scene", "Active scene is now '{}'", self.active_name);
        self.active.activate(&self.active_name, ctx)
    }

    /// Unloads the active scene if it is loaded.
    pub fn shutdown(&mut self, ctx: &mut Context) -> SceneResult {
        self.active.deactivate(&self.active_name, ctx)
    }

    /// Applies the transitions queued on `ctx.scenes`, oldest first.
    ///
    /// Stops at the first failing transition; the rest of that batch is
    /// dropped.
    pub fn process_transitions(&mut self, ctx: &mut Context) -> SceneResult {
        for transition in ctx.scenes.take() {
            match transition {
                SceneTransition::Change(name) => self.change_scene(&name, ctx)?,
                SceneTransition::Remove(name) => self.remove_scene(&name, ctx)?,
            }
        }
        Ok(())
    }

    //--- Frame Dispatch ---------------------------------------------------

    pub fn get_input(&mut self, ctx: &mut Context) -> SceneResult {
        self.active.scene.get_input(ctx)
    }

    pub fn update(&mut self, ctx: &mut Context, delta: f32) -> SceneResult {
        self.active.scene.update(ctx, delta)
    }

    pub fn draw(&self, ctx: &mut Context) -> SceneResult {
        self.active.scene.draw(ctx)
    }

    //--- Queries ----------------------------------------------------------

    pub fn active_name(&self) -> &str {
        &self.active_name
    }

    pub fn active_scene(&self) -> &dyn Scene {
        self.active.scene.as_ref()
    }

    pub fn active_scene_mut(&mut self) -> &mut dyn Scene {
        self.active.scene.as_mut()
    }

    pub fn contains(&self, name: &str) -> bool {
        name == self.active_name || self.inactive.contains_key(name)
    }

    /// Whether `name` is registered and currently loaded.
    pub fn is_loaded(&self, name: &str) -> bool {
        if name == self.active_name {
            self.active.loaded
        } else {
            self.inactive.get(name).is_some_and(|slot| slot.loaded)
        }
    }

    /// Number of registered scenes, active included.
    pub fn len(&self) -> usize {
        self.inactive.len() + 1
    }

    /// Registered names in sorted order.
    pub fn scene_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .inactive
            .keys()
            .map(String::as_str)
            .chain(std::iter::once(self.active_name.as_str()))
            .collect();
        names.sort_unstable();
        names
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
