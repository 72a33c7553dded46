//=========================================================================
// Resource Manager
//=========================================================================
//
// Keyed registry of resources owned by one scene.
//
// Entries are stored type-erased and downcast on lookup; a lookup with
// the wrong type is reported as `TypeMismatch` rather than panicking.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Resource, ResourceError};
use crate::core::Context;

//=== ResourceManager =====================================================

/// Owns and key-indexes a set of resources.
///
/// # Example
///
/// ```rust
/// # use pina::prelude::*;
/// # fn main() -> Result<(), pina::core::resource::ResourceError> {
/// let mut ctx = Context::headless(WindowConfig::default());
/// let mut resources = ResourceManager::new();
///
/// let image = Image::gen_color(8, 8, Color::WHITE);
/// resources.init::<Texture>("cat")?.load_from_image(&image, &mut ctx)?;
/// assert_eq!(resources.get::<Texture>("cat")?.width(), 8);
///
/// resources.unload("cat", &mut ctx)?;
/// assert!(resources.get::<Texture>("cat").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ResourceManager {
    entries: HashMap<String, Box<dyn Resource>>,
}

impl ResourceManager {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a fresh, unloaded `T` under `key` and returns it so the
    /// caller can load it in place.
    ///
    /// # Errors
    ///
    /// [`ResourceError::DuplicateKey`] if `key` is taken.
    pub fn init<T>(&mut self, key: &str) -> Result<&mut T, ResourceError>
    where
        T: Resource + Default,
    {
        self.insert(key, T::default())
    }

    /// Registers an already constructed resource under `key`.
    ///
    /// # Errors
    ///
    /// [`ResourceError::DuplicateKey`] if `key` is taken; `resource` is
    /// dropped without being unloaded in that case.
    pub fn insert<T: Resource>(&mut self, key: &str, resource: T) -> Result<&mut T, ResourceError> {
        if self.entries.contains_key(key) {
            return Err(ResourceError::DuplicateKey(key.to_owned()));
        }

        debug!(target: "resource", "Registering '{}' ({})", key, short_type_name::<T>());
        self.entries.insert(key.to_owned(), Box::new(resource));
        self.get_mut::<T>(key)
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the resource under `key` as a `T`.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotFound`] if absent, [`ResourceError::TypeMismatch`]
    /// if the stored resource is not a `T`.
    pub fn get<T: Resource>(&self, key: &str) -> Result<&T, ResourceError> {
        let entry: &dyn Resource = self
            .entries
            .get(key)
            .map(|boxed| boxed.as_ref())
            .ok_or_else(|| ResourceError::NotFound(key.to_owned()))?;

        let found = entry.type_name();
        entry
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(key, found))
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut<T: Resource>(&mut self, key: &str) -> Result<&mut T, ResourceError> {
        let entry: &mut dyn Resource = self
            .entries
            .get_mut(key)
            .map(|boxed| boxed.as_mut())
            .ok_or_else(|| ResourceError::NotFound(key.to_owned()))?;

        let found = entry.type_name();
        entry
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| mismatch::<T>(key, found))
    }

    //--- Unloading --------------------------------------------------------

    /// Unloads the resource under `key` and removes it.
    ///
    /// The entry is removed even when the resource's own unload fails;
    /// that failure is returned.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotFound`] if absent, or whatever the resource's
    /// `unload` reports.
    pub fn unload(&mut self, key: &str, ctx: &mut Context) -> Result<(), ResourceError> {
        let mut resource = self
            .entries
            .remove(key)
            .ok_or_else(|| ResourceError::NotFound(key.to_owned()))?;

        debug!(target: "resource", "Unloading '{}'", key);
        resource.unload(ctx)
    }

    /// Unloads every ready resource and clears the registry.
    ///
    /// Entries that were registered but never loaded are dropped without
    /// calling `unload`. The registry is always empty afterwards; the
    /// first unload failure, if any, is returned.
    pub fn unload_all(&mut self, ctx: &mut Context) -> Result<(), ResourceError> {
        if self.entries.is_empty() {
            return Ok(());
        }

        debug!(target: "resource", "Unloading all {} resources", self.entries.len());

        let mut first_error = None;
        for (key, mut resource) in self.entries.drain() {
            if !resource.is_ready() {
                warn!(target: "resource", "'{}' was never loaded, dropping", key);
                continue;
            }
            if let Err(e) = resource.unload(ctx) {
                warn!(target: "resource", "Unloading '{}' failed: {}", key, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// `true` if every registered resource is loaded.
    pub fn is_all_ready(&self) -> bool {
        self.entries.values().all(|r| r.is_ready())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

//=== Helpers =============================================================

fn mismatch<T>(key: &str, found: &'static str) -> ResourceError {
    ResourceError::TypeMismatch {
        key: key.to_owned(),
        expected: short_type_name::<T>(),
        found: strip_path(found),
    }
}

fn short_type_name<T>() -> &'static str {
    strip_path(std::any::type_name::<T>())
}

fn strip_path(name: &'static str) -> &'static str {
    name.rsplit("::").next().unwrap_or(name)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resource::{Image, Texture};
    use crate::core::{Color, WindowConfig};

    use std::cell::Cell;
    use std::rc::Rc;

    //--- Test Resource ----------------------------------------------------

    /// Counts unload calls through a shared cell.
    #[derive(Default)]
    struct Probe {
        ready: bool,
        unloads: Rc<Cell<u32>>,
    }

    impl Probe {
        fn loaded(unloads: &Rc<Cell<u32>>) -> Self {
            Self { ready: true, unloads: Rc::clone(unloads) }
        }
    }

    impl Resource for Probe {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn unload(&mut self, _ctx: &mut Context) -> Result<(), ResourceError> {
            if !self.ready {
                return Err(ResourceError::NotReady("Probe"));
            }
            self.ready = false;
            self.unloads.set(self.unloads.get() + 1);
            Ok(())
        }
    }

    fn ctx() -> Context {
        Context::headless(WindowConfig::default())
    }

    //=====================================================================
    // Registration & Lookup
    //=====================================================================

    #[test]
    fn init_then_get_returns_same_instance() {
        let mut ctx = ctx();
        let mut resources = ResourceManager::new();

        let image = Image::gen_color(4, 4, Color::WHITE);
        let created: *const Texture = {
            let texture = resources.init::<Texture>("cat").unwrap();
            texture.load_from_image(&image, &mut ctx).unwrap();
            texture
        };

        let fetched = resources.get::<Texture>("cat").unwrap();
        assert!(std::ptr::eq(created, fetched));
        assert!(fetched.is_ready());
    }

    #[test]
    fn init_duplicate_key_fails() {
        let mut resources = ResourceManager::new();
        resources.init::<Probe>("a").unwrap();

        assert_eq!(
            resources.init::<Probe>("a").err(),
            Some(ResourceError::DuplicateKey("a".into()))
        );
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn get_absent_key_is_not_found() {
        let resources = ResourceManager::new();
        assert_eq!(
            resources.get::<Probe>("ghost").err(),
            Some(ResourceError::NotFound("ghost".into()))
        );
    }

    #[test]
    fn get_with_wrong_type_is_mismatch() {
        let mut resources = ResourceManager::new();
        resources.init::<Probe>("cat").unwrap();

        match resources.get::<Texture>("cat") {
            Err(ResourceError::TypeMismatch { key, expected, found }) => {
                assert_eq!(key, "cat");
                assert_eq!(expected, "Texture");
                assert_eq!(found, "Probe");
            }
            other => panic!("expected TypeMismatch, got {:?}", other.map(|_| ())),
        }
    }

    //=====================================================================
    // Unloading
    //=====================================================================

    #[test]
    fn unload_then_get_is_not_found() {
        let mut ctx = ctx();
        let mut resources = ResourceManager::new();
        let image = Image::gen_color(2, 2, Color::RED);
        resources.init::<Texture>("cat").unwrap().load_from_image(&image, &mut ctx).unwrap();
        assert_eq!(ctx.graphics.texture_count(), 1);

        resources.unload("cat", &mut ctx).unwrap();

        assert_eq!(ctx.graphics.texture_count(), 0);
        assert_eq!(
            resources.get::<Texture>("cat").err(),
            Some(ResourceError::NotFound("cat".into()))
        );
    }

    #[test]
    fn unload_absent_key_is_not_found() {
        let mut ctx = ctx();
        let mut resources = ResourceManager::new();
        assert_eq!(
            resources.unload("ghost", &mut ctx),
            Err(ResourceError::NotFound("ghost".into()))
        );
    }

    #[test]
    fn unload_all_unloads_each_once_and_clears() {
        let mut ctx = ctx();
        let unloads = Rc::new(Cell::new(0));
        let mut resources = ResourceManager::new();
        resources.insert("a", Probe::loaded(&unloads)).unwrap();
        resources.insert("b", Probe::loaded(&unloads)).unwrap();

        resources.unload_all(&mut ctx).unwrap();
        assert_eq!(unloads.get(), 2);
        assert!(resources.is_empty());

        resources.unload_all(&mut ctx).unwrap();
        assert_eq!(unloads.get(), 2);
        assert!(resources.is_empty());
    }

    #[test]
    fn unload_all_skips_never_loaded_entries() {
        let mut ctx = ctx();
        let unloads = Rc::new(Cell::new(0));
        let mut resources = ResourceManager::new();
        resources.insert("loaded", Probe::loaded(&unloads)).unwrap();
        resources.init::<Probe>("pending").unwrap();

        assert!(!resources.is_all_ready());
        resources.unload_all(&mut ctx).unwrap();

        assert_eq!(unloads.get(), 1);
        assert!(resources.is_empty());
    }

    #[test]
    fn keys_and_contains() {
        let mut resources = ResourceManager::new();
        resources.init::<Probe>("x").unwrap();

        assert!(resources.contains("x"));
        assert!(!resources.contains("y"));
        assert_eq!(resources.keys().collect::<Vec<_>>(), vec!["x"]);
    }
}
