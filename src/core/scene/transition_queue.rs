//=========================================================================
// Transition Queue
//=========================================================================
//
// Scene requests made from inside scene callbacks.
//
// A scene cannot change the manager that is calling it, so it queues the
// request here and the runtime applies the queue once the callback has
// returned.
//
//=========================================================================

//=== Scene Transition ====================================================

/// A deferred scene request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneTransition {
    /// Unload the active scene and activate the named one.
    Change(String),

    /// Unregister the named (inactive) scene.
    Remove(String),
}

//=== Transition Queue ====================================================

/// FIFO of pending scene transitions.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneTransition>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Requests a change to `name` after the current callback.
    pub fn change(&mut self, name: impl Into<String>) {
        self.push(SceneTransition::Change(name.into()));
    }

    /// Requests removal of `name` after the current callback.
    pub fn remove(&mut self, name: impl Into<String>) {
        self.push(SceneTransition::Remove(name.into()));
    }

    pub fn push(&mut self, transition: SceneTransition) {
        self.queue.push(transition);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneTransition> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all transitions, leaving the queue empty.
    ///
    /// Requests pushed while the taken ones are being applied stay queued
    /// for the next processing point.
    pub fn take(&mut self) -> Vec<SceneTransition> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
