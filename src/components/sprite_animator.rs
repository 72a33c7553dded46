//=========================================================================
// Sprite Animator
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use super::Sprite;

//=== SpriteAnimator ======================================================

/// Cycles a sprite through a sequence of sheet frames at a fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAnimator {
    frames: Vec<usize>,
    frames_per_second: f32,
    pub reversed: bool,
    position: usize,
    elapsed: f32,
}

impl SpriteAnimator {
    /// # Panics
    ///
    /// Panics if `frames` is empty or `frames_per_second` is not positive.
    pub fn new(frames: Vec<usize>, frames_per_second: f32) -> Self {
        assert!(!frames.is_empty(), "Animation needs at least one frame");
        assert!(
            frames_per_second > 0.0,
            "Frames per second must be positive, got {}",
            frames_per_second
        );

        Self {
            frames,
            frames_per_second,
            reversed: false,
            position: 0,
            elapsed: 0.0,
        }
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Advances by `delta` seconds and writes the current frame into
    /// `sprite`. Wraps at both ends of the sequence.
    pub fn update(&mut self, delta: f32, sprite: &mut Sprite) {
        let period = 1.0 / self.frames_per_second;
        if delta.is_finite() {
            self.elapsed += delta.max(0.0);
        }

        if self.elapsed >= period {
            let len = self.frames.len();
            let steps = ((self.elapsed / period).floor() % len as f32) as usize % len;
            self.elapsed %= period;
            self.position = if self.reversed {
                (self.position + len - steps) % len
            } else {
                (self.position + steps) % len
            };
        }

        sprite.frame_index = self.frames[self.position];
    }

    /// Sheet frame currently shown.
    pub fn current_frame(&self) -> usize {
        self.frames[self.position]
    }

    /// Back to the first frame of the sequence.
    pub fn reset(&mut self) {
        self.position = 0;
        self.elapsed = 0.0;
    }
}

//=== SpriteAnimatorController ============================================

/// Named animations of which exactly one plays at a time.
#[derive(Debug, Clone)]
pub struct SpriteAnimatorController {
    animations: HashMap<String, SpriteAnimator>,
    playing: String,
}

impl SpriteAnimatorController {
    pub fn new(name: impl Into<String>, animation: SpriteAnimator) -> Self {
        let name = name.into();
        let mut animations = HashMap::new();
        animations.insert(name.clone(), animation);
        Self { animations, playing: name }
    }

    pub fn with_animation(mut self, name: impl Into<String>, animation: SpriteAnimator) -> Self {
        self.animations.insert(name.into(), animation);
        self
    }

    /// Switches to `name` from its first frame. Unknown names are ignored
    /// and return `false`.
    pub fn play(&mut self, name: &str) -> bool {
        if self.playing == name {
            return true;
        }
        match self.animations.get_mut(name) {
            Some(animation) => {
                animation.reset();
                self.playing = name.to_owned();
                true
            }
            None => {
                warn!(target: "scene", "Unknown animation '{}'", name);
                false
            }
        }
    }

    pub fn playing(&self) -> &str {
        &self.playing
    }

    pub fn update(&mut self, delta: f32, sprite: &mut Sprite) {
        if let Some(animation) = self.animations.get_mut(&self.playing) {
            animation.update(delta, sprite);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
