//=========================================================================
// Resources
//=========================================================================
//
// Backend-handle-backed assets and the keyed registry that owns them.
//
// Architecture:
//   ResourceManager
//     └─ entries: HashMap<String, Box<dyn Resource>>
//
//   Image    CPU pixels (no backend handle)
//   Texture  TextureId in Graphics
//   Sound    SoundId in Audio (one-shot)
//   Music    SoundId in Audio (looping stream)
//
// Lifecycle: Default (not ready) → load*() (ready) → unload() (not ready).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::Context;

//=== Module Declarations =================================================

mod image;
mod manager;
mod music;
mod sound;
mod texture;

//=== Public API ==========================================================

pub use self::image::Image;
pub use manager::ResourceManager;
pub use music::Music;
pub use sound::Sound;
pub use texture::Texture;

//=== ResourceError =======================================================

/// Resource loading and registry errors.
///
/// Registry variants (`DuplicateKey`, `NotFound`, `TypeMismatch`) and
/// `NotReady` are contract violations by the caller; the rest report
/// problems with the asset itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// A resource is already registered under this key.
    DuplicateKey(String),

    /// No resource is registered under this key.
    NotFound(String),

    /// The stored resource has a different concrete type.
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Operation requires a loaded resource (kind named in the payload).
    NotReady(&'static str),

    /// The asset file could not be read.
    Io { path: String, message: String },

    /// The asset bytes could not be decoded.
    Decode(String),

    /// A backend handle that does not (or no longer) exist.
    InvalidHandle(String),

    /// Pixel or sample buffer has the wrong length.
    SizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "Resource '{}' is already registered", key),
            Self::NotFound(key) => write!(f, "Resource '{}' not found", key),
            Self::TypeMismatch { key, expected, found } => write!(
                f,
                "Resource '{}' is a {}, not a {}",
                key, found, expected
            ),
            Self::NotReady(kind) => write!(f, "{} is not loaded yet", kind),
            Self::Io { path, message } => write!(f, "Failed to read {}: {}", path, message),
            Self::Decode(message) => write!(f, "Decode error: {}", message),
            Self::InvalidHandle(handle) => write!(f, "Invalid handle: {}", handle),
            Self::SizeMismatch { expected, found } => write!(
                f,
                "Buffer size mismatch: expected {} bytes, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for ResourceError {}

//=== Resource Trait ======================================================

/// Type-erasure helper so the registry can downcast stored resources.
///
/// Blanket-implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// An asset owning at most one backend handle.
///
/// # Contract
///
/// - `is_ready()` is `true` exactly while the handle is valid.
/// - `unload()` releases the handle and must only be called while ready;
///   otherwise it returns [`ResourceError::NotReady`].
///
/// # Example
///
/// ```rust
/// # use pina::prelude::*;
/// # use pina::core::resource::ResourceError;
/// #[derive(Default)]
/// struct Blob {
///     bytes: Option<Vec<u8>>,
/// }
///
/// impl Resource for Blob {
///     fn is_ready(&self) -> bool {
///         self.bytes.is_some()
///     }
///
///     fn unload(&mut self, _ctx: &mut Context) -> Result<(), ResourceError> {
///         self.bytes.take().map(drop).ok_or(ResourceError::NotReady("Blob"))
///     }
/// }
/// ```
pub trait Resource: AsAny {
    /// Whether the backend handle is valid.
    fn is_ready(&self) -> bool;

    /// Releases the backend handle.
    fn unload(&mut self, ctx: &mut Context) -> Result<(), ResourceError>;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ResourceError::NotFound("cat".into()).to_string(),
            "Resource 'cat' not found"
        );
        assert_eq!(
            ResourceError::NotReady("Texture").to_string(),
            "Texture is not loaded yet"
        );
        assert_eq!(
            ResourceError::TypeMismatch {
                key: "cat".into(),
                expected: "Sound",
                found: "Texture"
            }
            .to_string(),
            "Resource 'cat' is a Texture, not a Sound"
        );
    }

    #[test]
    fn resource_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ResourceError>();
    }
}
