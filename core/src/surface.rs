//! Target Surface Abstraction
//!
//! The engine mutates exactly one text-bearing surface and depends on
//! nothing else about it - no layout, no styling, no events. Any renderer
//! (a terminal cell, a GUI label, a web element) participates by
//! implementing [`Surface`]. The engine itself ships only [`BufferSurface`],
//! an in-memory implementation used for headless operation and tests.
//!
//! # Sharing
//!
//! The surface is shared between the scheduler and whichever step module is
//! currently in flight, so it travels as `Arc<Mutex<dyn Surface>>`. Mutation
//! rights belong exclusively to the current module; the scheduler itself
//! only writes the surface when `stop()` restores the original text.

use std::sync::Arc;

use parking_lot::Mutex;

/// Error type for surface mutations.
///
/// Surfaces are external collaborators with their own failure modes (a
/// detached terminal, a closed window); the engine propagates whatever they
/// report without interpreting it.
pub type SurfaceError = Box<dyn std::error::Error + Send + Sync>;

/// A text-bearing visual surface.
pub trait Surface: Send {
    /// Current text content.
    fn text(&self) -> String;

    /// Replace the text content.
    ///
    /// # Errors
    ///
    /// Whatever the concrete surface reports; the engine halts the effect
    /// on the first failure.
    fn set_text(&mut self, text: String) -> Result<(), SurfaceError>;
}

/// Shared handle to the target surface.
pub type SharedSurface = Arc<Mutex<dyn Surface>>;

/// Wrap a concrete surface for use with the engine.
pub fn shared_surface<S: Surface + 'static>(surface: S) -> SharedSurface {
    Arc::new(Mutex::new(surface))
}

/// In-memory surface for headless operation and tests.
#[derive(Clone, Debug, Default)]
pub struct BufferSurface {
    text: String,
}

impl BufferSurface {
    /// Create an empty buffer surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer surface with initial text.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Surface for BufferSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) -> Result<(), SurfaceError> {
        self.text = text;
        Ok(())
    }
}
