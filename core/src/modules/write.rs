//! Write Step
//!
//! Types text onto the surface one character per tick.

use std::collections::VecDeque;

use crate::clock::SharedClock;
use crate::config::TypewriterConfig;
use crate::signal::ModuleKind;
use crate::surface::{SharedSurface, Surface, SurfaceError};

use super::animation::{AnimationModule, TickHandler};

/// Tick handler that appends one character per tick.
pub struct WriteHandler {
    text: String,
    buffer: VecDeque<char>,
}

impl WriteHandler {
    /// Handler that will type out `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buffer: VecDeque::new(),
        }
    }
}

impl TickHandler for WriteHandler {
    fn init(&mut self, _surface: &mut dyn Surface) {
        self.buffer = self.text.chars().collect();
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        let Some(ch) = self.buffer.pop_front() else {
            return Ok(());
        };
        let mut text = surface.text();
        text.push(ch);
        surface.set_text(text)
    }

    fn should_continue(&self) -> bool {
        !self.buffer.is_empty()
    }
}

/// Animated step that types text onto the surface.
pub type WriteModule = AnimationModule<WriteHandler>;

impl WriteModule {
    /// Build a write step.
    pub fn write(
        text: impl Into<String>,
        surface: SharedSurface,
        clock: SharedClock,
        config: TypewriterConfig,
    ) -> Self {
        Self::with_handler(ModuleKind::Write, WriteHandler::new(text), surface, clock, config)
    }
}
