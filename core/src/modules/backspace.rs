//! Backspace Step
//!
//! Removes characters from the end of the surface one per tick, like holding
//! down backspace.

use crate::clock::SharedClock;
use crate::config::TypewriterConfig;
use crate::signal::ModuleKind;
use crate::surface::{SharedSurface, Surface, SurfaceError};

use super::animation::{AnimationModule, TickHandler};

/// Tick handler that removes one trailing character per tick.
pub struct BackspaceHandler {
    count: usize,
    chars: Vec<char>,
    remaining: usize,
}

impl BackspaceHandler {
    /// Handler that will remove `count` trailing characters.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            chars: Vec::new(),
            remaining: 0,
        }
    }
}

impl TickHandler for BackspaceHandler {
    fn init(&mut self, surface: &mut dyn Surface) {
        self.chars = surface.text().chars().collect();
        self.remaining = self.count;
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        // Removing more than the text holds saturates to empty
        self.chars.pop();
        self.remaining = self.remaining.saturating_sub(1);
        surface.set_text(self.chars.iter().collect())
    }

    fn should_continue(&self) -> bool {
        self.remaining > 0
    }
}

/// Animated step that deletes trailing characters one at a time.
pub type BackspaceModule = AnimationModule<BackspaceHandler>;

impl BackspaceModule {
    /// Build a backspace step.
    pub fn backspace(
        count: usize,
        surface: SharedSurface,
        clock: SharedClock,
        config: TypewriterConfig,
    ) -> Self {
        Self::with_handler(
            ModuleKind::Backspace,
            BackspaceHandler::new(count),
            surface,
            clock,
            config,
        )
    }
}
