//! Delete Step
//!
//! One-shot truncation: removes a fixed number of trailing characters in a
//! single mutation on the next frame, with no per-character animation. Not
//! pausable - a pause request while it is in flight has no observable
//! effect, the step always runs to completion.

use async_trait::async_trait;

use super::Module;
use crate::clock::SharedClock;
use crate::config::TypewriterConfig;
use crate::error::TypewriterError;
use crate::signal::{CompletionSignal, ModuleKind};
use crate::surface::SharedSurface;

/// Non-animated step that truncates the surface text in one go.
pub struct DeleteModule {
    count: usize,
    surface: SharedSurface,
    clock: SharedClock,
    config: TypewriterConfig,
}

impl DeleteModule {
    /// Build a delete step removing `count` trailing characters.
    pub fn new(
        count: usize,
        surface: SharedSurface,
        clock: SharedClock,
        config: TypewriterConfig,
    ) -> Self {
        Self {
            count,
            surface,
            clock,
            config,
        }
    }
}

#[async_trait]
impl Module for DeleteModule {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Delete
    }

    async fn action(&mut self) -> Result<CompletionSignal, TypewriterError> {
        if self.config.debug {
            CompletionSignal::began(ModuleKind::Delete).emit();
        }

        self.clock.next_frame().await;

        {
            let mut surface = self.surface.lock();
            let text = surface.text();
            let keep = text.chars().count().saturating_sub(self.count);
            let truncated: String = text.chars().take(keep).collect();
            surface
                .set_text(truncated)
                .map_err(TypewriterError::Surface)?;
        }

        Ok(CompletionSignal::done(ModuleKind::Delete))
    }
}
