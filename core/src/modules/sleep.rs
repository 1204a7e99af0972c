//! Sleep Steps
//!
//! Two flavors of doing nothing:
//!
//! - [`TimedSleepModule`] waits a real-clock duration and is fully pausable.
//!   Pausing cancels the pending timer and banks the portion already slept;
//!   resuming sleeps only the remainder, so the total time *asleep* before
//!   completion always equals the configured duration no matter how long
//!   the pause lasted.
//! - [`FrameSleepModule`] waits exactly one frame. Normalization inserts it
//!   between animated steps for frame stability, and it is deliberately not
//!   pausable - interrupting a single-frame spacer serves nothing.

use std::time::Duration;

use async_trait::async_trait;

use super::{Module, PauseGate};
use crate::clock::SharedClock;
use crate::config::TypewriterConfig;
use crate::error::TypewriterError;
use crate::signal::{CompletionSignal, ModuleKind};

/// Pausable real-clock sleep step.
pub struct TimedSleepModule {
    duration: Duration,
    clock: SharedClock,
    config: TypewriterConfig,
    gate: PauseGate,
    /// Portion already slept across earlier pause/resume rounds
    slept: Duration,
}

impl TimedSleepModule {
    /// Build a sleep step for `ms` milliseconds.
    pub fn from_millis(ms: u64, clock: SharedClock, config: TypewriterConfig) -> Self {
        Self::new(Duration::from_millis(ms), clock, config)
    }

    /// Build a sleep step for an explicit duration.
    pub fn new(duration: Duration, clock: SharedClock, config: TypewriterConfig) -> Self {
        Self {
            duration,
            clock,
            config,
            gate: PauseGate::new(),
            slept: Duration::ZERO,
        }
    }

    /// The configured sleep duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[async_trait]
impl Module for TimedSleepModule {
    fn kind(&self) -> ModuleKind {
        ModuleKind::TimedSleep
    }

    async fn action(&mut self) -> Result<CompletionSignal, TypewriterError> {
        let kind = ModuleKind::TimedSleep;

        if self.gate.take_resumed() {
            if self.slept >= self.duration {
                // Nothing left to sleep; still resolve on a frame boundary
                self.clock.next_frame().await;
                self.gate.reset();
                return Ok(CompletionSignal::done(kind));
            }
        } else {
            self.slept = Duration::ZERO;
        }

        if self.config.debug {
            CompletionSignal::began(kind).emit();
        }

        let remaining = self.duration - self.slept;
        let started = self.clock.now();

        tokio::select! {
            () = tokio::time::sleep(remaining) => {
                self.slept = self.duration;
                // Drop any pause/resume blip that never interrupted the timer
                self.gate.reset();
                Ok(CompletionSignal::done(kind))
            }
            () = self.gate.pause_requested() => {
                // Timer cancelled by drop; bank what was slept this round
                self.slept += self.clock.now().saturating_duration_since(started);
                let signal = CompletionSignal::paused(kind);
                if self.config.debug {
                    signal.emit();
                }
                Ok(signal)
            }
        }
    }

    fn pause_gate(&self) -> Option<&PauseGate> {
        Some(&self.gate)
    }
}

/// Single-frame spacing step; never interrupted.
pub struct FrameSleepModule {
    clock: SharedClock,
    config: TypewriterConfig,
}

impl FrameSleepModule {
    /// Build a one-frame sleep step.
    pub fn new(clock: SharedClock, config: TypewriterConfig) -> Self {
        Self { clock, config }
    }
}

#[async_trait]
impl Module for FrameSleepModule {
    fn kind(&self) -> ModuleKind {
        ModuleKind::FrameSleep
    }

    async fn action(&mut self) -> Result<CompletionSignal, TypewriterError> {
        let kind = ModuleKind::FrameSleep;
        if self.config.debug {
            CompletionSignal::began(kind).emit();
        }
        self.clock.next_frame().await;
        Ok(CompletionSignal::done(kind))
    }
}
