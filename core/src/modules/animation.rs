//! Per-Tick Animation Engine
//!
//! [`AnimationModule`] is the generic driver behind every animated step: it
//! runs a [`TickHandler`]'s init/tick/continue triple on the frame clock
//! with a randomized inter-tick delay. Separating the per-frame wake from
//! the per-delay tick keeps the animation frame-synced while the logical
//! delay budget stays independent of the frame rate.
//!
//! # Pause re-entry
//!
//! A pause request is checked at the start of each frame callback, before
//! any tick work, so it takes effect on a frame boundary rather than
//! mid-tick. Resuming re-invokes `action()`; the gate's resumed latch tells
//! the new run to skip `init` and continue with the handler state left by
//! the interrupted one.

use async_trait::async_trait;
use rand::Rng;
use tokio::time::Instant;

use super::{Module, PauseGate};
use crate::clock::SharedClock;
use crate::config::TypewriterConfig;
use crate::error::TypewriterError;
use crate::signal::{CompletionSignal, ModuleKind};
use crate::surface::{SharedSurface, Surface, SurfaceError};

/// The capability triple a tick-driven animation supplies.
///
/// The dynamic original looked these up on a handler record at runtime and
/// raised when one was missing; here absence is a compile error, which is
/// the strict-contract check done properly.
pub trait TickHandler: Send + Sync {
    /// Prepare per-run state. Called once per run, not on resume.
    fn init(&mut self, surface: &mut dyn Surface);

    /// Perform one discrete mutation of the surface.
    ///
    /// # Errors
    ///
    /// Propagates surface mutation failures.
    fn tick(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError>;

    /// Whether another tick is still owed.
    fn should_continue(&self) -> bool;
}

/// Generic frame-synced animation step.
pub struct AnimationModule<H> {
    handler: H,
    kind: ModuleKind,
    surface: SharedSurface,
    clock: SharedClock,
    config: TypewriterConfig,
    gate: PauseGate,
    /// Current jitter offset in milliseconds
    salt: f64,
    /// Start of the current run; the first tick is measured from here
    origin: Option<Instant>,
    /// Timestamp of the most recent tick
    last_tick: Option<Instant>,
}

impl<H: TickHandler> AnimationModule<H> {
    /// Build an animation step around a handler.
    pub fn with_handler(
        kind: ModuleKind,
        handler: H,
        surface: SharedSurface,
        clock: SharedClock,
        config: TypewriterConfig,
    ) -> Self {
        Self {
            handler,
            kind,
            surface,
            clock,
            config,
            gate: PauseGate::new(),
            salt: 0.0,
            origin: None,
            last_tick: None,
        }
    }

    /// Draw a fresh jitter offset in `[-fluctuation, +fluctuation]` ms.
    fn draw_salt(&self) -> f64 {
        jitter(self.config.fluctuation_ms)
    }

    async fn animate(&mut self) -> Result<CompletionSignal, TypewriterError> {
        // On re-entry the handler and tick state of the interrupted run are
        // kept; only a fresh run initializes.
        if !self.gate.take_resumed() {
            {
                let mut surface = self.surface.lock();
                self.handler.init(&mut *surface);
            }
            self.origin = Some(self.clock.now());
            self.last_tick = None;
            // The first interval never undershoots the nominal delay
            self.salt = self.draw_salt().max(0.0);
        }

        if self.config.debug {
            CompletionSignal::began(self.kind).emit();
        }

        let delay_ms = self.config.delay_ms as f64;
        loop {
            let now = self.clock.next_frame().await;

            if self.gate.is_paused() {
                let signal = CompletionSignal::paused(self.kind);
                if self.config.debug {
                    signal.emit();
                }
                return Ok(signal);
            }

            let since = self.last_tick.or(self.origin).unwrap_or(now);
            let elapsed_ms = now.saturating_duration_since(since).as_secs_f64() * 1000.0;

            if elapsed_ms >= delay_ms + self.salt {
                {
                    let mut surface = self.surface.lock();
                    self.handler
                        .tick(&mut *surface)
                        .map_err(TypewriterError::Surface)?;
                }
                if self.config.debug {
                    CompletionSignal::tick(self.kind).emit();
                }
                self.salt = self.draw_salt();
                self.last_tick = Some(now);
            }

            if !self.handler.should_continue() {
                // A pause/resume blip that never reached a frame boundary
                // must not leak its latch into the next run
                self.gate.reset();
                return Ok(CompletionSignal::done(self.kind));
            }
        }
    }
}

/// Jitter offset in `[-fluctuation, +fluctuation]` ms; exactly 0 when the
/// bound is 0.
fn jitter(fluctuation_ms: u64) -> f64 {
    if fluctuation_ms == 0 {
        return 0.0;
    }
    let bound = fluctuation_ms as f64;
    rand::thread_rng().gen_range(-bound..=bound)
}

#[async_trait]
impl<H: TickHandler> Module for AnimationModule<H> {
    fn kind(&self) -> ModuleKind {
        self.kind
    }

    async fn action(&mut self) -> Result<CompletionSignal, TypewriterError> {
        self.animate().await
    }

    fn pause_gate(&self) -> Option<&PauseGate> {
        Some(&self.gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedRateClock;
    use crate::signal::SignalKind;
    use crate::surface::{shared_surface, BufferSurface};
    use std::sync::Arc;
    use std::time::Duration;

    /// Counts its ticks and stops after a fixed number.
    struct CountingHandler {
        inits: u32,
        ticks: u32,
        budget: u32,
    }

    impl TickHandler for CountingHandler {
        fn init(&mut self, _surface: &mut dyn Surface) {
            self.inits += 1;
            self.ticks = 0;
        }

        fn tick(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
            self.ticks += 1;
            surface.set_text(format!("tick {}", self.ticks))
        }

        fn should_continue(&self) -> bool {
            self.ticks < self.budget
        }
    }

    fn module(budget: u32, config: TypewriterConfig) -> AnimationModule<CountingHandler> {
        AnimationModule::with_handler(
            ModuleKind::Custom("counting"),
            CountingHandler { inits: 0, ticks: 0, budget },
            shared_surface(BufferSurface::new()),
            Arc::new(FixedRateClock::new(Duration::from_millis(1))),
            config,
        )
    }

    #[test]
    fn test_jitter_zero_fluctuation() {
        assert_eq!(jitter(0), 0.0);
    }

    #[test]
    fn test_jitter_bounded() {
        for _ in 0..100 {
            let salt = jitter(50);
            assert!((-50.0..=50.0).contains(&salt));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_frame_at_zero_delay() {
        let config = TypewriterConfig {
            delay_ms: 0,
            fluctuation_ms: 0,
            ..TypewriterConfig::default()
        };
        let mut module = module(3, config);

        let before = Instant::now();
        let signal = module.action().await.unwrap();
        assert_eq!(signal.kind(), SignalKind::Done);
        assert_eq!(module.handler.ticks, 3);
        // One tick per 1ms frame
        assert_eq!((Instant::now() - before).as_millis(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_at_least_the_delay() {
        let config = TypewriterConfig {
            delay_ms: 100,
            fluctuation_ms: 50,
            ..TypewriterConfig::default()
        };
        let mut module = module(1, config);

        let before = Instant::now();
        module.action().await.unwrap();
        let waited = (Instant::now() - before).as_millis();

        // Within [delay, delay + fluctuation] plus one frame of quantization
        assert!(waited >= 100, "first tick fired after {waited}ms");
        assert!(waited <= 151, "first tick fired after {waited}ms");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_resolves_at_frame_boundary_and_resume_skips_init() {
        let config = TypewriterConfig {
            delay_ms: 0,
            fluctuation_ms: 0,
            ..TypewriterConfig::default()
        };
        let mut module = module(5, config);
        let gate = module.pause_gate().cloned().unwrap();

        {
            let mut action = tokio_test::task::spawn(module.action());
            assert!(action.poll().is_pending());
            // Let at least one frame land
            tokio::time::advance(Duration::from_millis(2)).await;
            assert!(action.poll().is_pending());

            gate.pause();
            tokio::time::advance(Duration::from_millis(1)).await;
            match action.poll() {
                std::task::Poll::Ready(Ok(signal)) => {
                    assert_eq!(signal.kind(), SignalKind::Paused);
                }
                other => panic!("expected paused resolution, got {other:?}"),
            }
        }
        let ticks_at_pause = module.handler.ticks;
        assert!(ticks_at_pause < 5);

        gate.resume();
        let signal = module.action().await.unwrap();
        assert_eq!(signal.kind(), SignalKind::Done);
        assert_eq!(module.handler.ticks, 5);
        // init() ran once for the whole paused-and-resumed run
        assert_eq!(module.handler.inits, 1);
    }
}
