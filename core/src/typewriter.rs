//! Typewriter Scheduler
//!
//! The scheduler owns the ordered step list and a single active-step cursor,
//! and drives one module at a time: dispatch `steps[cursor]`, await its
//! `action()`, react to the completion signal, wait one frame, dispatch the
//! next. One step is dispatched per completed-module resolution, not per
//! frame.
//!
//! # Normalization
//!
//! Before the first dispatch, [`init()`](Typewriter::init) rewrites the raw
//! step list so every animated step that is not already followed by a sleep
//! gets one frame of spacing after it; the end of the list gets a
//! repeat-boundary sleep when `repeat` is on. The pass is idempotent -
//! running it over its own output inserts nothing new.
//!
//! # Control
//!
//! The drive loop holds `&mut self`, so live control travels through a
//! cloneable [`TypewriterHandle`] backed by the same control block: pause
//! and resume delegate to the current module's gate iff it is pausable,
//! `stop` restores the originally captured surface text on the next frame,
//! and `restart` sends the cursor back to the top. A step that resolves
//! `Paused` parks the loop at that step; resuming dispatches the same module
//! again and its gate latch makes the re-entry skip initialization.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::clock::{FixedRateClock, SharedClock};
use crate::config::{StepOptions, TypewriterConfig};
use crate::error::TypewriterError;
use crate::modules::{
    BackspaceModule, DeleteModule, FrameSleepModule, Module, PauseGate, TimedSleepModule,
    WriteModule,
};
use crate::signal::{ModuleKind, SignalKind};
use crate::surface::SharedSurface;

/// The step currently dispatched, as seen by control handles.
struct CurrentStep {
    kind: ModuleKind,
    gate: Option<PauseGate>,
}

/// Control block shared between the drive loop and its handles.
struct ControlShared {
    cursor: AtomicUsize,
    stop: AtomicBool,
    current: Mutex<Option<CurrentStep>>,
    resume: Notify,
}

impl ControlShared {
    fn new() -> Self {
        Self {
            cursor: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
            current: Mutex::new(None),
            resume: Notify::new(),
        }
    }

    fn take_stop(&self) -> bool {
        self.stop.swap(false, Ordering::SeqCst)
    }
}

/// Cloneable control handle for a running effect.
///
/// All methods are synchronous and safe to call from any task; they act on
/// the step currently in flight and are no-ops when nothing applies.
#[derive(Clone)]
pub struct TypewriterHandle {
    shared: Arc<ControlShared>,
}

impl TypewriterHandle {
    /// Pause the current step, iff it is pausable.
    ///
    /// Animated steps yield at their next frame boundary; a timed sleep
    /// cancels its timer immediately. Non-pausable steps run to completion.
    pub fn pause(&self) {
        if let Some(current) = self.shared.current.lock().as_ref() {
            if let Some(gate) = &current.gate {
                gate.pause();
            }
        }
    }

    /// Resume a paused step; the drive loop dispatches it again.
    pub fn resume(&self) {
        let resumed = {
            let current = self.shared.current.lock();
            match current.as_ref().and_then(|c| c.gate.as_ref()) {
                Some(gate) if gate.is_paused() => {
                    gate.resume();
                    true
                }
                _ => false,
            }
        };
        if resumed {
            self.shared.resume.notify_one();
        }
    }

    /// Halt the effect and restore the surface's original text on the next
    /// frame boundary.
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::SeqCst);
        self.pause();
        self.shared.resume.notify_one();
    }

    /// Send the cursor back to the first step.
    ///
    /// A paused step is reset (not resumed), so it re-runs from scratch when
    /// the cursor reaches it again. Does not re-normalize the step list.
    pub fn restart(&self) {
        self.shared.cursor.store(0, Ordering::SeqCst);
        let was_paused = {
            let current = self.shared.current.lock();
            match current.as_ref().and_then(|c| c.gate.as_ref()) {
                Some(gate) if gate.is_paused() => {
                    gate.reset();
                    true
                }
                _ => false,
            }
        };
        if was_paused {
            self.shared.resume.notify_one();
        }
    }

    /// The kind of the step currently in flight, if any.
    #[must_use]
    pub fn current(&self) -> Option<ModuleKind> {
        self.shared.current.lock().as_ref().map(|c| c.kind)
    }

    /// Whether the current step is sitting paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.shared
            .current
            .lock()
            .as_ref()
            .and_then(|c| c.gate.as_ref())
            .is_some_and(PauseGate::is_paused)
    }
}

/// The typewriter effect scheduler.
///
/// Script an effect with the fluent builders, then [`start()`](Self::start)
/// it. The drive loop runs until the step list is exhausted (forever when
/// `repeat` is on), so hosts that want live control spawn it and keep a
/// [`TypewriterHandle`].
///
/// ```no_run
/// # use typewriter_core::{Typewriter, TypewriterConfig, StepOptions};
/// # use typewriter_core::surface::{shared_surface, BufferSurface};
/// # async fn demo() -> Result<(), typewriter_core::TypewriterError> {
/// let surface = shared_surface(BufferSurface::new());
/// let mut tw = Typewriter::new(surface, TypewriterConfig::default());
/// tw.write("Hobbest")
///     .sleep(1500)
///     .rewrite_opts(3, "ies, Interests & Activities", StepOptions::new().with_sleep_ms(3500))
///     .delete(31);
/// tw.start().await?;
/// # Ok(())
/// # }
/// ```
pub struct Typewriter {
    surface: SharedSurface,
    clock: SharedClock,
    config: TypewriterConfig,
    /// Surface text at construction; `stop()` restores it
    initial_text: String,
    steps: Vec<Box<dyn Module>>,
    shared: Arc<ControlShared>,
}

impl Typewriter {
    /// Create a scheduler over a surface with a default 60 fps frame clock.
    #[must_use]
    pub fn new(surface: SharedSurface, config: TypewriterConfig) -> Self {
        Self::with_clock(surface, Arc::new(FixedRateClock::default()), config)
    }

    /// Create a scheduler with an explicit frame clock.
    #[must_use]
    pub fn with_clock(surface: SharedSurface, clock: SharedClock, config: TypewriterConfig) -> Self {
        let initial_text = surface.lock().text();
        Self {
            surface,
            clock,
            config,
            initial_text,
            steps: Vec::new(),
            shared: Arc::new(ControlShared::new()),
        }
    }

    /// A control handle usable from other tasks.
    #[must_use]
    pub fn handle(&self) -> TypewriterHandle {
        TypewriterHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    /// Type `text` onto the surface.
    pub fn write(&mut self, text: impl Into<String>) -> &mut Self {
        self.write_opts(text, StepOptions::default())
    }

    /// Type `text` onto the surface, with per-call overrides.
    ///
    /// When the merged `sleep_ms` is positive a trailing timed sleep is
    /// appended.
    pub fn write_opts(&mut self, text: impl Into<String>, options: StepOptions) -> &mut Self {
        let config = self.config.merged(&options);
        self.push(Box::new(WriteModule::write(
            text,
            Arc::clone(&self.surface),
            Arc::clone(&self.clock),
            config,
        )));
        self.push_trailing_sleep(config.sleep_ms, config);
        self
    }

    /// Backspace `count` characters, then type `text`.
    pub fn rewrite(&mut self, count: usize, text: impl Into<String>) -> &mut Self {
        self.rewrite_opts(count, text, StepOptions::default())
    }

    /// Backspace `count` characters, then type `text`, with per-call
    /// overrides.
    ///
    /// The merged `sleep_rewrite_ms` separates the two halves; the merged
    /// `sleep_ms` trails the write.
    pub fn rewrite_opts(
        &mut self,
        count: usize,
        text: impl Into<String>,
        options: StepOptions,
    ) -> &mut Self {
        let config = self.config.merged(&options);
        self.push(Box::new(BackspaceModule::backspace(
            count,
            Arc::clone(&self.surface),
            Arc::clone(&self.clock),
            config,
        )));
        self.push_trailing_sleep(config.sleep_rewrite_ms, config);
        self.push(Box::new(WriteModule::write(
            text,
            Arc::clone(&self.surface),
            Arc::clone(&self.clock),
            config,
        )));
        self.push_trailing_sleep(config.sleep_ms, config);
        self
    }

    /// Backspace `count` characters.
    pub fn backspace(&mut self, count: usize) -> &mut Self {
        self.backspace_opts(count, StepOptions::default())
    }

    /// Backspace `count` characters, with per-call overrides.
    pub fn backspace_opts(&mut self, count: usize, options: StepOptions) -> &mut Self {
        let config = self.config.merged(&options);
        self.push(Box::new(BackspaceModule::backspace(
            count,
            Arc::clone(&self.surface),
            Arc::clone(&self.clock),
            config,
        )));
        self.push_trailing_sleep(config.sleep_ms, config);
        self
    }

    /// Truncate `count` characters in one non-animated step.
    pub fn delete(&mut self, count: usize) -> &mut Self {
        self.delete_opts(count, StepOptions::default())
    }

    /// Truncate `count` characters in one non-animated step, with per-call
    /// overrides.
    pub fn delete_opts(&mut self, count: usize, options: StepOptions) -> &mut Self {
        let config = self.config.merged(&options);
        self.push(Box::new(DeleteModule::new(
            count,
            Arc::clone(&self.surface),
            Arc::clone(&self.clock),
            config,
        )));
        self.push_trailing_sleep(config.sleep_ms, config);
        self
    }

    /// Sleep for `ms` milliseconds.
    pub fn sleep(&mut self, ms: u64) -> &mut Self {
        self.push(Box::new(TimedSleepModule::from_millis(
            ms,
            Arc::clone(&self.clock),
            self.config,
        )));
        self
    }

    /// Append a caller-supplied step.
    ///
    /// Custom kinds are scheduled verbatim: normalization neither inserts
    /// spacing after them nor treats them as spacing for their predecessor.
    pub fn step(&mut self, module: Box<dyn Module>) -> &mut Self {
        self.push(module);
        self
    }

    fn push(&mut self, module: Box<dyn Module>) {
        self.steps.push(module);
    }

    fn push_trailing_sleep(&mut self, ms: u64, config: TypewriterConfig) {
        if ms > 0 {
            self.push(Box::new(TimedSleepModule::from_millis(
                ms,
                Arc::clone(&self.clock),
                config,
            )));
        }
    }

    // ------------------------------------------------------------------
    // Normalization
    // ------------------------------------------------------------------

    /// Normalize the step list and reset the cursor.
    ///
    /// Every animated step that is not the structural end of the list and is
    /// not already followed by a sleep gets a one-frame sleep after it. When
    /// the final step is animated and `repeat` is on, the boundary gets a
    /// timed sleep of `sleep_before_repeat_ms` when positive, else one
    /// frame. Idempotent.
    pub fn init(&mut self) {
        let kinds: Vec<ModuleKind> = self.steps.iter().map(|s| s.kind()).collect();
        let len = kinds.len();
        let old = std::mem::take(&mut self.steps);
        let mut steps: Vec<Box<dyn Module>> = Vec::with_capacity(len * 2);

        for (i, step) in old.into_iter().enumerate() {
            steps.push(step);
            if !kinds[i].is_animation() {
                continue;
            }
            if kinds.get(i + 1).is_some_and(|k| k.is_sleep()) {
                continue;
            }
            if i + 1 != len {
                steps.push(self.frame_sleep());
            } else if self.config.repeat {
                if self.config.sleep_before_repeat_ms > 0 {
                    steps.push(Box::new(TimedSleepModule::from_millis(
                        self.config.sleep_before_repeat_ms,
                        Arc::clone(&self.clock),
                        self.config,
                    )));
                } else {
                    steps.push(self.frame_sleep());
                }
            }
        }

        self.steps = steps;
        self.shared.cursor.store(0, Ordering::SeqCst);
        self.shared.stop.store(false, Ordering::SeqCst);
    }

    fn frame_sleep(&self) -> Box<dyn Module> {
        Box::new(FrameSleepModule::new(Arc::clone(&self.clock), self.config))
    }

    /// The kinds of the scheduled steps, in execution order.
    #[must_use]
    pub fn step_kinds(&self) -> Vec<ModuleKind> {
        self.steps.iter().map(|s| s.kind()).collect()
    }

    // ------------------------------------------------------------------
    // Drive loop
    // ------------------------------------------------------------------

    /// Normalize, then drive the effect to completion.
    ///
    /// With `repeat` on this only returns on [`stop`](TypewriterHandle::stop)
    /// or error.
    ///
    /// # Errors
    ///
    /// Propagates surface mutation failures.
    pub async fn start(&mut self) -> Result<(), TypewriterError> {
        self.init();
        self.drive().await
    }

    /// Re-drive from the first step without re-normalizing.
    ///
    /// # Errors
    ///
    /// Propagates surface mutation failures.
    pub async fn restart(&mut self) -> Result<(), TypewriterError> {
        self.shared.cursor.store(0, Ordering::SeqCst);
        self.shared.stop.store(false, Ordering::SeqCst);
        self.drive().await
    }

    async fn drive(&mut self) -> Result<(), TypewriterError> {
        let result = self.drive_inner().await;
        *self.shared.current.lock() = None;
        result
    }

    async fn drive_inner(&mut self) -> Result<(), TypewriterError> {
        let shared = Arc::clone(&self.shared);
        loop {
            if shared.take_stop() {
                self.restore_initial().await?;
                return Ok(());
            }

            let idx = shared.cursor.load(Ordering::SeqCst);
            if idx >= self.steps.len() {
                if self.config.repeat && !self.steps.is_empty() {
                    shared.cursor.store(0, Ordering::SeqCst);
                    continue;
                }
                return Ok(());
            }
            shared.cursor.store(idx + 1, Ordering::SeqCst);

            let step = &mut self.steps[idx];
            *shared.current.lock() = Some(CurrentStep {
                kind: step.kind(),
                gate: step.pause_gate().cloned(),
            });

            let signal = step.action().await?;
            match signal.kind() {
                SignalKind::Done => {
                    if self.config.debug {
                        signal.emit();
                    }
                    self.clock.next_frame().await;
                }
                SignalKind::Paused => {
                    // Halt at this step; resume dispatches it again
                    shared.cursor.store(idx, Ordering::SeqCst);
                    if shared.take_stop() {
                        self.restore_initial().await?;
                        return Ok(());
                    }
                    shared.resume.notified().await;
                    if shared.take_stop() {
                        self.restore_initial().await?;
                        return Ok(());
                    }
                }
                // Actions never resolve with progress signals; treat one
                // like a completed step rather than dropping the queue
                SignalKind::Began | SignalKind::Tick => {
                    self.clock.next_frame().await;
                }
            }
        }
    }

    async fn restore_initial(&self) -> Result<(), TypewriterError> {
        self.clock.next_frame().await;
        self.surface
            .lock()
            .set_text(self.initial_text.clone())
            .map_err(TypewriterError::Surface)
    }

    // ------------------------------------------------------------------
    // Control (mirrors the handle)
    // ------------------------------------------------------------------

    /// Pause the current step, iff it is pausable.
    pub fn pause(&self) {
        self.handle().pause();
    }

    /// Resume a paused step.
    pub fn resume(&self) {
        self.handle().resume();
    }

    /// Halt and restore the original surface text.
    pub fn stop(&self) {
        self.handle().stop();
    }

    /// The kind of the step currently in flight, if any.
    #[must_use]
    pub fn current(&self) -> Option<ModuleKind> {
        self.handle().current()
    }
}
