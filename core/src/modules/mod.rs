//! Step Modules
//!
//! One schedulable unit of the effect is a module: it holds shared handles
//! to the target surface and the frame clock plus its merged configuration,
//! and exposes a single asynchronous [`action()`](Module::action) the
//! scheduler awaits. The scheduler dispatches at most one module at a time,
//! so a module in flight owns the surface's mutation rights for the length
//! of its run.
//!
//! Pausable modules expose a [`PauseGate`]: a cloneable handle the scheduler
//! keeps for the step currently in flight, so pause/resume requests reach
//! the module without touching the `&mut` borrow its action holds.

mod animation;
mod backspace;
mod delete;
mod sleep;
mod write;

pub use animation::{AnimationModule, TickHandler};
pub use backspace::{BackspaceHandler, BackspaceModule};
pub use delete::DeleteModule;
pub use sleep::{FrameSleepModule, TimedSleepModule};
pub use write::{WriteHandler, WriteModule};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::TypewriterError;
use crate::signal::{CompletionSignal, ModuleKind};

/// One schedulable step of the effect.
#[async_trait]
pub trait Module: Send + Sync {
    /// What kind of step this is; drives normalization and logging.
    fn kind(&self) -> ModuleKind;

    /// Run the step to its next resolution.
    ///
    /// Resolves exactly once per call, with `Done` on normal completion or
    /// `Paused` when a pause request was observed. The scheduler calls this
    /// once per run, and again only after a resume - a module distinguishes
    /// the two through its gate's resumed latch.
    ///
    /// # Errors
    ///
    /// Propagates surface mutation failures.
    async fn action(&mut self) -> Result<CompletionSignal, TypewriterError>;

    /// The pause gate, for modules that support pause/resume.
    ///
    /// Returning `None` makes pause and resume no-ops for this step; the
    /// scheduler lets it run to completion.
    fn pause_gate(&self) -> Option<&PauseGate> {
        None
    }
}

/// Pause/resume state shared between a module and the scheduler.
///
/// The `resumed` flag is a one-shot latch: set by [`resume()`](Self::resume),
/// consumed exactly once by the module's next `action()` call through
/// [`take_resumed()`](Self::take_resumed), which is how an action knows to
/// skip its initialization and pick up where it left off.
#[derive(Clone, Debug, Default)]
pub struct PauseGate {
    inner: Arc<GateInner>,
}

#[derive(Debug, Default)]
struct GateInner {
    paused: AtomicBool,
    resumed: AtomicBool,
    notify: Notify,
}

impl PauseGate {
    /// Create a fresh gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a pause.
    ///
    /// Animation modules observe the flag at their next frame boundary;
    /// timed sleeps are woken immediately so they can cancel their timer.
    pub fn pause(&self) {
        self.inner.paused.store(true, Ordering::SeqCst);
        self.inner.notify.notify_one();
    }

    /// Clear the pause and latch the resumed flag.
    pub fn resume(&self) {
        self.inner.paused.store(false, Ordering::SeqCst);
        self.inner.resumed.store(true, Ordering::SeqCst);
    }

    /// Clear both flags without latching a resume.
    ///
    /// Used by `restart()`: the interrupted step re-runs from scratch when
    /// the cursor reaches it again, instead of resuming mid-state.
    pub fn reset(&self) {
        self.inner.paused.store(false, Ordering::SeqCst);
        self.inner.resumed.store(false, Ordering::SeqCst);
    }

    /// Whether a pause is currently requested.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.inner.paused.load(Ordering::SeqCst)
    }

    /// Consume the one-shot resumed latch.
    ///
    /// Returns `true` at most once per `resume()` call.
    #[must_use]
    pub fn take_resumed(&self) -> bool {
        self.inner.resumed.swap(false, Ordering::SeqCst)
    }

    /// Wait until a pause is requested.
    ///
    /// Notify permits can outlive the pause that stored them, so the flag is
    /// re-checked after every wake.
    pub async fn pause_requested(&self) {
        loop {
            if self.is_paused() {
                return;
            }
            self.inner.notify.notified().await;
        }
    }
}
