//! Completion Signals
//!
//! Every step module resolves its `action()` with a [`CompletionSignal`]
//! describing why the step finished and which kind of module produced it.
//! `Began` and `Tick` never terminate an action; they exist so modules and
//! the scheduler can report progress through `tracing` when debug output is
//! enabled.

use std::fmt;

/// The kind of step module that produced a signal.
///
/// Normalization and dispatch classify steps through this enum rather than
/// by downcasting, so the step list stays a plain list of trait objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleKind {
    /// Per-character text append animation
    Write,
    /// Per-character text removal animation
    Backspace,
    /// One-shot truncation (not animated)
    Delete,
    /// Real-clock sleep, pausable with elapsed-time accounting
    TimedSleep,
    /// Exactly one frame of delay, never interrupted
    FrameSleep,
    /// A caller-supplied module; scheduled verbatim, no spacing injection
    Custom(&'static str),
}

impl ModuleKind {
    /// Whether this step animates the surface per tick.
    ///
    /// Animation steps get frame-stability spacing inserted after them
    /// during normalization.
    #[must_use]
    pub fn is_animation(self) -> bool {
        matches!(self, Self::Write | Self::Backspace)
    }

    /// Whether this step is a sleep of either flavor.
    #[must_use]
    pub fn is_sleep(self) -> bool {
        matches!(self, Self::TimedSleep | Self::FrameSleep)
    }

    /// Stable name for logging.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Backspace => "backspace",
            Self::Delete => "delete",
            Self::TimedSleep => "sleep",
            Self::FrameSleep => "frame-sleep",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why an asynchronous step finished (or progressed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalKind {
    /// The step started running
    Began,
    /// The step performed one discrete mutation
    Tick,
    /// The step ran to completion
    Done,
    /// The step observed a pause request and yielded
    Paused,
}

impl SignalKind {
    /// Stable name for logging.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Began => "began",
            Self::Tick => "tick",
            Self::Done => "done",
            Self::Paused => "paused",
        }
    }
}

/// A completion/progress signal carrying the identity of its source module.
///
/// Immutable; the scheduler reads it transiently for control flow and
/// logging, it is never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionSignal {
    kind: SignalKind,
    source: ModuleKind,
}

impl CompletionSignal {
    /// Signal that `source` started running.
    #[must_use]
    pub fn began(source: ModuleKind) -> Self {
        Self { kind: SignalKind::Began, source }
    }

    /// Signal that `source` performed one tick.
    #[must_use]
    pub fn tick(source: ModuleKind) -> Self {
        Self { kind: SignalKind::Tick, source }
    }

    /// Signal that `source` ran to completion.
    #[must_use]
    pub fn done(source: ModuleKind) -> Self {
        Self { kind: SignalKind::Done, source }
    }

    /// Signal that `source` yielded to a pause request.
    #[must_use]
    pub fn paused(source: ModuleKind) -> Self {
        Self { kind: SignalKind::Paused, source }
    }

    /// What happened.
    #[must_use]
    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Which module kind produced the signal.
    #[must_use]
    pub fn source(&self) -> ModuleKind {
        self.source
    }

    /// Emit this signal as a `tracing` debug event.
    ///
    /// Callers gate this on the `debug` config flag so the per-tick path
    /// stays quiet by default.
    pub fn emit(&self) {
        tracing::debug!(module = self.source.as_str(), signal = self.kind.as_str(), "typewriter");
    }
}

impl fmt::Display for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.kind.as_str())
    }
}
