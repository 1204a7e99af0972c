//! Engine Configuration
//!
//! Configuration flows in two layers: a scheduler-wide [`TypewriterConfig`]
//! set at construction, and per-call [`StepOptions`] that override it for a
//! single builder call. Merge precedence is scheduler defaults first,
//! call-site options last. The scheduling-only knobs (`repeat`,
//! `sleep_before_repeat_ms`) have no per-step meaning and are therefore not
//! overridable per call.
//!
//! Both structs derive serde so a host application can embed them in its own
//! configuration file.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scheduler-wide configuration, also the default for every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Emit a `tracing` debug event for every signal (begin/tick/done/pause)
    pub debug: bool,

    /// Nominal delay between animation ticks in milliseconds
    pub delay_ms: u64,

    /// Jitter bound in milliseconds; each tick delay fluctuates by up to
    /// +/- this amount
    pub fluctuation_ms: u64,

    /// Wrap the cursor back to the first step after the last one completes
    pub repeat: bool,

    /// Timed sleep inserted after a write, in milliseconds (0 = none)
    pub sleep_ms: u64,

    /// Timed sleep inserted between the delete and write halves of a
    /// rewrite, in milliseconds (0 = none)
    pub sleep_rewrite_ms: u64,

    /// Timed sleep inserted before a repeat cycle, in milliseconds
    /// (0 = a single frame of spacing instead)
    pub sleep_before_repeat_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            debug: false,
            delay_ms: 100,
            fluctuation_ms: 50,
            repeat: false,
            sleep_ms: 0,
            sleep_rewrite_ms: 0,
            sleep_before_repeat_ms: 0,
        }
    }
}

impl TypewriterConfig {
    /// Apply per-call overrides on top of this configuration.
    #[must_use]
    pub fn merged(&self, options: &StepOptions) -> Self {
        Self {
            debug: options.debug.unwrap_or(self.debug),
            delay_ms: options.delay_ms.unwrap_or(self.delay_ms),
            fluctuation_ms: options.fluctuation_ms.unwrap_or(self.fluctuation_ms),
            repeat: self.repeat,
            sleep_ms: options.sleep_ms.unwrap_or(self.sleep_ms),
            sleep_rewrite_ms: options.sleep_rewrite_ms.unwrap_or(self.sleep_rewrite_ms),
            sleep_before_repeat_ms: self.sleep_before_repeat_ms,
        }
    }

    /// Nominal tick delay as a [`Duration`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Per-call overrides for a single builder call.
///
/// Unset fields fall back to the scheduler configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepOptions {
    /// Override the debug flag for this step
    pub debug: Option<bool>,

    /// Override the tick delay in milliseconds
    pub delay_ms: Option<u64>,

    /// Override the jitter bound in milliseconds
    pub fluctuation_ms: Option<u64>,

    /// Override the trailing sleep in milliseconds
    pub sleep_ms: Option<u64>,

    /// Override the rewrite gap sleep in milliseconds
    pub sleep_rewrite_ms: Option<u64>,
}

impl StepOptions {
    /// Start from empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the debug flag.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Override the tick delay.
    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Override the jitter bound.
    #[must_use]
    pub fn with_fluctuation_ms(mut self, fluctuation_ms: u64) -> Self {
        self.fluctuation_ms = Some(fluctuation_ms);
        self
    }

    /// Override the trailing sleep.
    #[must_use]
    pub fn with_sleep_ms(mut self, sleep_ms: u64) -> Self {
        self.sleep_ms = Some(sleep_ms);
        self
    }

    /// Override the rewrite gap sleep.
    #[must_use]
    pub fn with_sleep_rewrite_ms(mut self, sleep_rewrite_ms: u64) -> Self {
        self.sleep_rewrite_ms = Some(sleep_rewrite_ms);
        self
    }
}
