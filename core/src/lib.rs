//! Typewriter Core - Headless Typewriter Animation Engine
//!
//! This crate types, deletes, rewrites and pauses text on a visual surface
//! over time, synchronized to a display's frame clock, with optional
//! randomized per-character jitter. It is completely independent of any UI
//! framework: the surface is a trait, the frame clock is a trait, and the
//! engine can run headless for testing/automation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Host                                 │
//! │   ┌─────────────┐      ┌─────────────┐      ┌─────────────┐  │
//! │   │  Surface    │      │ FrameClock  │      │   Handle    │  │
//! │   │ (any text   │      │ (display    │      │ pause/resume│  │
//! │   │  renderer)  │      │  refresh)   │      │ stop/restart│  │
//! │   └──────┬──────┘      └──────┬──────┘      └──────┬──────┘  │
//! └──────────┼────────────────────┼────────────────────┼─────────┘
//!            │                    │                    │
//! ┌──────────┼────────────────────┼────────────────────┼─────────┐
//! │          │        TYPEWRITER CORE                  │         │
//! │  ┌───────┴────────────────────┴────────────────────┴──────┐  │
//! │  │                     Typewriter                          │  │
//! │  │   step list ──► [Write][FrameSleep][Backspace][Sleep]   │  │
//! │  │   cursor    ──► one module in flight at a time          │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Typewriter`]: the scheduler; fluent builders plus the drive loop
//! - [`TypewriterHandle`]: cloneable live control (pause/resume/stop/restart)
//! - [`Module`](modules::Module): one schedulable step of the effect
//! - [`CompletionSignal`]: why an asynchronous step finished
//! - [`Surface`](surface::Surface): the text-bearing collaborator
//! - [`FrameClock`](clock::FrameClock): frame boundaries and monotonic time
//!
//! # Quick Start
//!
//! ```no_run
//! use typewriter_core::surface::{shared_surface, BufferSurface};
//! use typewriter_core::{StepOptions, Typewriter, TypewriterConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), typewriter_core::TypewriterError> {
//!     let surface = shared_surface(BufferSurface::new());
//!     let mut tw = Typewriter::new(surface.clone(), TypewriterConfig::default());
//!
//!     tw.write_opts("ala ma kota", StepOptions::new().with_delay_ms(350))
//!         .sleep(1500)
//!         .rewrite(4, "diabla a nie kota");
//!
//!     tw.start().await?;
//!
//!     assert!(surface.lock().text().ends_with("diabla a nie kota"));
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency Model
//!
//! Cooperative and frame-clock-driven: every suspension point is either
//! "wait for the next frame" or "wait for a timer", both tokio yields. At
//! most one module is in flight at any time, so no two steps ever mutate
//! the surface concurrently; pause requests take effect at the next checked
//! suspension point rather than preemptively.
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. Surfaces and clocks are supplied by the host.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod clock;
pub mod config;
pub mod error;
pub mod modules;
pub mod signal;
pub mod surface;
pub mod typewriter;

// Re-exports for convenience
pub use clock::{FixedRateClock, FrameClock, SharedClock};
pub use config::{StepOptions, TypewriterConfig};
pub use error::TypewriterError;
pub use modules::{
    AnimationModule, BackspaceHandler, BackspaceModule, DeleteModule, FrameSleepModule, Module,
    PauseGate, TickHandler, TimedSleepModule, WriteHandler, WriteModule,
};
pub use signal::{CompletionSignal, ModuleKind, SignalKind};
pub use surface::{shared_surface, BufferSurface, SharedSurface, Surface, SurfaceError};
pub use typewriter::{Typewriter, TypewriterHandle};
