//! Engine Errors
//!
//! The error surface is deliberately small. The two failure classes the
//! dynamic original had to police at runtime - a missing tick handler and an
//! unrecognized queue entry - cannot be constructed here: handlers are trait
//! methods and the step list is a list of [`Module`](crate::modules::Module)
//! trait objects. What remains fallible is the surface itself, and those
//! failures propagate out of the drive loop untouched; there is no retry
//! logic anywhere in the engine.

use thiserror::Error;

use crate::surface::SurfaceError;

/// Errors surfaced by the drive loop.
#[derive(Debug, Error)]
pub enum TypewriterError {
    /// A surface mutation failed mid-step. Not retried; the effect halts
    /// where it stood.
    #[error("surface update failed: {0}")]
    Surface(#[source] SurfaceError),
}
