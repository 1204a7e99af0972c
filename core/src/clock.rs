//! Frame Clock Abstraction
//!
//! Animations stay synchronized to a display by waking on frame boundaries
//! rather than on arbitrary timers: one tick decision per frame keeps the
//! effect free of tearing and backlog regardless of how slow a tick handler
//! runs. The host supplies the clock; [`FixedRateClock`] is the default,
//! pacing frames with the tokio timer the same way a render loop caps its
//! frame rate.
//!
//! Under `tokio::time::pause()` the clock runs on virtual time, which is
//! what makes the timing tests deterministic.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

/// Provider of frame boundaries and a monotonic timestamp.
#[async_trait]
pub trait FrameClock: Send + Sync {
    /// Wait until the next frame boundary; returns the timestamp at wake.
    async fn next_frame(&self) -> Instant;

    /// Current monotonic time.
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Shared handle to the frame clock.
pub type SharedClock = Arc<dyn FrameClock>;

/// Frame clock that paces frames at a fixed rate.
///
/// Each `next_frame()` waits one full period from the moment it is called;
/// frames are paced relative to the request, not aligned to a global grid.
#[derive(Clone, Copy, Debug)]
pub struct FixedRateClock {
    period: Duration,
}

impl FixedRateClock {
    /// Create a clock with an explicit frame period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Create a clock from a frame rate. A rate of 0 is clamped to 1 fps.
    #[must_use]
    pub fn fps(rate: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / rate.max(1),
        }
    }

    /// The configured frame period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self::fps(60)
    }
}

#[async_trait]
impl FrameClock for FixedRateClock {
    async fn next_frame(&self) -> Instant {
        tokio::time::sleep(self.period).await;
        Instant::now()
    }
}
