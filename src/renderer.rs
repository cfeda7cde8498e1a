//! Rate-limited strip output
//!
//! Logical updates only mark the renderer dirty. The hardware commit is
//! issued from [`StripRenderer::flush`] at most once per
//! [`MIN_COMMIT_INTERVAL`], always with the latest values. A flush that is
//! rate-limited keeps the dirty flag, so the update is deferred, never lost.

use embassy_time::{Duration, Instant};

use crate::StripDriver;
use crate::math8::gamma8;
use crate::state::ChannelValues;

/// Minimum time between two hardware commits (~60 Hz)
pub const MIN_COMMIT_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct StripRenderer {
    /// Latest logical state
    values: ChannelValues,
    /// State of the last hardware commit
    committed: ChannelValues,
    dirty: bool,
    last_commit: Option<Instant>,
    min_interval: Duration,
}

impl StripRenderer {
    pub const fn new(initial: ChannelValues) -> Self {
        Self::with_interval(initial, MIN_COMMIT_INTERVAL)
    }

    /// Create a renderer with a custom commit interval
    pub const fn with_interval(initial: ChannelValues, min_interval: Duration) -> Self {
        Self {
            values: initial,
            committed: initial,
            dirty: false,
            last_commit: None,
            min_interval,
        }
    }

    /// Latest logical state
    pub const fn values(&self) -> ChannelValues {
        self.values
    }

    /// State currently shown on the strip
    pub const fn committed(&self) -> ChannelValues {
        self.committed
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Update the logical state
    pub fn set(&mut self, values: ChannelValues) {
        if values != self.values {
            self.values = values;
            self.dirty = true;
        }
    }

    /// Drop any update that has not reached the hardware yet
    pub fn discard_pending(&mut self) {
        self.values = self.committed;
        self.dirty = false;
    }

    /// Force the next flush to rewrite the strip
    ///
    /// Used after the driver was reinitialized and lost its buffer.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Commit the latest state if dirty and the rate limit allows it
    ///
    /// Returns `true` when a hardware commit was issued.
    pub fn flush<D: StripDriver>(&mut self, now: Instant, driver: &mut D) -> bool {
        if !self.dirty {
            return false;
        }
        if let Some(last) = self.last_commit {
            if now.saturating_duration_since(last) < self.min_interval {
                return false;
            }
        }

        let mut pixel = self.values.pixel();
        pixel.a.0 = gamma8(pixel.a.0);
        driver.fill(pixel);
        driver.set_brightness(self.values.brightness);
        driver.commit();

        self.committed = self.values;
        self.dirty = false;
        self.last_commit = Some(now);
        true
    }
}
