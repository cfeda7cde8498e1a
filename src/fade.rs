//! Follower-side fade engine
//!
//! Incoming color and brightness values are staged as pending. A duration
//! value commits them: instantly for 0, otherwise as a linear fade of that
//! many seconds starting from what the strip currently shows.

use embassy_time::{Duration, Instant};

use crate::codec::ChannelId;
use crate::renderer::StripRenderer;
use crate::state::ChannelValues;
use crate::transition::ValueTransition;

#[derive(Debug, Clone)]
pub struct FadeEngine {
    /// Values received but not committed yet
    pending: ChannelValues,
    fade: ValueTransition<ChannelValues>,
}

impl FadeEngine {
    pub const fn new(initial: ChannelValues) -> Self {
        Self {
            pending: initial,
            fade: ValueTransition::new_channels(initial),
        }
    }

    /// Values staged for the next commit
    pub const fn pending(&self) -> ChannelValues {
        self.pending
    }

    pub const fn is_fading(&self) -> bool {
        self.fade.is_transitioning()
    }

    /// Handle an inbound channel value
    pub fn handle(
        &mut self,
        channel: ChannelId,
        value: u8,
        now: Instant,
        renderer: &mut StripRenderer,
    ) {
        if channel == ChannelId::Duration {
            self.commit(value, now, renderer);
        } else {
            self.pending.set(channel, value);
        }
    }

    /// Apply the pending values over `seconds`
    pub fn commit(&mut self, seconds: u8, now: Instant, renderer: &mut StripRenderer) {
        if seconds == 0 {
            self.fade.set(self.pending, Duration::from_millis(0), now);
            renderer.set(self.pending);
            return;
        }

        let start = renderer.committed();
        renderer.discard_pending();
        let duration = Duration::from_millis(u64::from(seconds) * 1000);
        self.fade.retarget(start, self.pending, duration, now);
        log!(
            "fade: {:?} -> {:?} over {}s",
            start,
            self.pending,
            seconds
        );
    }

    /// Advance a running fade and render the interpolated values
    ///
    /// Only writes to the renderer when an interpolated value changed.
    pub fn poll(&mut self, now: Instant, renderer: &mut StripRenderer) {
        if self.fade.tick(now) {
            renderer.set(self.fade.current());
        }
    }
}
