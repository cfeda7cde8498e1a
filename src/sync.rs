//! Periodic full-state rebroadcast
//!
//! Followers can miss change broadcasts, so the controller replays every
//! visible channel on a fixed interval, one channel per step. This runs
//! next to the change-triggered broadcasts and may repeat the same value;
//! consumers treat repeats as no-ops.

use embassy_time::{Duration, Instant};

use crate::codec::ChannelId;

/// Spacing between the channels of one sync sequence
pub const STEP_INTERVAL: Duration = Duration::from_millis(20);

/// Channels replayed by a sync sequence, in order
pub const SEQUENCE: [ChannelId; 5] = [
    ChannelId::Red,
    ChannelId::Green,
    ChannelId::Blue,
    ChannelId::White,
    ChannelId::Brightness,
];

/// Position of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncCursor {
    /// Next sequence step, `None` while waiting for the interval
    pub next_step: Option<usize>,
    /// End of the last complete sequence
    pub last_full_sync: Option<Instant>,
    /// Time of the last emitted step
    pub last_step: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct SyncScheduler {
    interval: Option<Duration>,
    cursor: SyncCursor,
}

impl SyncScheduler {
    /// Create a scheduler, an interval of 0 seconds disables it
    pub fn new(interval_seconds: u16) -> Self {
        Self {
            interval: Self::interval_from_seconds(interval_seconds),
            cursor: SyncCursor::default(),
        }
    }

    /// Change the interval without interrupting a running sequence
    pub fn set_interval(&mut self, interval_seconds: u16) {
        self.interval = Self::interval_from_seconds(interval_seconds);
    }

    pub const fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    pub const fn cursor(&self) -> SyncCursor {
        self.cursor
    }

    /// Advance the schedule
    ///
    /// Returns the channel to broadcast now, if any. The interval is
    /// measured from the first poll, then from the end of each sequence.
    pub fn poll(&mut self, now: Instant) -> Option<ChannelId> {
        let cursor = &mut self.cursor;
        let Some(step) = cursor.next_step else {
            let interval = self.interval?;
            let last = *cursor.last_full_sync.get_or_insert(now);
            if now.saturating_duration_since(last) < interval {
                return None;
            }
            return Some(Self::emit_step(cursor, 0, now));
        };

        if let Some(last) = cursor.last_step {
            if now.saturating_duration_since(last) < STEP_INTERVAL {
                return None;
            }
        }
        Some(Self::emit_step(cursor, step, now))
    }

    fn emit_step(cursor: &mut SyncCursor, step: usize, now: Instant) -> ChannelId {
        let channel = SEQUENCE[step];
        cursor.last_step = Some(now);
        if step + 1 < SEQUENCE.len() {
            cursor.next_step = Some(step + 1);
        } else {
            cursor.next_step = None;
            cursor.last_full_sync = Some(now);
        }
        channel
    }

    fn interval_from_seconds(seconds: u16) -> Option<Duration> {
        (seconds > 0).then(|| Duration::from_secs(u64::from(seconds)))
    }
}
