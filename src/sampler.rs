//! Round-robin analog input sampling
//!
//! Conversions are pipelined over two polls: the input selected on one poll
//! is read back on the next, and the following input is selected right
//! away. Each poll after the first therefore yields one reading.
//!
//! Readings pass a hysteresis band before they are committed. After a full
//! round over the four inputs, any committed change asks for a render, and
//! changed channels are queued for broadcast, at most once per
//! [`MIN_BROADCAST_INTERVAL`].

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::AnalogInput;
use crate::codec::ChannelId;
use crate::math8::level_from_millivolts;
use crate::state::ChannelValues;

/// Number of analog inputs, one per color channel
pub const INPUT_COUNT: usize = ChannelId::COLORS.len();

/// Minimum change (on the 0-255 scale) for a reading to be accepted
pub const HYSTERESIS: u8 = 2;

/// Minimum time between two change broadcasts
pub const MIN_BROADCAST_INTERVAL: Duration = Duration::from_millis(50);

/// Channels changed since the last broadcast
pub type ChangedChannels = Vec<ChannelId, INPUT_COUNT>;

/// One converted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub channel: ChannelId,
    pub level: u8,
}

#[derive(Debug, Clone)]
pub struct AnalogSampler {
    /// Input whose conversion is in flight
    input: usize,
    /// Whether a conversion was started for `input`
    converting: bool,
    /// Last accepted level per input
    committed: [u8; INPUT_COUNT],
    /// Bitmask of inputs changed during the current round
    round: u8,
    /// Bitmask of inputs changed in completed rounds, not broadcast yet
    unsent: u8,
    last_broadcast: Option<Instant>,
}

impl AnalogSampler {
    pub const fn new() -> Self {
        Self {
            input: 0,
            converting: false,
            committed: [0; INPUT_COUNT],
            round: 0,
            unsent: 0,
            last_broadcast: None,
        }
    }

    /// Advance the conversion pipeline by one poll
    ///
    /// Returns the reading of the previously selected input, or `None` on
    /// the very first poll, which only starts a conversion.
    #[allow(clippy::cast_possible_truncation)]
    pub fn step<A: AnalogInput>(&mut self, adc: &mut A) -> Option<Reading> {
        if !self.converting {
            adc.select_channel(self.input as u8);
            self.converting = true;
            return None;
        }

        let level = level_from_millivolts(adc.read_millivolts());
        let reading = Reading {
            channel: ChannelId::COLORS[self.input],
            level,
        };

        self.input = (self.input + 1) % INPUT_COUNT;
        adc.select_channel(self.input as u8);

        Some(reading)
    }

    /// Commit a reading if it leaves the hysteresis band
    ///
    /// Returns `true` when the committed level changed.
    pub fn accept(&mut self, reading: Reading) -> bool {
        let index = reading.channel.index();
        let Some(committed) = self.committed.get_mut(index) else {
            return false;
        };
        if reading.level.abs_diff(*committed) < HYSTERESIS {
            return false;
        }

        *committed = reading.level;
        self.round |= 1 << index;
        true
    }

    /// Sample one input
    ///
    /// Returns `true` when a round over all inputs completed with at least
    /// one accepted change, meaning the strip should be re-rendered.
    pub fn poll<A: AnalogInput>(&mut self, adc: &mut A) -> bool {
        let Some(reading) = self.step(adc) else {
            return false;
        };
        self.accept(reading);

        if reading.channel.index() + 1 < INPUT_COUNT {
            return false;
        }
        let changed = self.round != 0;
        self.unsent |= self.round;
        self.round = 0;
        changed
    }

    /// Replace the committed levels without hysteresis
    ///
    /// The given values become the baseline for future readings and nothing
    /// is left waiting for broadcast.
    pub fn seed(&mut self, values: &ChannelValues) {
        for (committed, channel) in self.committed.iter_mut().zip(ChannelId::COLORS) {
            *committed = values.get(channel).unwrap_or_default();
        }
        self.round = 0;
        self.unsent = 0;
    }

    /// Committed levels applied over `values`
    pub fn apply_to(&self, mut values: ChannelValues) -> ChannelValues {
        for (level, channel) in self.committed.iter().zip(ChannelId::COLORS) {
            values.set(channel, *level);
        }
        values
    }

    /// Take the channels due for broadcast
    ///
    /// Returns nothing while the broadcast interval has not elapsed; the
    /// changes stay queued until it has.
    pub fn take_changes(&mut self, now: Instant) -> Option<ChangedChannels> {
        if self.unsent == 0 {
            return None;
        }
        if let Some(last) = self.last_broadcast {
            if now.saturating_duration_since(last) < MIN_BROADCAST_INTERVAL {
                return None;
            }
        }

        let changed = ChannelId::COLORS
            .into_iter()
            .filter(|channel| self.unsent & (1 << channel.index()) != 0)
            .collect();
        self.unsent = 0;
        self.last_broadcast = Some(now);
        Some(changed)
    }
}

impl Default for AnalogSampler {
    fn default() -> Self {
        Self::new()
    }
}
