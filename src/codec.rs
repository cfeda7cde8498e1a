//! Value-over-identifier channel encoding
//!
//! A channel value rides in the low byte of a 64-bit event identifier,
//! the upper 56 bits identify the channel. One subscription with an
//! 8-bit mask therefore covers all 256 values of a channel.

/// 64-bit event identifier as seen on the bus
pub type EventId = u64;

/// Number of low identifier bits occupied by the channel value
pub const VALUE_BITS: u8 = 8;

const VALUE_MASK: EventId = 0xFF;
const BASE_MASK: EventId = !VALUE_MASK;

const CHANNEL_INDEX_RED: u8 = 0;
const CHANNEL_INDEX_GREEN: u8 = 1;
const CHANNEL_INDEX_BLUE: u8 = 2;
const CHANNEL_INDEX_WHITE: u8 = 3;
const CHANNEL_INDEX_BRIGHTNESS: u8 = 4;
const CHANNEL_INDEX_DURATION: u8 = 5;

const CHANNEL_NAME_RED: &str = "red";
const CHANNEL_NAME_GREEN: &str = "green";
const CHANNEL_NAME_BLUE: &str = "blue";
const CHANNEL_NAME_WHITE: &str = "white";
const CHANNEL_NAME_BRIGHTNESS: &str = "brightness";
const CHANNEL_NAME_DURATION: &str = "duration";

/// Number of channels carried on the bus
pub const CHANNEL_COUNT: usize = 6;

/// Set the low byte of `base` to `value`
#[inline]
pub const fn encode(base: EventId, value: u8) -> EventId {
    (base & BASE_MASK) | value as EventId
}

/// Extract the channel value from an identifier
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn decode(event: EventId) -> u8 {
    (event & VALUE_MASK) as u8
}

/// Check whether `event` belongs to the channel identified by `base`
///
/// Only the upper 56 bits are compared, so a base with a non-zero low
/// byte still matches its own channel.
#[inline]
pub const fn matches_channel(event: EventId, base: EventId) -> bool {
    event & BASE_MASK == base & BASE_MASK
}

/// Strip the value byte from a configured base identifier
#[inline]
pub const fn channel_base(base: EventId) -> EventId {
    base & BASE_MASK
}

/// One of the six channels a strip exchanges on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelId {
    Red = CHANNEL_INDEX_RED,
    Green = CHANNEL_INDEX_GREEN,
    Blue = CHANNEL_INDEX_BLUE,
    White = CHANNEL_INDEX_WHITE,
    Brightness = CHANNEL_INDEX_BRIGHTNESS,
    Duration = CHANNEL_INDEX_DURATION,
}

impl ChannelId {
    /// All channels in bus order
    pub const ALL: [Self; CHANNEL_COUNT] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::White,
        Self::Brightness,
        Self::Duration,
    ];

    /// Channels driven by the analog inputs, in input order
    pub const COLORS: [Self; 4] = [Self::Red, Self::Green, Self::Blue, Self::White];

    pub const fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            CHANNEL_INDEX_RED => Self::Red,
            CHANNEL_INDEX_GREEN => Self::Green,
            CHANNEL_INDEX_BLUE => Self::Blue,
            CHANNEL_INDEX_WHITE => Self::White,
            CHANNEL_INDEX_BRIGHTNESS => Self::Brightness,
            CHANNEL_INDEX_DURATION => Self::Duration,
            _ => return None,
        })
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => CHANNEL_NAME_RED,
            Self::Green => CHANNEL_NAME_GREEN,
            Self::Blue => CHANNEL_NAME_BLUE,
            Self::White => CHANNEL_NAME_WHITE,
            Self::Brightness => CHANNEL_NAME_BRIGHTNESS,
            Self::Duration => CHANNEL_NAME_DURATION,
        }
    }
}

/// Configured base identifier of every channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBases {
    bases: [EventId; CHANNEL_COUNT],
}

impl ChannelBases {
    /// Bases used by a factory-fresh node
    pub const DEFAULT: Self = Self::new([
        0x0501_0101_2260_0000,
        0x0501_0101_2260_0100,
        0x0501_0101_2260_0200,
        0x0501_0101_2260_0300,
        0x0501_0101_2260_0400,
        0x0501_0101_2260_0500,
    ]);

    /// Create from raw configured values, indexed by [`ChannelId::index`]
    pub const fn new(bases: [EventId; CHANNEL_COUNT]) -> Self {
        Self { bases }
    }

    /// Masked base identifier of a channel
    pub const fn get(&self, channel: ChannelId) -> EventId {
        channel_base(self.bases[channel.index()])
    }

    /// Replace the configured base of a channel
    pub fn set(&mut self, channel: ChannelId, base: EventId) {
        self.bases[channel.index()] = base;
    }

    /// Encode `value` on the given channel
    pub const fn event(&self, channel: ChannelId, value: u8) -> EventId {
        encode(self.bases[channel.index()], value)
    }

    /// Find the channel an inbound identifier belongs to
    pub fn lookup(&self, event: EventId) -> Option<ChannelId> {
        ChannelId::ALL
            .into_iter()
            .find(|channel| matches_channel(event, self.bases[channel.index()]))
    }
}

impl Default for ChannelBases {
    fn default() -> Self {
        Self::DEFAULT
    }
}
