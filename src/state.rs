//! Channel state shared by the renderer, fade engine and controller paths

use smart_leds::{RGBW, White};

use crate::codec::ChannelId;
use crate::math8::lerp8;

/// Intensities of the five visible channels
///
/// The sixth bus channel, duration, is a transient trigger and is never
/// stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelValues {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub white: u8,
    pub brightness: u8,
}

impl ChannelValues {
    /// All channels dark
    pub const OFF: Self = Self::new(0, 0, 0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8, white: u8, brightness: u8) -> Self {
        Self {
            red,
            green,
            blue,
            white,
            brightness,
        }
    }

    /// Value of a channel, `None` for duration
    pub const fn get(&self, channel: ChannelId) -> Option<u8> {
        Some(match channel {
            ChannelId::Red => self.red,
            ChannelId::Green => self.green,
            ChannelId::Blue => self.blue,
            ChannelId::White => self.white,
            ChannelId::Brightness => self.brightness,
            ChannelId::Duration => return None,
        })
    }

    /// Set a channel value
    ///
    /// Returns `false` for duration, which is not a stored channel.
    pub fn set(&mut self, channel: ChannelId, value: u8) -> bool {
        let slot = match channel {
            ChannelId::Red => &mut self.red,
            ChannelId::Green => &mut self.green,
            ChannelId::Blue => &mut self.blue,
            ChannelId::White => &mut self.white,
            ChannelId::Brightness => &mut self.brightness,
            ChannelId::Duration => return false,
        };
        *slot = value;
        true
    }

    /// Same colors with a different brightness
    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Pixel color, brightness is applied separately by the driver
    pub const fn pixel(&self) -> RGBW<u8> {
        RGBW {
            r: self.red,
            g: self.green,
            b: self.blue,
            a: White(self.white),
        }
    }

    /// Linear interpolation of every channel
    ///
    /// `progress` runs from 0 (all `from`) to `u16::MAX` (all `to`).
    pub const fn lerp(from: Self, to: Self, progress: u16) -> Self {
        Self {
            red: lerp8(from.red, to.red, progress),
            green: lerp8(from.green, to.green, progress),
            blue: lerp8(from.blue, to.blue, progress),
            white: lerp8(from.white, to.white, progress),
            brightness: lerp8(from.brightness, to.brightness, progress),
        }
    }
}
