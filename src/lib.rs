#![no_std]

#[macro_use]
mod logging;

pub mod animation;
pub mod bus;
pub mod codec;
pub mod config;
pub mod fade;
pub mod math8;
pub mod queue;
pub mod renderer;
pub mod role;
pub mod sampler;
pub mod state;
pub mod strip;
pub mod subscription;
pub mod sync;
pub mod transition;

pub use animation::{AnimationState, StartupAnimation};
pub use bus::{BusError, BusReport, EventBus};
pub use codec::{ChannelBases, ChannelId, EventId, decode, encode, matches_channel};
pub use config::{ConfigError, ConfigStore, StripConfig};
pub use fade::FadeEngine;
pub use queue::{ReportProcessor, ReportQueue, ReportReceiver, ReportSender};
pub use renderer::StripRenderer;
pub use role::{NodeRole, RoleSelection};
pub use sampler::AnalogSampler;
pub use state::ChannelValues;
pub use strip::RgbwStrip;
pub use sync::SyncScheduler;
pub use transition::ValueTransition;

pub use embassy_time::{Duration, Instant};
pub use smart_leds::{RGBW, White};

/// Pixel color written to the strip
pub type Rgbw = RGBW<u8>;

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// The strip core is generic over this trait.
pub trait StripDriver {
    /// Fill every pixel of the buffer with one color
    fn fill(&mut self, color: Rgbw);

    /// Set the global brightness used on the next commit
    fn set_brightness(&mut self, brightness: u8);

    /// Transmit the buffer to the LEDs
    fn commit(&mut self);

    /// Number of pixels the driver is set up for
    fn pixel_count(&self) -> u16;

    /// Set the driver up for a different number of pixels
    fn reinitialize(&mut self, pixel_count: u16);
}

/// Four-channel analog converter
///
/// Conversions are two-phase: a channel is selected on one poll and its
/// result is read on the next, so conversion latency never blocks.
pub trait AnalogInput {
    /// Start a conversion on input `index` (0-3)
    fn select_channel(&mut self, index: u8);

    /// Result of the last started conversion
    fn read_millivolts(&mut self) -> f32;

    /// Returns true if the converter does not respond
    fn is_disconnected(&mut self) -> bool;
}

impl<T: StripDriver + ?Sized> StripDriver for &mut T {
    fn fill(&mut self, color: Rgbw) {
        (**self).fill(color);
    }

    fn set_brightness(&mut self, brightness: u8) {
        (**self).set_brightness(brightness);
    }

    fn commit(&mut self) {
        (**self).commit();
    }

    fn pixel_count(&self) -> u16 {
        (**self).pixel_count()
    }

    fn reinitialize(&mut self, pixel_count: u16) {
        (**self).reinitialize(pixel_count);
    }
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn select_channel(&mut self, index: u8) {
        (**self).select_channel(index);
    }

    fn read_millivolts(&mut self) -> f32 {
        (**self).read_millivolts()
    }

    fn is_disconnected(&mut self) -> bool {
        (**self).is_disconnected()
    }
}
