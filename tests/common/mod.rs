#![allow(dead_code)]

use myrtio_strip_sync::{
    AnalogInput, BusError, ChannelBases, ChannelId, ConfigError, ConfigStore, EventBus, EventId,
    Instant, Rgbw, StripConfig, StripDriver,
};

/// Millivolts that map exactly onto `level`
pub fn mv(level: u8) -> f32 {
    ((u32::from(level) * 3300 + 254) / 255) as f32
}

pub fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

/// Frame committed to the mock strip: r, g, b, w, brightness
pub type Frame = [u8; 5];

#[derive(Debug, Default)]
pub struct MockDriver {
    pub pixels: u16,
    pub color: Option<Rgbw>,
    pub brightness: u8,
    pub commits: Vec<Frame>,
    pub reinits: Vec<u16>,
}

impl MockDriver {
    pub fn with_pixels(pixels: u16) -> Self {
        Self {
            pixels,
            ..Self::default()
        }
    }

    pub fn last_commit(&self) -> Option<Frame> {
        self.commits.last().copied()
    }
}

impl StripDriver for MockDriver {
    fn fill(&mut self, color: Rgbw) {
        self.color = Some(color);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn commit(&mut self) {
        let (r, g, b, w) = self
            .color
            .map(|color| (color.r, color.g, color.b, color.a.0))
            .unwrap_or_default();
        self.commits.push([r, g, b, w, self.brightness]);
    }

    fn pixel_count(&self) -> u16 {
        self.pixels
    }

    fn reinitialize(&mut self, pixel_count: u16) {
        self.pixels = pixel_count;
        self.reinits.push(pixel_count);
    }
}

#[derive(Debug, Default)]
pub struct MockAdc {
    pub millivolts: [f32; 4],
    pub selected: Option<u8>,
    pub selects: Vec<u8>,
    pub reads: usize,
    pub disconnected: bool,
}

impl MockAdc {
    pub fn with_levels(levels: [u8; 4]) -> Self {
        Self {
            millivolts: levels.map(mv),
            ..Self::default()
        }
    }

    pub fn set_level(&mut self, input: usize, level: u8) {
        self.millivolts[input] = mv(level);
    }
}

impl AnalogInput for MockAdc {
    fn select_channel(&mut self, index: u8) {
        self.selected = Some(index);
        self.selects.push(index);
    }

    fn read_millivolts(&mut self) -> f32 {
        self.reads += 1;
        self.selected
            .map(|index| self.millivolts[usize::from(index)])
            .unwrap_or_default()
    }

    fn is_disconnected(&mut self) -> bool {
        self.disconnected
    }
}

#[derive(Debug, Default)]
pub struct MockBus {
    pub emitted: Vec<EventId>,
    pub subscriptions: Vec<(EventId, u8)>,
    pub producers: Vec<(EventId, u8)>,
    pub consumers: Vec<(EventId, u8)>,
    pub failing: bool,
}

impl MockBus {
    fn result(&self) -> Result<(), BusError> {
        if self.failing {
            Err(BusError::Rejected)
        } else {
            Ok(())
        }
    }

    /// Values emitted on one channel, in order
    pub fn values_of(&self, bases: &ChannelBases, channel: ChannelId) -> Vec<u8> {
        self.emitted
            .iter()
            .filter(|event| bases.lookup(**event) == Some(channel))
            .map(|event| myrtio_strip_sync::decode(*event))
            .collect()
    }
}

impl EventBus for MockBus {
    fn emit(&mut self, event: EventId) -> Result<(), BusError> {
        self.result()?;
        self.emitted.push(event);
        Ok(())
    }

    fn subscribe(&mut self, base: EventId, mask_bits: u8) -> Result<(), BusError> {
        self.result()?;
        self.subscriptions.push((base, mask_bits));
        Ok(())
    }

    fn identify_producer(&mut self, base: EventId, mask_bits: u8) -> Result<(), BusError> {
        self.result()?;
        self.producers.push((base, mask_bits));
        Ok(())
    }

    fn identify_consumer(&mut self, base: EventId, mask_bits: u8) -> Result<(), BusError> {
        self.result()?;
        self.consumers.push((base, mask_bits));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockStore {
    /// `None` behaves like an invalid handle
    pub config: Option<StripConfig>,
    pub saved: Vec<StripConfig>,
    pub read_only: bool,
}

impl MockStore {
    pub fn with(config: StripConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }
}

impl ConfigStore for MockStore {
    fn load(&mut self) -> Result<StripConfig, ConfigError> {
        self.config.clone().ok_or(ConfigError::InvalidHandle)
    }

    fn save(&mut self, config: &StripConfig) -> Result<(), ConfigError> {
        if self.read_only {
            return Err(ConfigError::WriteFailed);
        }
        self.config = Some(config.clone());
        self.saved.push(config.clone());
        Ok(())
    }
}

/// Configuration with no startup delay and no periodic sync
pub fn quiet_config() -> StripConfig {
    StripConfig {
        startup_delay_seconds: 0,
        sync_interval_seconds: 0,
        ..StripConfig::DEFAULT
    }
}
