//! Persisted strip configuration
//!
//! Configuration problems never stop a node: unreadable storage falls back
//! to [`StripConfig::DEFAULT`] and out-of-range fields are replaced by their
//! defaults in [`StripConfig::sanitized`].

use heapless::String;

use crate::codec::ChannelBases;
use crate::role::RoleSelection;

/// Maximum description length in bytes
pub const DESCRIPTION_LEN: usize = 16;

pub const DEFAULT_LED_COUNT: u16 = 120;
pub const MIN_LED_COUNT: u16 = 1;
pub const MAX_LED_COUNT: u16 = 1000;

pub const DEFAULT_SYNC_INTERVAL_SECONDS: u16 = 3;
pub const MAX_SYNC_INTERVAL_SECONDS: u16 = 60;

pub const DEFAULT_STARTUP_DELAY_SECONDS: u16 = 5;
pub const MAX_STARTUP_DELAY_SECONDS: u16 = 30;

/// Error type for the configuration store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The store handle is not usable
    InvalidHandle,
    /// Reading the stored record failed
    ReadFailed,
    /// Writing the record failed
    WriteFailed,
}

/// Persistent storage of one strip's configuration
pub trait ConfigStore {
    /// Read the stored configuration
    ///
    /// Values are returned as stored, range checks are done by the caller.
    fn load(&mut self) -> Result<StripConfig, ConfigError>;

    /// Replace the stored configuration
    fn save(&mut self, config: &StripConfig) -> Result<(), ConfigError>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &mut T {
    fn load(&mut self) -> Result<StripConfig, ConfigError> {
        (**self).load()
    }

    fn save(&mut self, config: &StripConfig) -> Result<(), ConfigError> {
        (**self).save(config)
    }
}

/// Configuration of one RGBW strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripConfig {
    /// User name of the strip
    pub description: String<DESCRIPTION_LEN>,
    /// Number of LEDs on the strip
    pub led_count: u16,
    /// Bus identity of every channel
    pub channel_bases: ChannelBases,
    /// Controller only: full-state rebroadcast period, 0 disables
    pub sync_interval_seconds: u16,
    /// Controller only: delay before the startup animation
    pub startup_delay_seconds: u16,
    /// How the node role is decided
    pub role: RoleSelection,
}

impl StripConfig {
    pub const DEFAULT: Self = Self {
        description: String::new(),
        led_count: DEFAULT_LED_COUNT,
        channel_bases: ChannelBases::DEFAULT,
        sync_interval_seconds: DEFAULT_SYNC_INTERVAL_SECONDS,
        startup_delay_seconds: DEFAULT_STARTUP_DELAY_SECONDS,
        role: RoleSelection::Auto,
    };

    /// Copy with every out-of-range field replaced by its default
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        if !(MIN_LED_COUNT..=MAX_LED_COUNT).contains(&config.led_count) {
            log!(
                "config: invalid LED count {}, using default: {}",
                config.led_count,
                DEFAULT_LED_COUNT
            );
            config.led_count = DEFAULT_LED_COUNT;
        }

        if config.sync_interval_seconds > MAX_SYNC_INTERVAL_SECONDS {
            log!(
                "config: invalid sync interval {}s, using default: {}s",
                config.sync_interval_seconds,
                DEFAULT_SYNC_INTERVAL_SECONDS
            );
            config.sync_interval_seconds = DEFAULT_SYNC_INTERVAL_SECONDS;
        }

        if config.startup_delay_seconds > MAX_STARTUP_DELAY_SECONDS {
            log!(
                "config: invalid startup delay {}s, using default: {}s",
                config.startup_delay_seconds,
                DEFAULT_STARTUP_DELAY_SECONDS
            );
            config.startup_delay_seconds = DEFAULT_STARTUP_DELAY_SECONDS;
        }

        config
    }

    /// Copy with the factory defaults restored
    ///
    /// Sync interval and startup delay are kept.
    #[must_use]
    pub fn factory_reset(&self) -> Self {
        Self {
            sync_interval_seconds: self.sync_interval_seconds,
            startup_delay_seconds: self.startup_delay_seconds,
            ..Self::DEFAULT
        }
    }

    /// Set the description, truncated to the storage size
    pub fn set_description(&mut self, description: &str) {
        self.description.clear();
        for ch in description.chars() {
            if self.description.push(ch).is_err() {
                break;
            }
        }
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Load the configuration, falling back to defaults when the store fails
pub fn load_or_default<S: ConfigStore>(store: &mut S) -> StripConfig {
    match store.load() {
        Ok(config) => config.sanitized(),
        Err(err) => {
            log!("config: unable to read configuration ({:?}), using defaults", err);
            StripConfig::DEFAULT
        }
    }
}
