use embassy_time::{Duration, Instant};

use crate::math8::{lerp8, progress16};
use crate::state::ChannelValues;

/// Blends two values of type `T` using a progress value (0-`u16::MAX`)
pub type ValueBlender<T> = fn(T, T, u16) -> T;

/// Time-based linear transition for values of type `T`
#[derive(Debug, Clone)]
pub struct ValueTransition<T: Copy + PartialEq> {
    /// Blender function
    blend: ValueBlender<T>,
    /// Current interpolated value
    current: T,
    /// Value at the start of transition
    source: T,
    /// Target value (None if no transition in progress)
    target: Option<T>,
    /// Total transition duration
    duration: Duration,
    /// Time at which the transition started
    start_time: Instant,
}

impl<T: Copy + PartialEq> ValueTransition<T> {
    /// Create a new value transition
    pub const fn new(initial: T, blend: ValueBlender<T>) -> Self {
        Self {
            blend,
            current: initial,
            source: initial,
            target: None,
            duration: Duration::from_millis(0),
            start_time: Instant::from_millis(0),
        }
    }

    /// Get current value
    pub const fn current(&self) -> T {
        self.current
    }

    /// Get the value the transition is heading to
    pub fn target(&self) -> T {
        self.target.unwrap_or(self.current)
    }

    /// Check if a transition is in progress
    pub const fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Start a transition from the current value
    ///
    /// A transition already in flight is replaced, starting from whatever
    /// value it had reached.
    pub fn set(&mut self, value: T, duration: Duration, start_time: Instant) {
        self.retarget(self.current, value, duration, start_time);
    }

    /// Start a transition from an explicit source value
    pub fn retarget(&mut self, source: T, value: T, duration: Duration, start_time: Instant) {
        self.start_time = start_time;
        if duration.as_millis() == 0 {
            self.current = value;
            self.source = value;
            self.target = None;
            self.duration = Duration::from_millis(0);
        } else {
            self.current = source;
            self.source = source;
            self.target = Some(value);
            self.duration = duration;
        }
    }

    /// Update transition state
    ///
    /// Returns `true` when the current value changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let previous = self.current;
        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.duration {
            self.current = target;
            self.source = target;
            self.target = None;
        } else {
            let progress = progress16(elapsed, self.duration);
            self.current = (self.blend)(self.source, target, progress);
        }

        self.current != previous
    }
}

impl ValueTransition<u8> {
    /// Create a new u8 transition
    pub const fn new_u8(initial: u8) -> Self {
        Self::new(initial, lerp8)
    }
}

impl ValueTransition<ChannelValues> {
    /// Create a new transition over all visible channels
    pub const fn new_channels(initial: ChannelValues) -> Self {
        Self::new(initial, ChannelValues::lerp)
    }
}
