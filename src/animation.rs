//! Controller startup animation
//!
//! A one-shot sequence run when a node becomes controller: wait for the
//! bus to settle, take one authoritative sample of every input, announce
//! the colors, then ramp brightness up to full while followers track it.
//! Every state is advanced by a non-blocking [`StartupAnimation::poll`].

use embassy_time::{Duration, Instant};

use crate::AnalogInput;
use crate::bus::{EventBus, emit_commit, emit_value};
use crate::codec::{ChannelBases, ChannelId};
use crate::renderer::StripRenderer;
use crate::sampler::{AnalogSampler, INPUT_COUNT};
use crate::state::ChannelValues;

/// Spacing between the color announcements
pub const COLOR_SPACING: Duration = Duration::from_millis(10);

/// Time between two brightness steps of the ramp
pub const BRIGHTNESS_STEP_INTERVAL: Duration = Duration::from_millis(40);

/// Brightness added per ramp step
pub const DEFAULT_BRIGHTNESS_STEP: u8 = 5;

const ALL_INPUTS: u8 = (1 << INPUT_COUNT) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// Finished, normal sampling is active
    Idle,
    /// Waiting for the configured startup delay
    StartupDelay,
    /// Taking the first sample of every input
    ReadInputs,
    /// Announcing the sampled colors
    BroadcastColors,
    /// Ramping brightness from 0 to 255
    FadeBrightness,
}

#[derive(Debug, Clone)]
pub struct StartupAnimation {
    state: AnimationState,
    delay: Duration,
    step: u8,
    /// Sampled colors at full brightness
    target: ChannelValues,
    /// Bitmask of inputs sampled so far
    sampled: u8,
    next_color: usize,
    brightness: u8,
    started: Option<Instant>,
    last_step: Option<Instant>,
}

impl StartupAnimation {
    pub fn new(delay_seconds: u16) -> Self {
        Self {
            state: AnimationState::StartupDelay,
            delay: Duration::from_secs(u64::from(delay_seconds)),
            step: DEFAULT_BRIGHTNESS_STEP,
            target: ChannelValues::OFF,
            sampled: 0,
            next_color: 0,
            brightness: 0,
            started: None,
            last_step: None,
        }
    }

    /// Use a custom brightness increment for the ramp
    ///
    /// A step of 0 is treated as 1 so the ramp always terminates.
    #[must_use]
    pub fn with_step(mut self, step: u8) -> Self {
        self.step = step.max(1);
        self
    }

    pub const fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == AnimationState::Idle
    }

    /// Colors taken during [`AnimationState::ReadInputs`]
    pub const fn target(&self) -> ChannelValues {
        self.target
    }

    /// Advance the animation by one step
    ///
    /// Returns the state after the step.
    pub fn poll<A, B>(
        &mut self,
        now: Instant,
        adc: &mut A,
        sampler: &mut AnalogSampler,
        renderer: &mut StripRenderer,
        bus: &mut B,
        bases: &ChannelBases,
    ) -> AnimationState
    where
        A: AnalogInput,
        B: EventBus,
    {
        match self.state {
            AnimationState::Idle => {}
            AnimationState::StartupDelay => {
                let started = *self.started.get_or_insert(now);
                if now.saturating_duration_since(started) >= self.delay {
                    self.state = AnimationState::ReadInputs;
                }
            }
            AnimationState::ReadInputs => self.read_inputs(adc, sampler, renderer),
            AnimationState::BroadcastColors => {
                if !self.is_due(now, COLOR_SPACING) {
                    return self.state;
                }
                let channel = ChannelId::COLORS[self.next_color];
                emit_value(bus, bases, channel, self.target.get(channel).unwrap_or_default());
                self.last_step = Some(now);
                self.next_color += 1;
                if self.next_color >= ChannelId::COLORS.len() {
                    self.state = AnimationState::FadeBrightness;
                }
            }
            AnimationState::FadeBrightness => {
                if !self.is_due(now, BRIGHTNESS_STEP_INTERVAL) {
                    return self.state;
                }
                self.brightness = self.brightness.saturating_add(self.step);
                renderer.set(self.target.with_brightness(self.brightness));
                emit_value(bus, bases, ChannelId::Brightness, self.brightness);
                emit_commit(bus, bases);
                self.last_step = Some(now);

                if self.brightness == u8::MAX {
                    renderer.set(self.target);
                    self.state = AnimationState::Idle;
                    log!("strip: startup animation complete");
                }
            }
        }

        self.state
    }

    fn read_inputs<A: AnalogInput>(
        &mut self,
        adc: &mut A,
        sampler: &mut AnalogSampler,
        renderer: &mut StripRenderer,
    ) {
        let Some(reading) = sampler.step(adc) else {
            return;
        };
        let bit = 1 << reading.channel.index();
        if self.sampled & bit == 0 {
            self.target.set(reading.channel, reading.level);
            self.sampled |= bit;
        }
        if self.sampled != ALL_INPUTS {
            return;
        }

        self.target.brightness = u8::MAX;
        sampler.seed(&self.target);
        log!(
            "strip: initial RGBW: R={} G={} B={} W={}",
            self.target.red,
            self.target.green,
            self.target.blue,
            self.target.white
        );

        renderer.set(self.target.with_brightness(0));
        self.brightness = 0;
        self.next_color = 0;
        self.last_step = None;
        self.state = AnimationState::BroadcastColors;
    }

    fn is_due(&self, now: Instant, interval: Duration) -> bool {
        self.last_step
            .is_none_or(|last| now.saturating_duration_since(last) >= interval)
    }
}
