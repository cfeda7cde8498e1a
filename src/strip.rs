//! RGBW strip control
//!
//! [`RgbwStrip`] owns everything belonging to one physical strip: the
//! renderer, the loaded configuration and the state of the role resolved
//! from it. Several strips can run side by side, they share nothing.
//!
//! The host drives it with three entry points, all on the same thread of
//! control: [`RgbwStrip::apply_configuration`] on every configuration
//! (re)load, [`RgbwStrip::poll`] on every loop tick and
//! [`RgbwStrip::handle_report`] for inbound bus messages.

use embassy_time::Instant;

use crate::animation::{AnimationState, StartupAnimation};
use crate::bus::{BusReport, EventBus, emit_commit, emit_value};
use crate::codec::{ChannelBases, ChannelId};
use crate::config::{ConfigStore, StripConfig, load_or_default};
use crate::fade::FadeEngine;
use crate::renderer::StripRenderer;
use crate::role::{NodeRole, resolve_role};
use crate::sampler::AnalogSampler;
use crate::state::ChannelValues;
use crate::subscription::SubscriptionTable;
use crate::sync::SyncScheduler;
use crate::{AnalogInput, StripDriver};

/// State shown before anything was sampled or received
pub const INITIAL_VALUES: ChannelValues = ChannelValues::new(0, 0, 0, 0, u8::MAX);

/// Controller-only state
#[derive(Debug, Clone)]
struct ControllerState {
    sampler: AnalogSampler,
    animation: StartupAnimation,
    sync: SyncScheduler,
}

impl ControllerState {
    fn new(config: &StripConfig) -> Self {
        Self {
            sampler: AnalogSampler::new(),
            animation: StartupAnimation::new(config.startup_delay_seconds),
            sync: SyncScheduler::new(config.sync_interval_seconds),
        }
    }

    fn poll<A, B>(
        &mut self,
        now: Instant,
        adc: &mut A,
        renderer: &mut StripRenderer,
        bus: &mut B,
        bases: &ChannelBases,
    ) where
        A: AnalogInput,
        B: EventBus,
    {
        if !self.animation.is_idle() {
            self.animation
                .poll(now, adc, &mut self.sampler, renderer, bus, bases);
            return;
        }

        if self.sampler.poll(adc) {
            renderer.set(self.sampler.apply_to(renderer.values()));
        }

        if let Some(changed) = self.sampler.take_changes(now) {
            let values = renderer.values();
            for channel in changed {
                emit_value(bus, bases, channel, values.get(channel).unwrap_or_default());
            }
            emit_commit(bus, bases);
            log!(
                "strip: RGBW update: R={} G={} B={} W={} Brightness={}",
                values.red,
                values.green,
                values.blue,
                values.white,
                values.brightness
            );
        }

        if let Some(channel) = self.sync.poll(now) {
            let value = renderer.values().get(channel).unwrap_or_default();
            emit_value(bus, bases, channel, value);
            if channel == ChannelId::Brightness {
                emit_commit(bus, bases);
            }
        }
    }
}

/// Follower-only state
#[derive(Debug, Clone)]
struct FollowerState {
    fade: FadeEngine,
    subscriptions: SubscriptionTable,
}

#[derive(Debug, Clone)]
enum RoleState {
    Controller(ControllerState),
    Follower(FollowerState),
}

impl RoleState {
    const fn role(&self) -> NodeRole {
        match self {
            Self::Controller(_) => NodeRole::Controller,
            Self::Follower(_) => NodeRole::Follower,
        }
    }
}

/// Control logic of one RGBW strip
pub struct RgbwStrip<D: StripDriver, A: AnalogInput> {
    driver: D,
    adc: Option<A>,
    config: StripConfig,
    renderer: StripRenderer,
    role: Option<RoleState>,
}

impl<D: StripDriver, A: AnalogInput> RgbwStrip<D, A> {
    /// Create a strip around its drivers
    ///
    /// `adc` is `None` when no analog converter is fitted. Nothing is
    /// active until the first [`Self::apply_configuration`].
    pub fn new(driver: D, adc: Option<A>) -> Self {
        Self {
            driver,
            adc,
            config: StripConfig::DEFAULT,
            renderer: StripRenderer::new(INITIAL_VALUES),
            role: None,
        }
    }

    /// Load the configuration and (re)activate the matching role
    ///
    /// Never fails: unreadable or invalid configuration falls back to
    /// defaults. Keeping the role keeps its in-flight state, changing it
    /// drops the previous role's state.
    pub fn apply_configuration<S, B>(&mut self, store: &mut S, bus: &mut B) -> NodeRole
    where
        S: ConfigStore,
        B: EventBus,
    {
        let config = load_or_default(store);
        let role = resolve_role(config.role, self.adc.as_mut());

        if self.driver.pixel_count() != config.led_count {
            self.reinitialize_driver(config.led_count);
        }

        let kept = match (&mut self.role, role) {
            (Some(RoleState::Controller(controller)), NodeRole::Controller) => {
                controller.sync.set_interval(config.sync_interval_seconds);
                true
            }
            (Some(RoleState::Follower(follower)), NodeRole::Follower) => {
                follower.subscriptions.set_bases(config.channel_bases);
                follower.subscriptions.register(bus);
                true
            }
            _ => false,
        };

        if !kept {
            self.role = Some(match role {
                NodeRole::Controller => RoleState::Controller(ControllerState::new(&config)),
                NodeRole::Follower => {
                    let mut subscriptions = SubscriptionTable::new(config.channel_bases);
                    subscriptions.register(bus);
                    RoleState::Follower(FollowerState {
                        fade: FadeEngine::new(self.renderer.values()),
                        subscriptions,
                    })
                }
            });
        }

        log!("strip: running as {}", role.as_str());
        self.config = config;
        role
    }

    /// Restore factory defaults in the store
    ///
    /// Clears the description and restores LED count, channel bases and
    /// role selection. Sync interval and startup delay are kept. The new
    /// values take effect with the next [`Self::apply_configuration`].
    pub fn factory_reset<S: ConfigStore>(&mut self, store: &mut S) {
        let current = store.load().unwrap_or_else(|err| {
            log!("config: unable to read configuration for reset ({:?})", err);
            StripConfig::DEFAULT
        });
        if let Err(err) = store.save(&current.factory_reset()) {
            log!("config: factory reset write failed: {:?}", err);
        }
    }

    /// Run one control loop step
    ///
    /// Never blocks. Call it continuously.
    pub fn poll<B: EventBus>(&mut self, now: Instant, bus: &mut B) {
        match &mut self.role {
            Some(RoleState::Controller(controller)) => {
                if let Some(adc) = self.adc.as_mut() {
                    controller.poll(
                        now,
                        adc,
                        &mut self.renderer,
                        bus,
                        &self.config.channel_bases,
                    );
                }
            }
            Some(RoleState::Follower(follower)) => {
                follower.fade.poll(now, &mut self.renderer);
            }
            None => {}
        }

        self.renderer.flush(now, &mut self.driver);
    }

    /// Handle an inbound bus message
    ///
    /// Only followers listen; a controller ignores everything. Events of
    /// foreign channels are dropped silently.
    pub fn handle_report<B: EventBus>(&mut self, report: BusReport, now: Instant, bus: &mut B) {
        let Some(RoleState::Follower(follower)) = &mut self.role else {
            return;
        };

        match report {
            BusReport::Event(event) => {
                let Some((channel, value)) = follower.subscriptions.route(event) else {
                    return;
                };
                follower.fade.handle(channel, value, now, &mut self.renderer);
                if channel == ChannelId::Duration && value == 0 {
                    self.renderer.flush(now, &mut self.driver);
                }
            }
            BusReport::IdentifyGlobal => {
                if follower.subscriptions.is_registered() {
                    follower.subscriptions.identify_producer(bus);
                }
            }
            BusReport::IdentifyConsumer(event) => {
                follower.subscriptions.identify_consumer(event, bus);
            }
        }
    }

    pub fn role(&self) -> Option<NodeRole> {
        self.role.as_ref().map(RoleState::role)
    }

    pub const fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Latest logical channel state
    pub const fn values(&self) -> ChannelValues {
        self.renderer.values()
    }

    /// Channel state last committed to the hardware
    pub const fn committed(&self) -> ChannelValues {
        self.renderer.committed()
    }

    /// Follower values waiting for a commit
    pub fn pending(&self) -> Option<ChannelValues> {
        match &self.role {
            Some(RoleState::Follower(follower)) => Some(follower.fade.pending()),
            _ => None,
        }
    }

    pub fn is_fading(&self) -> bool {
        matches!(&self.role, Some(RoleState::Follower(follower)) if follower.fade.is_fading())
    }

    /// Startup animation progress of a controller
    pub fn animation_state(&self) -> Option<AnimationState> {
        match &self.role {
            Some(RoleState::Controller(controller)) => Some(controller.animation.state()),
            _ => None,
        }
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn adc_mut(&mut self) -> Option<&mut A> {
        self.adc.as_mut()
    }

    /// Set the driver up for `led_count` pixels
    ///
    /// The picture is restored by the next rate-limited flush.
    fn reinitialize_driver(&mut self, led_count: u16) {
        self.driver.reinitialize(led_count);
        self.renderer.invalidate();
        log!("strip: initialized {} LEDs", led_count);
    }
}
