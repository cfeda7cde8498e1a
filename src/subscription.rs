//! Follower-side bus subscriptions
//!
//! One masked subscription per channel. Inbound identifiers are routed to a
//! channel by comparing their upper 56 bits against the configured bases.

use crate::bus::{CHANNEL_MASK_BITS, EventBus};
use crate::codec::{CHANNEL_COUNT, ChannelBases, ChannelId, EventId, decode};

#[derive(Debug, Clone)]
pub struct SubscriptionTable {
    bases: ChannelBases,
    /// Base each channel is subscribed with on the bus
    subscribed: [Option<EventId>; CHANNEL_COUNT],
}

impl SubscriptionTable {
    pub const fn new(bases: ChannelBases) -> Self {
        Self {
            bases,
            subscribed: [None; CHANNEL_COUNT],
        }
    }

    pub const fn bases(&self) -> &ChannelBases {
        &self.bases
    }

    /// Whether every channel is subscribed with its current base
    pub fn is_registered(&self) -> bool {
        ChannelId::ALL
            .into_iter()
            .all(|channel| self.is_subscribed(channel))
    }

    fn is_subscribed(&self, channel: ChannelId) -> bool {
        self.subscribed[channel.index()] == Some(self.bases.get(channel))
    }

    /// Switch to new channel bases
    ///
    /// Takes effect on the bus with the next [`Self::register`].
    pub fn set_bases(&mut self, bases: ChannelBases) {
        self.bases = bases;
    }

    /// Subscribe every channel not yet subscribed with its current base
    ///
    /// Failures are logged and the node keeps running with whatever
    /// subscriptions succeeded. Failed channels are retried by the next
    /// call.
    pub fn register<B: EventBus>(&mut self, bus: &mut B) {
        for channel in ChannelId::ALL {
            if self.is_subscribed(channel) {
                continue;
            }
            let base = self.bases.get(channel);
            match bus.subscribe(base, CHANNEL_MASK_BITS) {
                Ok(()) => self.subscribed[channel.index()] = Some(base),
                Err(err) => log!(
                    "bus: failed to subscribe to {} ({:#018X}): {:?}",
                    channel.as_str(),
                    base,
                    err
                ),
            }
        }
    }

    /// Channel and value carried by an inbound identifier
    ///
    /// Identifiers of foreign channels yield `None`.
    pub fn route(&self, event: EventId) -> Option<(ChannelId, u8)> {
        self.bases
            .lookup(event)
            .map(|channel| (channel, decode(event)))
    }

    /// Answer a global identification query
    pub fn identify_producer<B: EventBus>(&self, bus: &mut B) {
        for channel in ChannelId::ALL {
            let base = self.bases.get(channel);
            if let Err(err) = bus.identify_producer(base, CHANNEL_MASK_BITS) {
                log!(
                    "bus: failed to identify as producer of {}: {:?}",
                    channel.as_str(),
                    err
                );
            }
        }
    }

    /// Answer a consumer identification query
    ///
    /// Only queries for one of our channels get a response.
    pub fn identify_consumer<B: EventBus>(&self, event: EventId, bus: &mut B) {
        let Some(channel) = self.bases.lookup(event) else {
            return;
        };
        if let Err(err) = bus.identify_consumer(self.bases.get(channel), CHANNEL_MASK_BITS) {
            log!(
                "bus: failed to identify as consumer of {}: {:?}",
                channel.as_str(),
                err
            );
        }
    }
}
