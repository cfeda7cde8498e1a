//! Publish/subscribe event bus boundary
//!
//! The transport itself (framing, addressing, delivery) lives outside the
//! core. Everything the core sends is fire-and-forget: failures are logged
//! and never retried.

use crate::codec::{ChannelBases, ChannelId, EventId, VALUE_BITS};

/// Error reported by the bus for an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// No buffer or send slot available right now
    Busy,
    /// The transport refused or failed to deliver the message
    Rejected,
}

/// Inbound message delivered by the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusReport {
    /// Event report matching one of the registered subscriptions
    Event(EventId),
    /// Global identification query
    IdentifyGlobal,
    /// Query for consumers of the given identifier
    IdentifyConsumer(EventId),
}

/// Outbound side of the event bus
pub trait EventBus {
    /// Broadcast a global event report
    fn emit(&mut self, event: EventId) -> Result<(), BusError>;

    /// Register interest in every identifier sharing `base` above the low
    /// `mask_bits` bits
    fn subscribe(&mut self, base: EventId, mask_bits: u8) -> Result<(), BusError>;

    /// Announce this node as producer of the identifier range
    fn identify_producer(&mut self, base: EventId, mask_bits: u8) -> Result<(), BusError>;

    /// Announce this node as a valid consumer of the identifier range
    fn identify_consumer(&mut self, base: EventId, mask_bits: u8) -> Result<(), BusError>;
}

impl<T: EventBus + ?Sized> EventBus for &mut T {
    fn emit(&mut self, event: EventId) -> Result<(), BusError> {
        (**self).emit(event)
    }

    fn subscribe(&mut self, base: EventId, mask_bits: u8) -> Result<(), BusError> {
        (**self).subscribe(base, mask_bits)
    }

    fn identify_producer(&mut self, base: EventId, mask_bits: u8) -> Result<(), BusError> {
        (**self).identify_producer(base, mask_bits)
    }

    fn identify_consumer(&mut self, base: EventId, mask_bits: u8) -> Result<(), BusError> {
        (**self).identify_consumer(base, mask_bits)
    }
}

/// Broadcast one channel value, logging a failed send
pub fn emit_value<B: EventBus>(bus: &mut B, bases: &ChannelBases, channel: ChannelId, value: u8) {
    let event = bases.event(channel, value);
    if let Err(err) = bus.emit(event) {
        log!(
            "bus: failed to send {} = {} ({:#018X}): {:?}",
            channel.as_str(),
            value,
            event,
            err
        );
    }
}

/// Broadcast the commit signal that makes followers apply pending values
pub fn emit_commit<B: EventBus>(bus: &mut B, bases: &ChannelBases) {
    emit_value(bus, bases, ChannelId::Duration, 0);
}

/// Mask width of every channel subscription
pub const CHANNEL_MASK_BITS: u8 = VALUE_BITS;
