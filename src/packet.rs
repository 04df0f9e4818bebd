use typed_builder::TypedBuilder;

use crate::{
    ident::{PacketId, PortId},
    time::{Slot, Slots},
};

/// A fixed-size cell travelling from an input port to an output port.
///
/// Packets are never mutated after creation. Two packets with the same
/// endpoints and arrival slot are still told apart by their `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub(crate) struct Packet {
    pub(crate) id: PacketId,
    pub(crate) src: PortId,
    pub(crate) dst: PortId,
    pub(crate) arrival: Slot,
}

impl Packet {
    /// The number of slots this packet has spent in the switch as of `now`.
    pub(crate) fn delay(&self, now: Slot) -> Slots {
        now - self.arrival
    }
}
