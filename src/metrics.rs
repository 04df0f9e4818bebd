use crate::{
    port::Ports,
    time::{Slot, Slots},
};

/// Running totals for one simulation run. Every counter only ever grows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Packets created by the traffic generator.
    pub generated: u64,
    /// Packets that left through an output link.
    pub transmitted: u64,
    /// Packets dropped because their input buffer was full on arrival.
    pub input_drops: u64,
    /// Packets dropped because their output buffer was full on admission.
    pub output_drops: u64,
    /// Packets that lost a knockout lottery.
    pub knockout_drops: u64,
    /// Sum of the delays of all transmitted packets.
    pub total_delay: Slots,
    /// Number of (link, slot) pairs in which a link carried a packet.
    pub busy_link_slots: u64,
}

impl Metrics {
    /// Drops of every kind.
    pub fn dropped(&self) -> u64 {
        self.input_drops + self.output_drops + self.knockout_drops
    }

    pub fn capacity_drops(&self) -> u64 {
        self.input_drops + self.output_drops
    }
}

/// Sends the oldest packet of every non-empty output buffer out on its link.
pub(crate) fn transmit(now: Slot, ports: &mut Ports, metrics: &mut Metrics) {
    for dst in ports.ids() {
        if let Some(pkt) = ports[dst].output.dequeue() {
            let delay = pkt.delay(now);
            log::trace!("slot {now}: output {dst} sent packet {} after {delay}", pkt.id);
            metrics.total_delay += delay;
            metrics.transmitted += 1;
            metrics.busy_link_slots += 1;
        }
    }
}
