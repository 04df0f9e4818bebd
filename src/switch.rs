use crate::{
    arbiter::{Arbitrate, Report},
    metrics::{self, Metrics},
    port::Ports,
    rng::SimRng,
    time::Slot,
    traffic::Traffic,
};

/// An N-port switch: its buffers, its arbiter and its running totals.
#[derive(Debug, typed_builder::TypedBuilder)]
pub(crate) struct Switch<A: Arbitrate> {
    ports: Ports,
    arbiter: A,
    traffic: Traffic,
    #[builder(default, setter(skip))]
    metrics: Metrics,
}

impl<A: Arbitrate> Switch<A> {
    /// Runs one slot: generate, then arbitrate, then transmit.
    pub(crate) fn step(&mut self, now: Slot, rng: &mut SimRng) -> Report {
        self.traffic.step(now, &mut self.ports, rng, &mut self.metrics);

        let report = self.arbiter.arbitrate(&mut self.ports, rng);
        for m in &report.moves {
            log::trace!("slot {now}: packet {} moved {} -> {}", m.pkt, m.src, m.dst);
        }
        self.metrics.output_drops += report.output_drops;
        self.metrics.knockout_drops += report.knockout_drops;
        log::debug!(
            "slot {now}: {} moved, {} output drops, {} knocked out",
            report.moves.len(),
            report.output_drops,
            report.knockout_drops,
        );

        metrics::transmit(now, &mut self.ports, &mut self.metrics);

        debug_assert!(self.within_capacity());
        debug_assert_eq!(
            self.metrics.generated,
            self.metrics.transmitted + self.metrics.dropped() + self.in_flight()
        );
        report
    }

    /// Packets still sitting in some buffer.
    pub(crate) fn in_flight(&self) -> u64 {
        self.ports.occupancy() as u64
    }

    pub(crate) fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn within_capacity(&self) -> bool {
        self.ports.iter().all(|port| {
            [&port.input, &port.output]
                .into_iter()
                .all(|buf| buf.capacity().map_or(true, |cap| buf.len() <= cap))
        })
    }
}
