use crate::{
    ident::{PacketId, PortId},
    metrics::Metrics,
    packet::Packet,
    port::Ports,
    rng::SimRng,
    time::Slot,
};

/// Bernoulli arrivals with uniformly distributed destinations.
#[derive(Debug, Clone, derive_new::new)]
pub(crate) struct Traffic {
    prob: f64,
    #[new(default)]
    next_id: PacketId,
}

impl Traffic {
    /// Offers at most one new packet to every input port. A packet that finds
    /// its input buffer full is dropped and counted.
    pub(crate) fn step(
        &mut self,
        now: Slot,
        ports: &mut Ports,
        rng: &mut SimRng,
        metrics: &mut Metrics,
    ) {
        let nr_ports = ports.len();
        for src in PortId::all(nr_ports) {
            if !rng.bernoulli(self.prob) {
                continue;
            }
            let pkt = Packet::builder()
                .id(self.next_id.bump())
                .src(src)
                .dst(rng.port(nr_ports))
                .arrival(now)
                .build();
            metrics.generated += 1;
            if let Err(pkt) = ports[src].input.enqueue(pkt) {
                log::trace!("slot {now}: input {src} full, dropping packet {}", pkt.id);
                metrics.input_drops += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_generates_at_full_load() {
        let mut ports = Ports::new(4, 2, false);
        let mut rng = SimRng::from_seed(1);
        let mut metrics = Metrics::default();
        let mut traffic = Traffic::new(1.0);
        traffic.step(Slot::ZERO, &mut ports, &mut rng, &mut metrics);
        assert_eq!(metrics.generated, 4);
        assert_eq!(metrics.input_drops, 0);
        for (src, port) in ports.iter().enumerate() {
            let pkt = port.input.peek().unwrap();
            assert_eq!(pkt.src, PortId::new(src));
            assert!(pkt.dst.into_usize() < 4);
            assert_eq!(pkt.arrival, Slot::ZERO);
        }
    }

    #[test]
    fn never_generates_at_zero_load() {
        let mut ports = Ports::new(4, 2, false);
        let mut rng = SimRng::from_seed(1);
        let mut metrics = Metrics::default();
        let mut traffic = Traffic::new(0.0);
        for t in 0..100 {
            traffic.step(Slot::new(t), &mut ports, &mut rng, &mut metrics);
        }
        assert_eq!(metrics.generated, 0);
        assert_eq!(ports.occupancy(), 0);
    }

    #[test]
    fn full_input_drops() {
        let mut ports = Ports::new(2, 1, false);
        let mut rng = SimRng::from_seed(3);
        let mut metrics = Metrics::default();
        let mut traffic = Traffic::new(1.0);
        traffic.step(Slot::ZERO, &mut ports, &mut rng, &mut metrics);
        traffic.step(Slot::ONE, &mut ports, &mut rng, &mut metrics);
        assert_eq!(metrics.generated, 4);
        assert_eq!(metrics.input_drops, 2);
        assert_eq!(ports.occupancy(), 2);
    }

    #[test]
    fn ids_are_unique() {
        let mut ports = Ports::new(3, 10, false);
        let mut rng = SimRng::from_seed(9);
        let mut metrics = Metrics::default();
        let mut traffic = Traffic::new(1.0);
        for t in 0..3 {
            traffic.step(Slot::new(t), &mut ports, &mut rng, &mut metrics);
        }
        let mut ids = ports
            .iter()
            .flat_map(|port| port.input.iter().map(|p| p.id))
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 9);
    }
}
