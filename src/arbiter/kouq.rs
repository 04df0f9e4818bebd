use crate::{port::Ports, rng::SimRng};

use super::{Arbitrate, Report};

/// Knockout output queueing.
///
/// Every non-empty input pushes its head-of-line packet into the fabric each
/// slot. An output accepts at most `limit` of the packets addressed to it;
/// when more arrive, a fair lottery picks the survivors and the rest are
/// knocked out.
#[derive(Debug, Clone, derive_new::new)]
pub(crate) struct Kouq {
    limit: usize,
}

impl Kouq {
    /// The knockout limit `K = floor(nr_ports * fraction)`.
    pub(crate) fn with_fraction(nr_ports: usize, fraction: f64) -> Self {
        Self::new((nr_ports as f64 * fraction).floor() as usize)
    }

    pub(crate) fn limit(&self) -> usize {
        self.limit
    }
}

impl Arbitrate for Kouq {
    fn arbitrate(&mut self, ports: &mut Ports, rng: &mut SimRng) -> Report {
        let mut report = Report::default();
        let mut arrivals = vec![Vec::new(); ports.len()];
        for src in ports.ids() {
            if let Some(pkt) = ports[src].input.dequeue() {
                arrivals[pkt.dst.into_usize()].push(pkt);
            }
        }
        for pkts in arrivals {
            if pkts.len() <= self.limit {
                for pkt in pkts {
                    report.admit(ports, pkt);
                }
                continue;
            }
            report.knock_out(pkts.len() - self.limit);
            for idx in rng.choose_k(pkts.len(), self.limit) {
                report.admit(ports, pkts[idx]);
            }
        }
        report
    }
}
