use crate::{ident::PortId, packet::Packet, port::Ports, rng::SimRng};

use super::{Arbitrate, Report};

/// iSLIP request/grant/accept matching with persistent round-robin pointers.
///
/// A single iteration runs per slot. Requests come from head-of-line
/// packets, so every input requests at most one output.
///
/// Pointers only move when a grant is accepted: the output's grant pointer
/// goes to one past the input it matched, and the input's accept pointer
/// goes to one past the output it matched. An output whose buffer is full
/// issues no grant, so iSLIP never drops at the output.
#[derive(Debug, Clone)]
pub(crate) struct Islip {
    grant: Vec<PortId>,
    accept: Vec<PortId>,
}

impl Islip {
    pub(crate) fn new(nr_ports: usize) -> Self {
        Self {
            grant: vec![PortId::ZERO; nr_ports],
            accept: vec![PortId::ZERO; nr_ports],
        }
    }

    #[cfg(test)]
    pub(crate) fn grant_pointer(&self, dst: PortId) -> PortId {
        self.grant[dst.into_usize()]
    }

    #[cfg(test)]
    pub(crate) fn accept_pointer(&self, src: PortId) -> PortId {
        self.accept[src.into_usize()]
    }
}

/// Scans the ports starting at `start`, wrapping around, and returns the
/// first one satisfying `pred`.
fn round_robin(
    start: PortId,
    nr_ports: usize,
    pred: impl Fn(PortId) -> bool,
) -> Option<PortId> {
    (0..nr_ports)
        .map(|k| PortId::new((start.into_usize() + k) % nr_ports))
        .find(|&port| pred(port))
}

impl Arbitrate for Islip {
    fn arbitrate(&mut self, ports: &mut Ports, _rng: &mut SimRng) -> Report {
        let nr_ports = ports.len();
        debug_assert_eq!(self.grant.len(), nr_ports);

        // Request
        let heads = ports
            .iter()
            .map(|port| port.input.peek().copied())
            .collect::<Vec<Option<Packet>>>();
        let requests = |src: PortId, dst: PortId| {
            heads[src.into_usize()].is_some_and(|pkt| pkt.dst == dst)
        };

        // Grant
        let grants = ports
            .ids()
            .map(|dst| {
                if ports[dst].output.is_full() {
                    return None;
                }
                round_robin(self.grant[dst.into_usize()], nr_ports, |src| {
                    requests(src, dst)
                })
            })
            .collect::<Vec<Option<PortId>>>();

        // Accept
        let mut report = Report::default();
        for src in ports.ids() {
            let accepted = round_robin(self.accept[src.into_usize()], nr_ports, |dst| {
                grants[dst.into_usize()] == Some(src)
            });
            let Some(dst) = accepted else {
                continue;
            };
            let head = heads[src.into_usize()].expect("granted input has no head of line");
            let pkt = ports[src]
                .input
                .remove(head.id)
                .expect("head-of-line packet missing from its input buffer");
            report.admit(ports, pkt);
            self.grant[dst.into_usize()] = src.next(nr_ports);
            self.accept[src.into_usize()] = dst.next(nr_ports);
        }
        report
    }
}
