use crate::{port::Ports, rng::SimRng};

use super::{Arbitrate, Report};

/// Input queueing.
///
/// Only head-of-line packets compete, so a packet stuck behind a losing head
/// waits even if its own output is idle. Every output with at least one
/// contender picks a winner uniformly at random.
#[derive(Debug, Default, Clone)]
pub(crate) struct Inq;

impl Arbitrate for Inq {
    fn arbitrate(&mut self, ports: &mut Ports, rng: &mut SimRng) -> Report {
        let mut report = Report::default();
        for contenders in ports.heads_by_output() {
            if contenders.is_empty() {
                continue;
            }
            let winner = contenders[rng.index(contenders.len())];
            let pkt = ports[winner.src]
                .input
                .remove(winner.id)
                .expect("head-of-line packet missing from its input buffer");
            report.admit(ports, pkt);
        }
        report
    }
}
