//! Per-slot arbitration between input buffers and output buffers.
//!
//! Each discipline decides which head-of-line packets cross the fabric in a
//! slot. Arbiters never create packets: everything they take out of an input
//! buffer ends up in an output buffer or in the drop counters of the
//! returned [`Report`].

pub(crate) mod inq;
pub(crate) mod islip;
pub(crate) mod kouq;

use std::str::FromStr;

use smallvec::SmallVec;

use crate::{
    ident::{PacketId, PortId},
    packet::Packet,
    port::Ports,
    rng::SimRng,
};

pub(crate) use self::{inq::Inq, islip::Islip, kouq::Kouq};

/// A port-arbitration discipline.
pub(crate) trait Arbitrate {
    /// Moves packets from input buffers to output buffers for one slot.
    fn arbitrate(&mut self, ports: &mut Ports, rng: &mut SimRng) -> Report;
}

/// The arbitration disciplines a switch can run.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Discipline {
    /// Input queueing: one random winner per output among head-of-line packets.
    #[display(fmt = "INQ")]
    #[serde(rename = "INQ", alias = "inq")]
    Inq,
    /// Knockout output queueing: at most `K` winners per output per slot.
    #[default]
    #[display(fmt = "KOUQ")]
    #[serde(rename = "KOUQ", alias = "kouq")]
    Kouq,
    /// Round-robin request/grant/accept matching.
    #[display(fmt = "iSLIP")]
    #[serde(rename = "iSLIP", alias = "islip", alias = "ISLIP")]
    Islip,
}

impl FromStr for Discipline {
    type Err = ParseDisciplineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inq" => Ok(Discipline::Inq),
            "kouq" => Ok(Discipline::Kouq),
            "islip" => Ok(Discipline::Islip),
            _ => Err(ParseDisciplineError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown queue type `{0}` (expected INQ, KOUQ or iSLIP)")]
pub struct ParseDisciplineError(String);

/// A packet that crossed the fabric this slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub(crate) struct Move {
    pub(crate) pkt: PacketId,
    pub(crate) src: PortId,
    pub(crate) dst: PortId,
}

// Most slots move only a handful of packets
pub(crate) type MoveList = SmallVec<[Move; 8]>;

/// What one arbitration pass did.
#[derive(Debug, Default, Clone)]
pub(crate) struct Report {
    pub(crate) moves: MoveList,
    pub(crate) output_drops: u64,
    pub(crate) knockout_drops: u64,
}

impl Report {
    /// Places `pkt`, already taken out of its input buffer, into its output
    /// buffer. A full output buffer drops it.
    pub(crate) fn admit(&mut self, ports: &mut Ports, pkt: Packet) {
        match ports[pkt.dst].output.enqueue(pkt) {
            Ok(()) => self.moves.push(Move::new(pkt.id, pkt.src, pkt.dst)),
            Err(pkt) => {
                log::trace!("output {} full, dropping packet {}", pkt.dst, pkt.id);
                self.output_drops += 1;
            }
        }
    }

    pub(crate) fn knock_out(&mut self, nr_losers: usize) {
        self.knockout_drops += nr_losers as u64;
    }

    /// The number of packets admitted into output `dst` this slot.
    #[cfg(test)]
    pub(crate) fn admitted_at(&self, dst: PortId) -> usize {
        self.moves.iter().filter(|m| m.dst == dst).count()
    }
}
