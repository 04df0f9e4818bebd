use std::ops::{Index, IndexMut};

use crate::{ident::PortId, packet::Packet, queue::Buffer};

/// A switch port: one input buffer feeding the fabric and one output buffer
/// draining onto the outgoing link.
#[derive(Debug, Clone)]
pub(crate) struct Port {
    pub(crate) input: Buffer,
    pub(crate) output: Buffer,
}

/// All ports of the switch, indexed by [`PortId`].
#[derive(Debug, Clone)]
pub(crate) struct Ports {
    ports: Vec<Port>,
}

impl Ports {
    /// Creates `nr_ports` ports. Output buffers hold at most `buffer_size`
    /// packets; input buffers do too unless `unbounded_input` is set.
    pub(crate) fn new(nr_ports: usize, buffer_size: usize, unbounded_input: bool) -> Self {
        let ports = (0..nr_ports)
            .map(|_| Port {
                input: if unbounded_input {
                    Buffer::unbounded()
                } else {
                    Buffer::bounded(buffer_size)
                },
                output: Buffer::bounded(buffer_size),
            })
            .collect();
        Self { ports }
    }

    pub(crate) fn len(&self) -> usize {
        self.ports.len()
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = PortId> {
        PortId::all(self.len())
    }

    /// The head-of-line packet of every non-empty input buffer, in input
    /// order. At most one packet per input port is ever yielded.
    pub(crate) fn heads(&self) -> impl Iterator<Item = Packet> + '_ {
        self.ports.iter().filter_map(|port| port.input.peek().copied())
    }

    /// Head-of-line packets grouped by destination: entry `o` lists the
    /// packets whose head of line targets output `o`, in input order.
    pub(crate) fn heads_by_output(&self) -> Vec<Vec<Packet>> {
        let mut requests = vec![Vec::new(); self.len()];
        for pkt in self.heads() {
            requests[pkt.dst.into_usize()].push(pkt);
        }
        requests
    }

    /// The number of packets buffered anywhere in the switch.
    pub(crate) fn occupancy(&self) -> usize {
        self.ports
            .iter()
            .map(|port| port.input.len() + port.output.len())
            .sum()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter()
    }
}

impl Index<PortId> for Ports {
    type Output = Port;

    fn index(&self, index: PortId) -> &Self::Output {
        &self.ports[index.into_usize()]
    }
}

impl IndexMut<PortId> for Ports {
    fn index_mut(&mut self, index: PortId) -> &mut Self::Output {
        &mut self.ports[index.into_usize()]
    }
}
